//! WASM bindings for driving a match session from the frontend

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{Catalog, Choice, GameMode, MatchSession, Profile, Side};

fn parse_mode(mode: &str) -> Result<GameMode, JsError> {
    match mode {
        "sequential" => Ok(GameMode::Sequential),
        "automated" => Ok(GameMode::Automated),
        _ => Err(JsError::new(&format!("Unknown mode: {}", mode))),
    }
}

fn parse_side(side: &str) -> Result<Side, JsError> {
    match side {
        "A" | "a" => Ok(Side::A),
        "B" | "b" => Ok(Side::B),
        _ => Err(JsError::new(&format!("Unknown side: {}", side))),
    }
}

fn parse_choice(choice: &str) -> Result<Choice, JsError> {
    match choice {
        "rock" => Ok(Choice::Rock),
        "paper" => Ok(Choice::Paper),
        "scissors" => Ok(Choice::Scissors),
        _ => Err(JsError::new(&format!("Unknown choice: {}", choice))),
    }
}

/// A match session plus its catalog, driven from JavaScript
///
/// The host supplies the loaded catalog as JSON, a mode string
/// (`"sequential"` / `"automated"`), a randomness seed, and millisecond
/// timestamps for `submit_choice`/`tick` (e.g. `performance.now()`).
#[wasm_bindgen]
pub struct WasmSession {
    catalog: Catalog,
    session: MatchSession,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str, mode: &str, seed: u64) -> Result<WasmSession, JsError> {
        let profiles: Vec<Profile> = serde_json::from_str(catalog_json)
            .map_err(|e| JsError::new(&format!("Invalid catalog: {}", e)))?;
        let catalog = Catalog::new(profiles)
            .map_err(|e| JsError::new(&format!("Invalid catalog: {}", e)))?;

        Ok(Self {
            catalog,
            session: MatchSession::new(parse_mode(mode)?, seed),
        })
    }

    pub fn finalize_names(&mut self, name_a: &str, name_b: &str) {
        self.session.finalize_names(name_a, name_b);
    }

    pub fn claim(&mut self, profile_id: u32, side: &str) -> Result<JsValue, JsError> {
        let side = parse_side(side)?;
        self.session
            .claim(&self.catalog, profile_id, side)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.snapshot()
    }

    pub fn submit_choice(
        &mut self,
        choice: &str,
        side: &str,
        now_ms: u64,
    ) -> Result<JsValue, JsError> {
        let choice = parse_choice(choice)?;
        let side = parse_side(side)?;
        self.session
            .submit_choice(choice, side, now_ms)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.snapshot()
    }

    /// Apply any due delayed transitions and return the fresh snapshot
    pub fn tick(&mut self, now_ms: u64) -> Result<JsValue, JsError> {
        self.session.tick(now_ms);
        self.snapshot()
    }

    pub fn rematch(&mut self) -> Result<JsValue, JsError> {
        self.session
            .rematch()
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.snapshot()
    }

    pub fn reset_to_selection(&mut self) -> Result<JsValue, JsError> {
        self.session.reset_to_selection();
        self.snapshot()
    }

    pub fn change_mode(&mut self, mode: &str) -> Result<JsValue, JsError> {
        self.session.change_mode(parse_mode(mode)?);
        self.snapshot()
    }

    /// Current read-only session state
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.session.snapshot())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Number of profiles in the catalog
    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }
}
