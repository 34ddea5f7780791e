//! Match session: wires profile selection to the round engine
//!
//! The session owns the pieces a frontend drives: the selection state, the
//! current round (if any), the reveal schedule in flight, and the RNG. It
//! also owns the generation counter — generations are allocated here and
//! never reused, so a schedule left behind by a discarded round can never
//! touch a later one.

use serde::Serialize;

use crate::catalog::{Catalog, ProfileId};
use crate::game::{Choice, MatchEngine, RoundError, RoundSnapshot, ScheduledReveal};
use crate::random::SeededRng;
use crate::selection::{GameMode, SelectionError, SelectionState, Side};

/// Read-only state for the presentation layer, refreshed after every
/// mutating call
#[derive(Clone, Debug, Serialize)]
pub struct SessionSnapshot {
    pub mode: GameMode,
    pub name_a: String,
    pub name_b: String,
    pub profile_a: Option<ProfileId>,
    pub profile_b: Option<ProfileId>,
    /// Whichever side still has to claim a profile
    pub selection_turn: Option<Side>,
    pub selection_complete: bool,
    pub round: Option<RoundSnapshot>,
}

/// One play session: selection, then any number of rounds
pub struct MatchSession {
    selection: SelectionState,
    engine: Option<MatchEngine>,
    pending: Option<ScheduledReveal>,
    rng: SeededRng,
    generations: u64,
}

impl MatchSession {
    pub fn new(mode: GameMode, seed: u64) -> Self {
        Self {
            selection: SelectionState::new(mode),
            engine: None,
            pending: None,
            rng: SeededRng::new(seed),
            generations: 0,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.selection.mode()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn engine(&self) -> Option<&MatchEngine> {
        self.engine.as_ref()
    }

    fn next_generation(&mut self) -> u64 {
        self.generations += 1;
        self.generations
    }

    /// Apply trim-and-default logic to both trainer names
    pub fn finalize_names(&mut self, name_a: &str, name_b: &str) {
        self.selection.finalize_names(name_a, name_b);
    }

    /// Claim a profile; the round engine starts the moment selection
    /// completes
    pub fn claim(
        &mut self,
        catalog: &Catalog,
        profile_id: ProfileId,
        side: Side,
    ) -> Result<(), SelectionError> {
        self.selection.claim(catalog, profile_id, side, &mut self.rng)?;

        if self.engine.is_none() {
            if let Some((a, b)) = self.selection.bound_profiles() {
                let generation = self.next_generation();
                self.engine = Some(MatchEngine::new(a, b, self.mode(), generation));
                tracing::debug!(profile_a = a, profile_b = b, generation, "match started");
            }
        }
        Ok(())
    }

    /// Register a choice for one side of the current round
    pub fn submit_choice(
        &mut self,
        choice: Choice,
        side: Side,
        now_ms: u64,
    ) -> Result<(), RoundError> {
        let engine = self
            .engine
            .as_mut()
            .expect("round operation before selection is complete");

        if let Some(schedule) = engine.submit_choice(choice, side, &mut self.rng, now_ms)? {
            self.pending = Some(schedule);
        }
        Ok(())
    }

    /// Apply any due delayed transitions
    ///
    /// The schedule carries the generation it was created for; if the round
    /// it targeted is gone (or already superseded), the schedule is dropped
    /// without touching anything.
    pub fn tick(&mut self, now_ms: u64) {
        let Some(schedule) = self.pending else {
            return;
        };

        let Some(engine) = self.engine.as_mut() else {
            tracing::debug!(
                generation = schedule.generation,
                "dropping schedule for a discarded round"
            );
            self.pending = None;
            return;
        };
        if engine.generation() != schedule.generation {
            tracing::debug!(
                generation = schedule.generation,
                current = engine.generation(),
                "dropping schedule for a superseded round"
            );
            self.pending = None;
            return;
        }

        if now_ms >= schedule.reveal_at {
            engine.apply_reveal(schedule.generation);
        }
        if now_ms >= schedule.complete_at {
            engine.apply_complete(schedule.generation);
            self.pending = None;
        }
    }

    /// Start another round with the same profiles
    pub fn rematch(&mut self) -> Result<(), RoundError> {
        let generation = self.next_generation();
        let engine = self
            .engine
            .as_mut()
            .expect("round operation before selection is complete");
        engine.rematch(generation)
    }

    /// Discard the current round and reopen profile selection
    ///
    /// Valid from any round state. A reveal schedule still in flight is not
    /// cancelled — `tick` suppresses it once its round is gone.
    pub fn reset_to_selection(&mut self) {
        self.engine = None;
        self.selection.reset();
        tracing::debug!("round discarded, selection reopened");
    }

    /// Switch modes: full reset, display names included
    pub fn change_mode(&mut self, mode: GameMode) {
        self.engine = None;
        self.selection = SelectionState::new(mode);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode(),
            name_a: self.selection.slot(Side::A).display_name.clone(),
            name_b: self.selection.slot(Side::B).display_name.clone(),
            profile_a: self.selection.slot(Side::A).profile,
            profile_b: self.selection.slot(Side::B).profile,
            selection_turn: self.selection.active_turn(),
            selection_complete: self.selection.is_complete(),
            round: self.engine.as_ref().map(MatchEngine::snapshot),
        }
    }
}
