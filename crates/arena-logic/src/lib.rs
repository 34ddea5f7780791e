//! Match Logic for PokeArena
//!
//! Core game logic for rock-paper-scissors creature battles.
//! This crate is compiled to:
//! - Native (for tests and host embedding)
//! - WASM (for the browser frontend)
//!
//! The host owns the catalog load and the clock; everything here is
//! deterministic given a seed and caller-supplied timestamps.

mod random;
mod catalog;
mod selection;
mod game;
mod session;

#[cfg(feature = "wasm")]
mod wasm;

pub use random::SeededRng;
pub use catalog::{Catalog, CatalogError, Profile, ProfileId};
pub use selection::{
    GameMode, ParticipantSlot, SelectionError, SelectionState, Side, DEFAULT_NAME_A,
    DEFAULT_NAME_B, DEFAULT_NAME_CPU,
};
pub use game::{
    Choice, MatchEngine, Outcome, RoundError, RoundPhase, RoundSnapshot, ScheduledReveal,
    CLASH_DELAY_MS, REVEAL_DELAY_MS,
};
pub use session::{MatchSession, SessionSnapshot};

/// The fixed beats-relation: the choice each choice defeats
pub fn beats(choice: Choice) -> Choice {
    match choice {
        Choice::Rock => Choice::Scissors,
        Choice::Paper => Choice::Rock,
        Choice::Scissors => Choice::Paper,
    }
}

/// Resolve a pair of choices into a round outcome
///
/// Total and deterministic: equal choices draw, otherwise exactly one side
/// wins under the beats-relation.
pub fn resolve(choice_a: Choice, choice_b: Choice) -> Outcome {
    if choice_a == choice_b {
        Outcome::Draw
    } else if beats(choice_a) == choice_b {
        Outcome::WinA
    } else {
        Outcome::WinB
    }
}
