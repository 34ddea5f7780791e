//! Round execution engine
//!
//! Drives one rock-paper-scissors round between two bound profiles: choice
//! intake, CPU auto-play, the two-phase timed reveal, and the outcome. The
//! engine owns the schedule but never reads a clock — timestamps come from
//! the caller in milliseconds, which keeps the state machine deterministic
//! under test and usable from WASM.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::ProfileId;
use crate::random::SeededRng;
use crate::selection::{GameMode, Side};
use crate::resolve;

/// A choice in a round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// All three choices, in the CPU draw order
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];
}

/// Result of a completed round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    WinA,
    WinB,
    Draw,
}

/// Round lifecycle phases
///
/// `AwaitingChoiceB` is unreachable in automated mode: the CPU choice is
/// drawn in the same operation that stores Side A's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    AwaitingChoiceA,
    AwaitingChoiceB,
    Resolving,
    Revealed,
    Complete,
}

/// Delay before both choices become visible (the clash window)
pub const CLASH_DELAY_MS: u64 = 500;
/// Further delay before the outcome is announced
pub const REVEAL_DELAY_MS: u64 = 800;

/// Round precondition violations — synchronous and non-retryable
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("side {0} cannot choose now")]
    InvalidTurn(Side),

    #[error("round is already resolving")]
    AlreadyResolved,

    #[error("round is not complete")]
    NotComplete,
}

/// Deadlines for the two delayed reveal transitions
///
/// Tagged with the generation of the round it was scheduled for; a schedule
/// that outlives its round must not touch a newer one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduledReveal {
    pub generation: u64,
    pub reveal_at: u64,
    pub complete_at: u64,
}

/// Read-only round state for the presentation layer
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    /// Whichever side still has to choose, during the awaiting phases
    pub active_turn: Option<Side>,
    pub choice_a: Option<Choice>,
    pub choice_b: Option<Choice>,
    pub outcome: Option<Outcome>,
}

/// One round between two bound profiles
#[derive(Clone, Debug)]
pub struct MatchEngine {
    profile_a: ProfileId,
    profile_b: ProfileId,
    mode: GameMode,
    generation: u64,
    phase: RoundPhase,
    choice_a: Option<Choice>,
    choice_b: Option<Choice>,
    outcome: Option<Outcome>,
}

impl MatchEngine {
    /// Start a round. Both profiles must already be bound — the engine
    /// cannot exist without a completed selection.
    pub fn new(profile_a: ProfileId, profile_b: ProfileId, mode: GameMode, generation: u64) -> Self {
        Self {
            profile_a,
            profile_b,
            mode,
            generation,
            phase: RoundPhase::AwaitingChoiceA,
            choice_a: None,
            choice_b: None,
            outcome: None,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The two bound profile ids, (A, B)
    pub fn profiles(&self) -> (ProfileId, ProfileId) {
        (self.profile_a, self.profile_b)
    }

    /// Whichever side still has to choose
    pub fn turn(&self) -> Option<Side> {
        match self.phase {
            RoundPhase::AwaitingChoiceA => Some(Side::A),
            RoundPhase::AwaitingChoiceB => Some(Side::B),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            active_turn: self.turn(),
            choice_a: self.choice_a,
            choice_b: self.choice_b,
            outcome: self.outcome,
        }
    }

    /// Register a choice for one side
    ///
    /// Returns the reveal schedule once both choices are in; the caller is
    /// responsible for feeding its deadlines back through `apply_reveal` and
    /// `apply_complete`. In automated mode Side B's choice is drawn here and
    /// `AwaitingChoiceB` is skipped entirely.
    pub fn submit_choice(
        &mut self,
        choice: Choice,
        side: Side,
        rng: &mut SeededRng,
        now_ms: u64,
    ) -> Result<Option<ScheduledReveal>, RoundError> {
        match self.phase {
            RoundPhase::AwaitingChoiceA => {
                if side != Side::A {
                    return Err(RoundError::InvalidTurn(side));
                }
                self.choice_a = Some(choice);

                match self.mode {
                    GameMode::Sequential => {
                        self.phase = RoundPhase::AwaitingChoiceB;
                        tracing::debug!(%side, "choice stored, awaiting opponent");
                        Ok(None)
                    }
                    GameMode::Automated => {
                        let cpu = Choice::ALL[rng.pick_index(Choice::ALL.len())];
                        self.choice_b = Some(cpu);
                        Ok(Some(self.start_resolving(now_ms)))
                    }
                }
            }
            RoundPhase::AwaitingChoiceB => {
                if side != Side::B {
                    return Err(RoundError::InvalidTurn(side));
                }
                self.choice_b = Some(choice);
                Ok(Some(self.start_resolving(now_ms)))
            }
            RoundPhase::Resolving | RoundPhase::Revealed | RoundPhase::Complete => {
                Err(RoundError::AlreadyResolved)
            }
        }
    }

    fn start_resolving(&mut self, now_ms: u64) -> ScheduledReveal {
        self.phase = RoundPhase::Resolving;
        let schedule = ScheduledReveal {
            generation: self.generation,
            reveal_at: now_ms + CLASH_DELAY_MS,
            complete_at: now_ms + CLASH_DELAY_MS + REVEAL_DELAY_MS,
        };
        tracing::debug!(
            generation = self.generation,
            reveal_at = schedule.reveal_at,
            complete_at = schedule.complete_at,
            "resolving, reveal scheduled"
        );
        schedule
    }

    /// Delayed transition: make both choices visible
    ///
    /// Infallible and stale-suppressing — a generation mismatch or an
    /// already-advanced phase is a silent no-op.
    pub fn apply_reveal(&mut self, generation: u64) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "stale reveal suppressed");
            return;
        }
        if self.phase != RoundPhase::Resolving {
            return;
        }
        self.phase = RoundPhase::Revealed;
    }

    /// Delayed transition: compute and announce the outcome
    ///
    /// Same suppression rules as `apply_reveal`.
    pub fn apply_complete(&mut self, generation: u64) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "stale completion suppressed");
            return;
        }
        if self.phase != RoundPhase::Revealed {
            return;
        }

        let (Some(a), Some(b)) = (self.choice_a, self.choice_b) else {
            debug_assert!(false, "revealed round without both choices");
            return;
        };
        self.outcome = Some(resolve(a, b));
        self.phase = RoundPhase::Complete;
        tracing::debug!(outcome = ?self.outcome, "round complete");
    }

    /// Play another round with the same profiles
    ///
    /// Only valid once the current round is complete. The new round gets a
    /// fresh generation so any schedule still in flight stays dead.
    pub fn rematch(&mut self, generation: u64) -> Result<(), RoundError> {
        if self.phase != RoundPhase::Complete {
            return Err(RoundError::NotComplete);
        }
        self.generation = generation;
        self.phase = RoundPhase::AwaitingChoiceA;
        self.choice_a = None;
        self.choice_b = None;
        self.outcome = None;
        Ok(())
    }
}
