//! Profile selection: two participant slots, claimed in turn order
//!
//! Sequential mode alternates claims between two human sides with mutual
//! exclusion on the profile id. Automated mode resolves the whole selection
//! on Side A's claim by drawing the opponent from the full catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, ProfileId};
use crate::random::SeededRng;

/// One of the two match participants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The opposing side
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// How Side B is driven
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Both sides are human, claiming and choosing in turn order
    Sequential,
    /// Side B's profile and choices are drawn by the engine
    Automated,
}

/// Display-name defaults applied to blank input at finalize time
pub const DEFAULT_NAME_A: &str = "Jugador 1";
pub const DEFAULT_NAME_B: &str = "Jugador 2";
pub const DEFAULT_NAME_CPU: &str = "CPU";

/// One participant's display name and claimed profile
#[derive(Clone, Debug, Default, Serialize)]
pub struct ParticipantSlot {
    pub display_name: String,
    pub profile: Option<ProfileId>,
}

/// Claim failures — all caller-correctable, nothing is queued or retried
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("profile {0} is already claimed by the other side")]
    ProfileAlreadyClaimed(ProfileId),

    #[error("side {0} cannot claim now")]
    InvalidTurn(Side),

    #[error("profile {0} is not in the catalog")]
    UnknownProfile(ProfileId),
}

/// Turn-ordered claiming of the two participant slots
#[derive(Clone, Debug)]
pub struct SelectionState {
    mode: GameMode,
    slot_a: ParticipantSlot,
    slot_b: ParticipantSlot,
    active_turn: Side,
    names_finalized: bool,
}

impl SelectionState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            slot_a: ParticipantSlot::default(),
            slot_b: ParticipantSlot::default(),
            active_turn: Side::A,
            names_finalized: false,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn slot(&self, side: Side) -> &ParticipantSlot {
        match side {
            Side::A => &self.slot_a,
            Side::B => &self.slot_b,
        }
    }

    /// Whichever side still has to claim, `None` once selection is complete
    pub fn active_turn(&self) -> Option<Side> {
        if self.is_complete() {
            None
        } else {
            Some(self.active_turn)
        }
    }

    /// True iff both slots are bound
    pub fn is_complete(&self) -> bool {
        self.slot_a.profile.is_some() && self.slot_b.profile.is_some()
    }

    /// Both bound profile ids, once selection is complete
    pub fn bound_profiles(&self) -> Option<(ProfileId, ProfileId)> {
        Some((self.slot_a.profile?, self.slot_b.profile?))
    }

    /// Apply trim-and-default logic to both display names
    ///
    /// Idempotent; must run before the claim phase. Blank input becomes the
    /// side-specific default, with the automated Side B named after the CPU.
    pub fn finalize_names(&mut self, name_a: &str, name_b: &str) {
        let default_b = match self.mode {
            GameMode::Sequential => DEFAULT_NAME_B,
            GameMode::Automated => DEFAULT_NAME_CPU,
        };

        self.slot_a.display_name = finalize_name(name_a, DEFAULT_NAME_A);
        self.slot_b.display_name = finalize_name(name_b, default_b);
        self.names_finalized = true;
    }

    /// Claim a profile for one side
    ///
    /// Sequential mode enforces turn order and exclusivity against the other
    /// slot. Automated mode accepts only Side A and resolves Side B in the
    /// same operation with a uniform draw over the full catalog — the draw
    /// deliberately skips the exclusivity check, so a mirror match is
    /// possible.
    pub fn claim(
        &mut self,
        catalog: &Catalog,
        profile_id: ProfileId,
        side: Side,
        rng: &mut SeededRng,
    ) -> Result<(), SelectionError> {
        debug_assert!(self.names_finalized, "finalize_names must run before claiming");

        if !catalog.contains(profile_id) {
            return Err(SelectionError::UnknownProfile(profile_id));
        }

        match self.mode {
            GameMode::Sequential => self.claim_sequential(profile_id, side),
            GameMode::Automated => self.claim_automated(catalog, profile_id, side, rng),
        }
    }

    fn claim_sequential(&mut self, profile_id: ProfileId, side: Side) -> Result<(), SelectionError> {
        if self.is_complete() || side != self.active_turn {
            return Err(SelectionError::InvalidTurn(side));
        }

        let other = self.slot(side.other());
        if other.profile == Some(profile_id) {
            return Err(SelectionError::ProfileAlreadyClaimed(profile_id));
        }

        // Overwrites any pending claim in the side's own slot
        self.slot_mut(side).profile = Some(profile_id);
        tracing::debug!(profile_id, %side, "profile claimed");

        if self.slot(side.other()).profile.is_none() {
            self.active_turn = side.other();
        }
        Ok(())
    }

    fn claim_automated(
        &mut self,
        catalog: &Catalog,
        profile_id: ProfileId,
        side: Side,
        rng: &mut SeededRng,
    ) -> Result<(), SelectionError> {
        if side == Side::B || self.is_complete() {
            return Err(SelectionError::InvalidTurn(side));
        }

        self.slot_a.profile = Some(profile_id);
        let opponent = catalog.random(rng);
        self.slot_b.profile = Some(opponent.id);
        tracing::debug!(profile_id, opponent = opponent.id, "profiles claimed, opponent drawn");
        Ok(())
    }

    fn slot_mut(&mut self, side: Side) -> &mut ParticipantSlot {
        match side {
            Side::A => &mut self.slot_a,
            Side::B => &mut self.slot_b,
        }
    }

    /// Clear both slots and restore the turn to Side A
    ///
    /// Display names survive — this is "change profiles", not a new session.
    pub fn reset(&mut self) {
        self.slot_a.profile = None;
        self.slot_b.profile = None;
        self.active_turn = Side::A;
    }
}

fn finalize_name(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Profile;

    fn catalog(ids: &[ProfileId]) -> Catalog {
        let profiles = ids
            .iter()
            .map(|&id| Profile {
                id,
                name: format!("mon-{id}"),
                category_tags: vec!["normal".to_string()],
                sprite_refs: Vec::new(),
            })
            .collect();
        Catalog::new(profiles).unwrap()
    }

    fn sequential(ids: &[ProfileId]) -> (SelectionState, Catalog, SeededRng) {
        let mut state = SelectionState::new(GameMode::Sequential);
        state.finalize_names("", "");
        (state, catalog(ids), SeededRng::new(42))
    }

    fn automated(ids: &[ProfileId]) -> (SelectionState, Catalog, SeededRng) {
        let mut state = SelectionState::new(GameMode::Automated);
        state.finalize_names("", "");
        (state, catalog(ids), SeededRng::new(42))
    }

    #[test]
    fn test_sequential_turn_order() {
        let (mut state, catalog, mut rng) = sequential(&[25, 6]);

        assert_eq!(state.active_turn(), Some(Side::A));
        state.claim(&catalog, 25, Side::A, &mut rng).unwrap();

        assert_eq!(state.active_turn(), Some(Side::B));
        assert!(!state.is_complete());

        state.claim(&catalog, 6, Side::B, &mut rng).unwrap();
        assert!(state.is_complete());
        assert_eq!(state.active_turn(), None);
        assert_eq!(state.bound_profiles(), Some((25, 6)));
    }

    #[test]
    fn test_sequential_wrong_side_rejected() {
        let (mut state, catalog, mut rng) = sequential(&[25, 6]);

        assert_eq!(
            state.claim(&catalog, 6, Side::B, &mut rng),
            Err(SelectionError::InvalidTurn(Side::B))
        );

        // A's turn is unaffected by the failed claim
        state.claim(&catalog, 25, Side::A, &mut rng).unwrap();
        assert_eq!(state.active_turn(), Some(Side::B));
    }

    #[test]
    fn test_exclusivity() {
        // Scenario: claim(4, A); claim(4, B) fails; claim(7, B) succeeds
        let (mut state, catalog, mut rng) = sequential(&[4, 7]);

        state.claim(&catalog, 4, Side::A, &mut rng).unwrap();
        assert_eq!(
            state.claim(&catalog, 4, Side::B, &mut rng),
            Err(SelectionError::ProfileAlreadyClaimed(4))
        );

        state.claim(&catalog, 7, Side::B, &mut rng).unwrap();
        assert!(state.is_complete());
    }

    #[test]
    fn test_unknown_profile_rejected() {
        let (mut state, catalog, mut rng) = sequential(&[1, 2]);

        assert_eq!(
            state.claim(&catalog, 151, Side::A, &mut rng),
            Err(SelectionError::UnknownProfile(151))
        );
    }

    #[test]
    fn test_claim_after_complete_rejected() {
        let (mut state, catalog, mut rng) = sequential(&[1, 2, 3]);

        state.claim(&catalog, 1, Side::A, &mut rng).unwrap();
        state.claim(&catalog, 2, Side::B, &mut rng).unwrap();

        assert_eq!(
            state.claim(&catalog, 3, Side::A, &mut rng),
            Err(SelectionError::InvalidTurn(Side::A))
        );
    }

    #[test]
    fn test_automated_claim_resolves_both_sides() {
        let (mut state, catalog, mut rng) = automated(&[1, 2, 3, 4, 5]);

        state.claim(&catalog, 1, Side::A, &mut rng).unwrap();

        // No intermediate turn state is observable
        assert!(state.is_complete());
        assert_eq!(state.active_turn(), None);

        let (a, b) = state.bound_profiles().unwrap();
        assert_eq!(a, 1);
        assert!(catalog.contains(b));
    }

    #[test]
    fn test_automated_side_b_never_claims() {
        let (mut state, catalog, mut rng) = automated(&[1, 2]);

        assert_eq!(
            state.claim(&catalog, 2, Side::B, &mut rng),
            Err(SelectionError::InvalidTurn(Side::B))
        );
    }

    #[test]
    fn test_automated_draw_bypasses_exclusivity() {
        // With a single profile the opponent draw must mirror it
        let (mut state, catalog, mut rng) = automated(&[9]);

        state.claim(&catalog, 9, Side::A, &mut rng).unwrap();
        assert_eq!(state.bound_profiles(), Some((9, 9)));
    }

    #[test]
    fn test_sequential_single_profile_blocks_side_b() {
        let (mut state, catalog, mut rng) = sequential(&[9]);

        state.claim(&catalog, 9, Side::A, &mut rng).unwrap();
        assert_eq!(
            state.claim(&catalog, 9, Side::B, &mut rng),
            Err(SelectionError::ProfileAlreadyClaimed(9))
        );
    }

    #[test]
    fn test_finalize_names_defaults() {
        let mut state = SelectionState::new(GameMode::Sequential);
        state.finalize_names("", "   ");

        assert_eq!(state.slot(Side::A).display_name, DEFAULT_NAME_A);
        assert_eq!(state.slot(Side::B).display_name, DEFAULT_NAME_B);
    }

    #[test]
    fn test_finalize_names_cpu_default() {
        let mut state = SelectionState::new(GameMode::Automated);
        state.finalize_names("Ash", "");

        assert_eq!(state.slot(Side::A).display_name, "Ash");
        assert_eq!(state.slot(Side::B).display_name, DEFAULT_NAME_CPU);
    }

    #[test]
    fn test_finalize_names_trims() {
        let mut state = SelectionState::new(GameMode::Sequential);
        state.finalize_names("  Ash  ", "\tMisty\n");

        assert_eq!(state.slot(Side::A).display_name, "Ash");
        assert_eq!(state.slot(Side::B).display_name, "Misty");
    }

    #[test]
    fn test_finalize_names_idempotent() {
        let mut state = SelectionState::new(GameMode::Sequential);

        state.finalize_names("", "");
        let first = (
            state.slot(Side::A).display_name.clone(),
            state.slot(Side::B).display_name.clone(),
        );

        state.finalize_names("", "");
        assert_eq!(state.slot(Side::A).display_name, first.0);
        assert_eq!(state.slot(Side::B).display_name, first.1);
    }

    #[test]
    fn test_reset_clears_slots_keeps_names() {
        let (mut state, catalog, mut rng) = sequential(&[4, 7]);

        state.claim(&catalog, 4, Side::A, &mut rng).unwrap();
        state.claim(&catalog, 7, Side::B, &mut rng).unwrap();
        state.reset();

        assert!(!state.is_complete());
        assert_eq!(state.active_turn(), Some(Side::A));
        assert_eq!(state.slot(Side::A).profile, None);
        assert_eq!(state.slot(Side::B).profile, None);
        assert_eq!(state.slot(Side::A).display_name, DEFAULT_NAME_A);

        // Previously claimed ids are claimable again, by either side
        state.claim(&catalog, 7, Side::A, &mut rng).unwrap();
        state.claim(&catalog, 4, Side::B, &mut rng).unwrap();
        assert_eq!(state.bound_profiles(), Some((7, 4)));
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other(), Side::A);
    }
}
