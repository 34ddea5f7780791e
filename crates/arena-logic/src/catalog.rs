//! Creature catalog consumed by the selection flow
//!
//! The catalog is loaded once by the host (the remote fetch lives outside
//! this crate) and handed in as a finite ordered list. Validation happens
//! here at the boundary so every later lookup can trust the ids.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::random::SeededRng;

/// Stable catalog key for a creature profile
pub type ProfileId = u32;

/// Immutable creature profile record
///
/// The core only ever reads `id` and `name`; tags and sprite handles are
/// carried through untouched for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    /// Type labels in catalog order, first entry is the primary type
    pub category_tags: Vec<String>,
    /// Opaque display handles (sprite URLs), never interpreted here
    #[serde(default)]
    pub sprite_refs: Vec<String>,
}

impl Profile {
    /// The primary type label, if the profile has any tags
    pub fn primary_tag(&self) -> Option<&str> {
        self.category_tags.first().map(String::as_str)
    }
}

/// Catalog construction errors
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog is empty")]
    Empty,

    #[error("profile id 0 is not a valid catalog key")]
    InvalidId,

    #[error("duplicate profile id {0}")]
    DuplicateId(ProfileId),
}

/// Finite, ordered, immutable list of profiles with unique positive ids
#[derive(Clone, Debug)]
pub struct Catalog {
    profiles: Vec<Profile>,
}

impl Catalog {
    /// Validate and take ownership of a loaded profile list
    pub fn new(profiles: Vec<Profile>) -> Result<Self, CatalogError> {
        if profiles.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = std::collections::HashSet::with_capacity(profiles.len());
        for profile in &profiles {
            if profile.id == 0 {
                return Err(CatalogError::InvalidId);
            }
            if !seen.insert(profile.id) {
                return Err(CatalogError::DuplicateId(profile.id));
            }
        }

        Ok(Self { profiles })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Look up a profile by id
    pub fn get(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProfileId) -> bool {
        self.get(id).is_some()
    }

    /// Profiles in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    /// Draw a profile uniformly from the full catalog
    pub fn random(&self, rng: &mut SeededRng) -> &Profile {
        &self.profiles[rng.pick_index(self.profiles.len())]
    }
}
