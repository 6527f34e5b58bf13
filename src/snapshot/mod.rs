//! Authoritative data delivered by the backend.
//!
//! These types mirror the rows of the server's `wild_animal` table and the
//! optional breeding tables as the client subscription delivers them. The
//! renderer only ever reads them.
//!
//! Submodules overview:
//! - [`species`] – species tags and their static per-species tables
//! - [`animal`] – the wild animal row, its state tag, facing direction, timestamps
//! - [`breeding`] – age stage and pregnancy data for breeding species

pub mod animal;
pub mod breeding;
pub mod species;

pub use animal::{
    AnimalState, CardinalDirection, FacingDirection, ServerTimestamp, WildAnimalSnapshot,
    normalize_direction,
};
pub use breeding::{AgeStage, BreedingData, CaribouAgeStage, WalrusAgeStage};
pub use species::{ALL_SPECIES, AnimalSpecies, DEFAULT_SPECIES_INFO, SpeciesInfo};

use serde::Deserialize;

/// Wire shape of a sum-type tag.
///
/// The subscription SDK emits enum values either as a bare string or as an
/// object with a `tag` field; both are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum TagRepr {
    Bare(String),
    Tagged { tag: String },
}

impl TagRepr {
    pub(crate) fn into_tag(self) -> String {
        match self {
            TagRepr::Bare(tag) => tag,
            TagRepr::Tagged { tag } => tag,
        }
    }
}
