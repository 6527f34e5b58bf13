//! Breeding data for species that grow up and get pregnant.
//!
//! Caribou and walruses carry a companion breeding row keyed by the animal id.
//! Age stages are per family and never mixed: caribou data attached to a walrus
//! is ignored by the renderer.

use serde::{Deserialize, Serialize};

use crate::snapshot::species::AnimalSpecies;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaribouAgeStage {
    Calf,
    Juvenile,
    Adult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalrusAgeStage {
    Pup,
    Juvenile,
    Adult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeStage {
    Caribou(CaribouAgeStage),
    Walrus(WalrusAgeStage),
}

impl AgeStage {
    /// Whether this stage belongs to the given species' family.
    pub fn matches_species(&self, species: AnimalSpecies) -> bool {
        matches!(
            (self, species),
            (AgeStage::Caribou(_), AnimalSpecies::Caribou)
                | (AgeStage::Walrus(_), AnimalSpecies::ArcticWalrus)
        )
    }

    pub fn is_adult(&self) -> bool {
        matches!(
            self,
            AgeStage::Caribou(CaribouAgeStage::Adult) | AgeStage::Walrus(WalrusAgeStage::Adult)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingData {
    pub age_stage: AgeStage,
    #[serde(default)]
    pub is_pregnant: bool,
}

impl BreedingData {
    pub fn new(age_stage: AgeStage, is_pregnant: bool) -> Self {
        Self {
            age_stage,
            is_pregnant,
        }
    }
}
