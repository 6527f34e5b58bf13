//! Age scaling and pregnancy indicator lookup.
//!
//! Breeding rows are read-only inputs keyed by animal id. A row whose age
//! stage belongs to another species family is treated as absent.

use rustc_hash::FxHashMap;

use crate::snapshot::{AgeStage, AnimalSpecies, BreedingData, CaribouAgeStage, WalrusAgeStage};

pub fn age_multiplier(stage: AgeStage) -> f32 {
    match stage {
        AgeStage::Caribou(CaribouAgeStage::Calf) | AgeStage::Walrus(WalrusAgeStage::Pup) => 0.5,
        AgeStage::Caribou(CaribouAgeStage::Juvenile)
        | AgeStage::Walrus(WalrusAgeStage::Juvenile) => 0.75,
        AgeStage::Caribou(CaribouAgeStage::Adult) | AgeStage::Walrus(WalrusAgeStage::Adult) => 1.0,
    }
}

/// Breeding row for an animal, if it exists and fits the species.
pub fn breeding_for(
    breeding: Option<&FxHashMap<u64, BreedingData>>,
    id: u64,
    species: AnimalSpecies,
) -> Option<BreedingData> {
    breeding?
        .get(&id)
        .copied()
        .filter(|data| data.age_stage.matches_species(species))
}

/// Multiplier applied to the species' base render size.
pub fn size_multiplier(data: Option<BreedingData>) -> f32 {
    data.map_or(1.0, |d| age_multiplier(d.age_stage))
}

pub fn shows_pregnancy(data: Option<BreedingData>) -> bool {
    data.is_some_and(|d| d.is_pregnant)
}
