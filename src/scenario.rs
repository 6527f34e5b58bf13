//! Scripted snapshot streams for the headless demo.
//!
//! A scenario is a JSON document listing timed batches of wild animal
//! snapshots, as the backend subscription would deliver them, plus the
//! textures the host would have finished loading and optional breeding rows.
//!
//! ```json
//! {
//!   "textures": [{ "key": "tundra_wolf_walking.png", "width": 320, "height": 320 }],
//!   "breeding": [{ "id": 4, "ageStage": { "Caribou": "Calf" }, "isPregnant": false }],
//!   "batches": [
//!     { "atMs": 0, "serverTime": 1700000000000000, "animals": [ ... ] }
//!   ]
//! }
//! ```

use std::path::Path;

use fastrand::Rng;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WildlifeError};
use crate::resources::spriteregistry::{SheetLayout, SpriteRegistry};
use crate::snapshot::{
    ALL_SPECIES, AgeStage, AnimalSpecies, AnimalState, BreedingData, CaribouAgeStage, FacingDirection,
    ServerTimestamp, WildAnimalSnapshot,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedTexture {
    pub key: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedingEntry {
    pub id: u64,
    #[serde(flatten)]
    pub data: BreedingData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotBatch {
    /// Client clock at which the batch arrives.
    pub at_ms: f64,
    /// Server clock at delivery, used for thought bubble expiry.
    #[serde(default)]
    pub server_time: Option<ServerTimestamp>,
    pub animals: Vec<WildAnimalSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub textures: Vec<LoadedTexture>,
    #[serde(default)]
    pub breeding: Vec<BreedingEntry>,
    pub batches: Vec<SnapshotBatch>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| WildlifeError::ScenarioIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut scenario: Scenario =
            serde_json::from_str(&text).map_err(|source| WildlifeError::ScenarioParse {
                path: path.to_path_buf(),
                source,
            })?;
        scenario
            .batches
            .sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        info!(
            "Loaded scenario {:?}: {} batches, {} textures",
            path,
            scenario.batches.len(),
            scenario.textures.len()
        );
        Ok(scenario)
    }

    pub fn breeding_map(&self) -> FxHashMap<u64, BreedingData> {
        self.breeding.iter().map(|e| (e.id, e.data)).collect()
    }

    /// Index of the latest batch delivered at or before `now_ms`.
    pub fn batch_index_at(&self, now_ms: f64) -> Option<usize> {
        self.batches
            .iter()
            .rposition(|batch| batch.at_ms <= now_ms)
    }

    pub fn mark_textures_loaded(&self, registry: &mut SpriteRegistry) {
        for texture in &self.textures {
            registry.mark_loaded(&texture.key, texture.width, texture.height);
        }
    }

    /// A herd of every species walking in circles, one server tick per batch.
    ///
    /// Scripted events: animal 0 is hit at 1 s, animal 1 burrows at 2 s and
    /// resurfaces at 4 s, animal 2 teleports at 3 s, and the last animal
    /// leaves the view at 5 s.
    pub fn synthetic_herd(count: usize, duration_ms: f64, tick_ms: f64, seed: u64) -> Self {
        let mut rng = Rng::with_seed(seed);
        let base_server_us: i64 = 1_700_000_000_000_000;
        let herd: Vec<(f32, f32, f32, f32)> = (0..count)
            .map(|_| {
                (
                    rng.f32() * 1600.0,
                    rng.f32() * 1200.0,
                    40.0 + rng.f32() * 120.0,
                    0.2 + rng.f32() * 0.8,
                )
            })
            .collect();

        let mut batches = Vec::new();
        let mut at_ms = 0.0;
        while at_ms <= duration_ms {
            let seconds = (at_ms / 1000.0) as f32;
            let server_time = ServerTimestamp(base_server_us + (at_ms * 1000.0) as i64);
            let animals = herd
                .iter()
                .enumerate()
                .filter(|(i, _)| !(*i + 1 == count && count > 1 && at_ms >= 5000.0))
                .map(|(i, &(cx, cy, radius, omega))| {
                    let species = ALL_SPECIES[i % ALL_SPECIES.len()];
                    let angle = seconds * omega;
                    let mut x = cx + radius * angle.cos();
                    let y = cy + radius * angle.sin();
                    if i == 2 && at_ms >= 3000.0 {
                        x += 900.0;
                    }
                    let mut animal = WildAnimalSnapshot::new(i as u64, species, x, y);
                    animal.facing_direction = facing_for(-angle.sin(), angle.cos());
                    animal.is_flying = species.is_bird() && i % 2 == 0;
                    if i == 0 && at_ms >= 1000.0 {
                        animal.last_hit_time = Some(ServerTimestamp(base_server_us + 1_000_000));
                        animal.health = 60.0;
                    }
                    if i == 1 && (2000.0..4000.0).contains(&at_ms) {
                        animal.state = AnimalState::Burrowed;
                        animal.state_change_time = ServerTimestamp(base_server_us + 2_000_000);
                    }
                    if i == 3 {
                        animal.heart_effect_until = Some(ServerTimestamp(base_server_us + 3_000_000));
                    }
                    animal
                })
                .collect();
            batches.push(SnapshotBatch {
                at_ms,
                server_time: Some(server_time),
                animals,
            });
            at_ms += tick_ms;
        }

        let breeding = (0..count as u64)
            .filter(|id| ALL_SPECIES[*id as usize % ALL_SPECIES.len()] == AnimalSpecies::Caribou)
            .map(|id| BreedingEntry {
                id,
                data: BreedingData::new(AgeStage::Caribou(CaribouAgeStage::Calf), id % 2 == 0),
            })
            .collect();

        Scenario {
            textures: Vec::new(),
            breeding,
            batches,
        }
    }

    /// Declare every registered sheet loaded at its natural size, except
    /// `skip`, which keeps drawing as a placeholder.
    pub fn load_default_textures(registry: &SpriteRegistry, skip: &[&str]) -> Vec<LoadedTexture> {
        let mut textures = Vec::new();
        for species in ALL_SPECIES {
            for flying in [false, true] {
                let Some(sheet) = registry.sheet(species, flying) else {
                    continue;
                };
                let key: &str = &sheet.texture;
                if skip.contains(&key) || textures.iter().any(|t: &LoadedTexture| t.key == key) {
                    continue;
                }
                let (width, height) = match sheet.layout {
                    SheetLayout::Fixed4 => (300, 300),
                    SheetLayout::Animated {
                        columns,
                        frame_width,
                        frame_height,
                    } => (columns * frame_width, 4 * frame_height),
                };
                textures.push(LoadedTexture {
                    key: key.to_string(),
                    width,
                    height,
                });
            }
        }
        textures
    }
}

fn facing_for(dx: f32, dy: f32) -> FacingDirection {
    if dx.abs() > dy.abs() {
        if dx < 0.0 {
            FacingDirection::Left
        } else {
            FacingDirection::Right
        }
    } else if dy < 0.0 {
        FacingDirection::Up
    } else {
        FacingDirection::Down
    }
}
