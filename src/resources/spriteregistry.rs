//! Sprite sheet registry.
//!
//! Maps `(species, flying)` to a texture key and the sheet's frame geometry,
//! and tracks which textures the host has finished loading. Image decoding is
//! the host's job: it calls [`SpriteRegistry::mark_loaded`] once a texture is
//! usable and the renderer falls back to a colored placeholder until then.
//!
//! Two geometry families exist and are kept apart because the sheets were
//! authored independently:
//! - [`SheetLayout::Fixed4`]: a 3×3 grid where only the four cross cells are
//!   used (up at the top middle, left/right on the middle row, down at the
//!   bottom middle). No walk cycle.
//! - [`SheetLayout::Animated`]: `columns × 4` frames, one row per direction in
//!   the order down, right, left, up.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::warn;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::snapshot::AnimalSpecies;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLayout {
    Fixed4,
    Animated {
        columns: u32,
        frame_width: u32,
        frame_height: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    pub texture: Arc<str>,
    pub layout: SheetLayout,
}

impl SpriteSheet {
    pub fn fixed(texture: &str) -> Self {
        Self {
            texture: Arc::from(texture),
            layout: SheetLayout::Fixed4,
        }
    }

    pub fn animated(texture: &str, columns: u32, frame_width: u32, frame_height: u32) -> Self {
        Self {
            texture: Arc::from(texture),
            layout: SheetLayout::Animated {
                columns,
                frame_width,
                frame_height,
            },
        }
    }
}

/// Pixel size of a loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
}

/// A sheet whose texture is loaded and can be sliced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadySheet {
    pub texture: Arc<str>,
    pub layout: SheetLayout,
    pub size: TextureInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SheetStatus {
    Ready(ReadySheet),
    /// Mapped, but the host has not finished loading the texture.
    Pending(Arc<str>),
    /// No sheet registered for this species.
    Unmapped,
}

#[derive(Resource, Debug, Default)]
pub struct SpriteRegistry {
    sheets: FxHashMap<(AnimalSpecies, bool), SpriteSheet>,
    loaded: FxHashMap<Arc<str>, TextureInfo>,
    warned: FxHashSet<Arc<str>>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the game's sheet assignments and no textures loaded.
    pub fn with_default_sheets() -> Self {
        use AnimalSpecies::*;

        let mut registry = Self::new();
        // Walking sheets, 4 frames of 80×80 per direction.
        for (species, key) in [
            (TundraWolf, "tundra_wolf_walking.png"),
            (CinderFox, "cinder_fox_walking.png"),
            (Wolverine, "wolverine_walking.png"),
            (Caribou, "caribou_walking.png"),
            (ArcticWalrus, "arctic_walrus_walking.png"),
            (PolarBear, "polar_bear_walking.png"),
            (Tern, "tern_walking.png"),
            (Crow, "crow_walking.png"),
            (SnowyOwl, "snowy_owl_walking.png"),
        ] {
            registry.register(species, false, SpriteSheet::animated(key, 4, 80, 80));
        }
        // Small critters, 6 frames of 48×48.
        for (species, key) in [
            (Hare, "hare_walking.png"),
            (Vole, "vole_walking.png"),
            (BeachCrab, "beach_crab_walking.png"),
        ] {
            registry.register(species, false, SpriteSheet::animated(key, 6, 48, 48));
        }
        // Flight sheets for birds.
        for (species, key) in [
            (Tern, "tern_flying.png"),
            (Crow, "crow_flying.png"),
            (SnowyOwl, "snowy_owl_flying.png"),
        ] {
            registry.register(species, true, SpriteSheet::animated(key, 6, 48, 48));
        }
        // Legacy single-frame directional sheets.
        for (species, key) in [
            (CableViper, "cable_viper.png"),
            (SalmonShark, "salmon_shark.png"),
            (Jellyfish, "jellyfish.png"),
            (Shorebound, "shorebound.png"),
            (Shardkin, "shardkin.png"),
            (DrownedWatch, "drowned_watch.png"),
            (Bee, "bee.png"),
        ] {
            registry.register(species, false, SpriteSheet::fixed(key));
        }
        registry
    }

    pub fn register(&mut self, species: AnimalSpecies, flying: bool, sheet: SpriteSheet) {
        self.sheets.insert((species, flying), sheet);
    }

    pub fn sheet(&self, species: AnimalSpecies, flying: bool) -> Option<&SpriteSheet> {
        self.sheets.get(&(species, flying))
    }

    pub fn mark_loaded(&mut self, texture: &str, width: u32, height: u32) {
        let key: Arc<str> = Arc::from(texture);
        self.warned.remove(&key);
        self.loaded.insert(key, TextureInfo { width, height });
    }

    pub fn mark_unloaded(&mut self, texture: &str) {
        self.loaded.remove(texture);
    }

    pub fn is_ready(&self, texture: &str) -> bool {
        self.loaded.contains_key(texture)
    }

    /// Sheet lookup for an animal. Non-birds ignore `flying`; a bird with no
    /// flight sheet falls back to its ground sheet.
    pub fn resolve(&self, species: AnimalSpecies, flying: bool) -> SheetStatus {
        let flying = flying && species.is_bird();
        let sheet = self
            .sheet(species, flying)
            .or_else(|| if flying { self.sheet(species, false) } else { None });
        let Some(sheet) = sheet else {
            return SheetStatus::Unmapped;
        };
        match self.loaded.get(&sheet.texture) {
            Some(size) if size.width > 0 && size.height > 0 => SheetStatus::Ready(ReadySheet {
                texture: sheet.texture.clone(),
                layout: sheet.layout,
                size: *size,
            }),
            _ => SheetStatus::Pending(sheet.texture.clone()),
        }
    }

    /// Log a missing texture once. Returns `true` the first time.
    pub fn warn_missing_once(&mut self, texture: &Arc<str>) -> bool {
        if self.warned.insert(texture.clone()) {
            warn!("Sprite texture '{}' not ready, drawing placeholder", texture);
            true
        } else {
            false
        }
    }
}
