//! Species tags and their static render/collision tables.

use serde::{Deserialize, Serialize};

use crate::snapshot::TagRepr;
use crate::surface::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TagRepr")]
pub enum AnimalSpecies {
    CinderFox,
    TundraWolf,
    CableViper,
    ArcticWalrus,
    BeachCrab,
    Tern,
    Crow,
    Vole,
    Wolverine,
    Caribou,
    SalmonShark,
    Shorebound,
    Shardkin,
    DrownedWatch,
    Bee,
    Hare,
    PolarBear,
    SnowyOwl,
    Jellyfish,
    /// Any tag this client build does not know yet.
    Unknown,
}

/// Static per-species data used for drawing and hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesInfo {
    /// Base on-screen size in pixels before age scaling.
    pub render_width: f32,
    pub render_height: f32,
    /// Collision box size, centered on the authoritative position.
    pub collision_width: f32,
    pub collision_height: f32,
    /// Placeholder color used while the sprite sheet is not ready.
    pub fallback_color: Color,
    /// Placeholder glyph drawn on top of the fallback circle.
    pub glyph: char,
}

const fn info(
    render: (f32, f32),
    collision: (f32, f32),
    fallback_color: Color,
    glyph: char,
) -> SpeciesInfo {
    SpeciesInfo {
        render_width: render.0,
        render_height: render.1,
        collision_width: collision.0,
        collision_height: collision.1,
        fallback_color,
        glyph,
    }
}

pub const DEFAULT_SPECIES_INFO: SpeciesInfo =
    info((96.0, 96.0), (48.0, 48.0), Color::new(128, 0, 128, 255), '?');

pub const ALL_SPECIES: [AnimalSpecies; 19] = [
    AnimalSpecies::CinderFox,
    AnimalSpecies::TundraWolf,
    AnimalSpecies::CableViper,
    AnimalSpecies::ArcticWalrus,
    AnimalSpecies::BeachCrab,
    AnimalSpecies::Tern,
    AnimalSpecies::Crow,
    AnimalSpecies::Vole,
    AnimalSpecies::Wolverine,
    AnimalSpecies::Caribou,
    AnimalSpecies::SalmonShark,
    AnimalSpecies::Shorebound,
    AnimalSpecies::Shardkin,
    AnimalSpecies::DrownedWatch,
    AnimalSpecies::Bee,
    AnimalSpecies::Hare,
    AnimalSpecies::PolarBear,
    AnimalSpecies::SnowyOwl,
    AnimalSpecies::Jellyfish,
];

impl AnimalSpecies {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "CinderFox" => Self::CinderFox,
            "TundraWolf" => Self::TundraWolf,
            "CableViper" => Self::CableViper,
            "ArcticWalrus" => Self::ArcticWalrus,
            "BeachCrab" => Self::BeachCrab,
            "Tern" => Self::Tern,
            "Crow" => Self::Crow,
            "Vole" => Self::Vole,
            "Wolverine" => Self::Wolverine,
            "Caribou" => Self::Caribou,
            "SalmonShark" => Self::SalmonShark,
            "Shorebound" => Self::Shorebound,
            "Shardkin" => Self::Shardkin,
            "DrownedWatch" => Self::DrownedWatch,
            "Bee" => Self::Bee,
            "Hare" => Self::Hare,
            "PolarBear" => Self::PolarBear,
            "SnowyOwl" => Self::SnowyOwl,
            "Jellyfish" => Self::Jellyfish,
            _ => Self::Unknown,
        }
    }

    pub fn info(&self) -> SpeciesInfo {
        match self {
            Self::CinderFox => info((96.0, 96.0), (48.0, 40.0), Color::new(255, 100, 50, 255), 'F'),
            Self::TundraWolf => info((128.0, 128.0), (64.0, 48.0), Color::new(120, 120, 140, 255), 'W'),
            Self::CableViper => info((96.0, 96.0), (56.0, 24.0), Color::new(60, 140, 60, 255), 'V'),
            Self::ArcticWalrus => info((160.0, 160.0), (96.0, 64.0), Color::new(140, 100, 80, 255), 'W'),
            Self::BeachCrab => info((64.0, 64.0), (40.0, 28.0), Color::new(220, 80, 60, 255), 'C'),
            Self::Tern => info((80.0, 80.0), (36.0, 30.0), Color::new(230, 230, 230, 255), 'T'),
            Self::Crow => info((80.0, 80.0), (36.0, 30.0), Color::new(30, 30, 40, 255), 'C'),
            Self::Vole => info((48.0, 48.0), (24.0, 18.0), Color::new(130, 100, 70, 255), 'V'),
            Self::Wolverine => info((112.0, 112.0), (60.0, 44.0), Color::new(80, 60, 40, 255), 'W'),
            Self::Caribou => info((160.0, 160.0), (80.0, 64.0), Color::new(160, 130, 90, 255), 'C'),
            Self::SalmonShark => info((160.0, 160.0), (110.0, 48.0), Color::new(90, 110, 130, 255), 'S'),
            Self::Shorebound => info((112.0, 112.0), (48.0, 48.0), Color::new(70, 90, 110, 255), 'S'),
            Self::Shardkin => info((72.0, 72.0), (36.0, 32.0), Color::new(120, 180, 200, 255), 'S'),
            Self::DrownedWatch => info((176.0, 176.0), (80.0, 80.0), Color::new(60, 80, 70, 255), 'D'),
            // Bees fly through players and have no collision box.
            Self::Bee => info((32.0, 32.0), (0.0, 0.0), Color::new(240, 200, 40, 255), 'B'),
            Self::Hare => info((64.0, 64.0), (32.0, 28.0), Color::new(190, 170, 140, 255), 'H'),
            Self::PolarBear => info((176.0, 176.0), (96.0, 72.0), Color::new(240, 240, 250, 255), 'P'),
            Self::SnowyOwl => info((96.0, 96.0), (40.0, 36.0), Color::new(250, 250, 250, 255), 'O'),
            Self::Jellyfish => info((80.0, 80.0), (40.0, 40.0), Color::new(200, 120, 220, 255), 'J'),
            Self::Unknown => DEFAULT_SPECIES_INFO,
        }
    }

    /// Birds switch between a ground and a flight sprite family.
    pub fn is_bird(&self) -> bool {
        matches!(self, Self::Tern | Self::Crow | Self::SnowyOwl)
    }

    pub fn is_aquatic(&self) -> bool {
        matches!(self, Self::SalmonShark | Self::Jellyfish)
    }

    /// Night-only hostile NPCs.
    pub fn is_hostile_npc(&self) -> bool {
        matches!(self, Self::Shorebound | Self::Shardkin | Self::DrownedWatch)
    }
}

impl From<TagRepr> for AnimalSpecies {
    fn from(repr: TagRepr) -> Self {
        AnimalSpecies::from_tag(&repr.into_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_uses_default_info() {
        let species = AnimalSpecies::from_tag("Dragon");
        assert_eq!(species, AnimalSpecies::Unknown);
        assert_eq!(species.info(), DEFAULT_SPECIES_INFO);
        assert_eq!(species.info().fallback_color, Color::new(128, 0, 128, 255));
    }

    #[test]
    fn test_every_known_species_round_trips_its_tag() {
        for species in ALL_SPECIES {
            let tag = format!("{:?}", species);
            assert_eq!(AnimalSpecies::from_tag(&tag), species);
        }
    }

    #[test]
    fn test_deserialize_bare_and_tagged() {
        let bare: AnimalSpecies = serde_json::from_str("\"TundraWolf\"").unwrap();
        let tagged: AnimalSpecies = serde_json::from_str("{\"tag\":\"Vole\"}").unwrap();
        let unknown: AnimalSpecies = serde_json::from_str("\"Griffin\"").unwrap();
        assert_eq!(bare, AnimalSpecies::TundraWolf);
        assert_eq!(tagged, AnimalSpecies::Vole);
        assert_eq!(unknown, AnimalSpecies::Unknown);
    }

    #[test]
    fn test_bee_has_no_collision_box() {
        let bee = AnimalSpecies::Bee.info();
        assert_eq!(bee.collision_width, 0.0);
        assert_eq!(bee.collision_height, 0.0);
    }

    #[test]
    fn test_family_flags() {
        assert!(AnimalSpecies::Crow.is_bird());
        assert!(!AnimalSpecies::Bee.is_bird());
        assert!(AnimalSpecies::Jellyfish.is_aquatic());
        assert!(AnimalSpecies::DrownedWatch.is_hostile_npc());
        assert!(!AnimalSpecies::TundraWolf.is_hostile_npc());
    }
}
