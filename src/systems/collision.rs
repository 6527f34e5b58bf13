//! Hit-testing helpers over animal snapshots.
//!
//! Bounds are a pure function of species and authoritative position; nothing
//! here touches per-animal client state.

use glam::Vec2;

use crate::components::boxcollider::BoxCollider;
use crate::math::Rect;
use crate::snapshot::WildAnimalSnapshot;

/// Collision box centered on the snapshot's position.
pub fn get_bounds(animal: &WildAnimalSnapshot) -> Rect {
    BoxCollider::for_species(animal.species).bounds(animal.position())
}

pub fn is_point_in_bounds(x: f32, y: f32, animal: &WildAnimalSnapshot) -> bool {
    BoxCollider::for_species(animal.species).contains_point(animal.position(), Vec2::new(x, y))
}

/// Whether the animal's position lies within `radius` of the origin.
/// Compares squared distances.
pub fn is_within_range(animal: &WildAnimalSnapshot, origin_x: f32, origin_y: f32, radius: f32) -> bool {
    let delta = animal.position() - Vec2::new(origin_x, origin_y);
    delta.length_squared() <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::AnimalSpecies;

    #[test]
    fn test_bounds_use_species_table() {
        let wolf = WildAnimalSnapshot::new(1, AnimalSpecies::TundraWolf, 100.0, 100.0);
        assert_eq!(get_bounds(&wolf), Rect::new(68.0, 76.0, 64.0, 48.0));
    }

    #[test]
    fn test_unknown_species_uses_default_box() {
        let odd = WildAnimalSnapshot::new(2, AnimalSpecies::Unknown, 0.0, 0.0);
        assert_eq!(get_bounds(&odd), Rect::new(-24.0, -24.0, 48.0, 48.0));
    }

    #[test]
    fn test_point_in_bounds_edges() {
        let wolf = WildAnimalSnapshot::new(1, AnimalSpecies::TundraWolf, 0.0, 0.0);
        assert!(is_point_in_bounds(32.0, 24.0, &wolf));
        assert!(!is_point_in_bounds(32.1, 0.0, &wolf));
    }

    #[test]
    fn test_bees_cannot_be_hit_but_have_range() {
        let bee = WildAnimalSnapshot::new(3, AnimalSpecies::Bee, 10.0, 0.0);
        assert!(!is_point_in_bounds(10.0, 0.0, &bee));
        assert!(is_within_range(&bee, 0.0, 0.0, 10.0));
        assert!(!is_within_range(&bee, 0.0, 0.0, 9.99));
    }
}
