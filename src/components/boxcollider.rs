use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::math::Rect;
use crate::snapshot::AnimalSpecies;

/// Axis-aligned hit box centered on an animal's authoritative position.
///
/// Species never change for a given animal id, so the collider is attached
/// once when the entity is first tracked.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
}

impl BoxCollider {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// Collider from the species table; unknown species get the default box.
    pub fn for_species(species: AnimalSpecies) -> Self {
        let info = species.info();
        Self::new(info.collision_width, info.collision_height)
    }

    /// Returns (min, max) of the box for a given center position.
    /// Negative sizes are normalized.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let half = self.size * 0.5;
        let p0 = position - half;
        let p1 = position + half;
        (p0.min(p1), p0.max(p1))
    }

    pub fn bounds(&self, position: Vec2) -> Rect {
        let (min, max) = self.aabb(position);
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Inclusive point containment. A zero-size box contains nothing.
    pub fn contains_point(&self, position: Vec2, point: Vec2) -> bool {
        if self.size.x == 0.0 || self.size.y == 0.0 {
            return false;
        }
        self.bounds(position).contains(point)
    }
}
