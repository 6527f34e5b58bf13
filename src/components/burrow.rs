//! Burrow dust components.
//!
//! [`BurrowMarker`] sits on the animal entity and remembers which state change
//! already produced a burst. It outlives the burst so an animal that stays
//! underground never triggers again. [`BurrowBurst`] is a standalone entity
//! holding the particles; it is despawned once its fade-out finishes.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::snapshot::ServerTimestamp;
use crate::surface::Color;

/// Upper bound on particles per burst.
pub const MAX_BURROW_PARTICLES: usize = 32;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurrowMarker {
    pub last_state_change: ServerTimestamp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurrowParticle {
    /// Spawn offset from the burst origin, pixels.
    pub offset: Vec2,
    /// Launch velocity, pixels per second. Negative y is up.
    pub velocity: Vec2,
    pub size: f32,
    pub color: Color,
}

impl BurrowParticle {
    /// Ballistic position relative to the origin after `elapsed_s` seconds.
    pub fn offset_at(&self, elapsed_s: f32, gravity: f32) -> Vec2 {
        Vec2::new(
            self.offset.x + self.velocity.x * elapsed_s,
            self.offset.y + self.velocity.y * elapsed_s + 0.5 * gravity * elapsed_s * elapsed_s,
        )
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct BurrowBurst {
    /// Animal id that produced the burst.
    pub owner: u64,
    pub origin: Vec2,
    pub start_ms: f64,
    pub particles: ArrayVec<BurrowParticle, MAX_BURROW_PARTICLES>,
}

impl BurrowBurst {
    /// Remaining opacity in 0..=1, linear over `duration_ms`.
    pub fn opacity(&self, now_ms: f64, duration_ms: f64) -> f32 {
        if duration_ms <= 0.0 {
            return 0.0;
        }
        let elapsed = (now_ms - self.start_ms).max(0.0);
        (1.0 - elapsed / duration_ms).clamp(0.0, 1.0) as f32
    }

    pub fn is_expired(&self, now_ms: f64, duration_ms: f64) -> bool {
        now_ms - self.start_ms >= duration_ms
    }
}
