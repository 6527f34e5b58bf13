//! Smoothed render position for an animal.
//!
//! The server only publishes positions once per AI tick. Between ticks the
//! renderer moves [`Interpolation::current`] toward [`Interpolation::target`]
//! using a velocity estimate built from the last few accepted updates. The
//! update and advance rules live in
//! [`crate::systems::interpolation`].

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Interpolation {
    /// Last authoritative position accepted from the server.
    pub last_server: Vec2,
    /// Position the render position is converging toward.
    pub target: Vec2,
    /// Render position for the current frame.
    pub current: Vec2,
    /// Smoothed velocity estimate in world units per millisecond.
    pub velocity: Vec2,
    /// Client clock when the last authoritative change was accepted.
    pub last_update_ms: f64,
}

impl Interpolation {
    /// State for an animal seen for the first time: no motion.
    pub fn new(position: Vec2, now_ms: f64) -> Self {
        Self {
            last_server: position,
            target: position,
            current: position,
            velocity: Vec2::ZERO,
            last_update_ms: now_ms,
        }
    }

    /// Estimated speed in world units per millisecond.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Distance left to the target.
    pub fn remaining(&self) -> f32 {
        (self.target - self.current).length()
    }

    /// Jump straight to `position` and forget any motion.
    pub fn snap_to(&mut self, position: Vec2, now_ms: f64) {
        *self = Self::new(position, now_ms);
    }
}
