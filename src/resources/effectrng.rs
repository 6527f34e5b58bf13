//! Random source for visual noise (hit shake, burrow particles).

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

/// Shared RNG for effects. Seed it to make shake offsets and particle bursts
/// reproducible.
#[derive(Resource, Debug, Clone)]
pub struct EffectRng(pub Rng);

impl EffectRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => EffectRng(Rng::with_seed(seed)),
            None => EffectRng(Rng::new()),
        }
    }

    /// Uniform sample in `[min, max]`; degenerate ranges return `min`.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        let range = max - min;
        if range < f32::EPSILON {
            return min;
        }
        min + self.0.f32() * range
    }

    /// Uniform sample in `[-amplitude, amplitude]`.
    pub fn signed(&mut self, amplitude: f32) -> f32 {
        (self.0.f32() * 2.0 - 1.0) * amplitude
    }
}

impl Default for EffectRng {
    fn default() -> Self {
        Self::new(None)
    }
}
