use bevy_ecs::prelude::Component;

use crate::snapshot::ServerTimestamp;

/// Client-side shake/flash window started by a server hit.
///
/// Present only while the animal's snapshot carries a hit time. The window is
/// anchored on the client clock at detection, not on the server timestamp.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HitEffect {
    /// Newest server hit time already turned into an effect.
    pub last_processed_hit: ServerTimestamp,
    /// Client clock when the effect started.
    pub effect_start_ms: f64,
}

impl HitEffect {
    pub fn new(hit: ServerTimestamp, now_ms: f64) -> Self {
        Self {
            last_processed_hit: hit,
            effect_start_ms: now_ms,
        }
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.effect_start_ms).max(0.0)
    }
}
