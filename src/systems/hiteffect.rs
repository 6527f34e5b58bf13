//! Hit shake and white flash.
//!
//! A new effect starts only when the snapshot's hit time is strictly newer
//! than the last one processed, so redrawing the same snapshot never restarts
//! it. Older or equal hit times are ignored.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::hiteffect::HitEffect;
use crate::resources::effectrng::EffectRng;
use crate::resources::renderconfig::RenderConfig;
use crate::snapshot::ServerTimestamp;

/// Per-frame output of the hit tracker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitFeedback {
    /// Pixel offset to add to the draw position this frame.
    pub shake: Vec2,
    /// Draw the sprite as a flat white silhouette.
    pub flash: bool,
}

impl HitFeedback {
    pub const NONE: HitFeedback = HitFeedback {
        shake: Vec2::ZERO,
        flash: false,
    };
}

/// Whether shake and flash are still running for an effect.
pub fn effect_phase(effect: &HitEffect, now_ms: f64, config: &RenderConfig) -> (bool, bool) {
    let elapsed = effect.elapsed_ms(now_ms);
    (elapsed < config.shake_ms, elapsed < config.flash_ms)
}

/// Update `entity`'s hit state from its snapshot and sample this frame's
/// feedback. Nothing is drawn for dead animals.
pub fn update_hit_effect(
    world: &mut World,
    entity: Entity,
    last_hit: Option<ServerTimestamp>,
    health: f32,
    now_ms: f64,
) -> HitFeedback {
    let Some(hit) = last_hit.filter(|t| t.is_set()) else {
        if let Ok(mut e) = world.get_entity_mut(entity) {
            e.remove::<HitEffect>();
        }
        return HitFeedback::NONE;
    };

    let effect = match world.get::<HitEffect>(entity).copied() {
        Some(existing) if hit <= existing.last_processed_hit => existing,
        _ => {
            let started = HitEffect::new(hit, now_ms);
            match world.get_entity_mut(entity) {
                Ok(mut e) => {
                    e.insert(started);
                }
                Err(_) => return HitFeedback::NONE,
            }
            started
        }
    };

    if health <= 0.0 {
        return HitFeedback::NONE;
    }

    let (shaking, flash) = effect_phase(&effect, now_ms, world.resource::<RenderConfig>());
    let shake = if shaking {
        let amplitude = world.resource::<RenderConfig>().shake_px;
        let mut rng = world.resource_mut::<EffectRng>();
        Vec2::new(rng.signed(amplitude), rng.signed(amplitude))
    } else {
        Vec2::ZERO
    };
    HitFeedback { shake, flash }
}
