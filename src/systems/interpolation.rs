//! Movement interpolation between server ticks.
//!
//! Each frame an animal's authoritative position is fed through
//! [`accept_server_position`] and the render position is then moved by
//! [`advance_render_position`]:
//!
//! 1. A jump longer than [`RenderConfig::teleport_threshold`] snaps everything
//!    to the new position and clears the velocity estimate.
//! 2. A move above the noise floor blends a fresh velocity sample into the
//!    estimate (30 % old, 70 % new by default) and becomes the new target.
//! 3. During the first part of a tick the render position mixes one frame of
//!    extrapolation with a seek toward the target, shifting toward seeking as
//!    the tick progresses. Past the late-phase mark it only seeks, with a
//!    catch-up fraction that reaches 1 at the overshoot limit, so the target
//!    is reached before the next update is due.
//! 4. Steps that would pass the target land on it, and anything within the
//!    snap epsilon snaps.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::interpolation::Interpolation;
use crate::resources::renderconfig::RenderConfig;

/// What an authoritative position did to the interpolation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMotion {
    /// Same position, jitter, or a non-finite value.
    Unchanged,
    /// Accepted as continuous motion toward a new target.
    Moved,
    /// Too far for one tick; snapped.
    Teleported,
}

pub fn accept_server_position(
    state: &mut Interpolation,
    server: Vec2,
    now_ms: f64,
    config: &RenderConfig,
) -> ServerMotion {
    if !server.is_finite() {
        return ServerMotion::Unchanged;
    }
    let displacement = server - state.last_server;
    let distance = displacement.length();

    if distance > config.teleport_threshold() {
        state.snap_to(server, now_ms);
        return ServerMotion::Teleported;
    }
    if distance <= config.noise_floor {
        return ServerMotion::Unchanged;
    }

    let elapsed = now_ms - state.last_update_ms;
    if elapsed >= config.min_sample_elapsed_ms {
        let sample = displacement / elapsed as f32;
        let retain = config.velocity_retain;
        state.velocity = state.velocity * retain + sample * (1.0 - retain);
    }
    state.target = server;
    state.last_server = server;
    state.last_update_ms = now_ms;
    ServerMotion::Moved
}

/// Fraction of the nominal tick elapsed since the last accepted update,
/// clamped to `[0, max_tick_progress]`.
pub fn tick_progress(state: &Interpolation, now_ms: f64, config: &RenderConfig) -> f32 {
    let progress = ((now_ms - state.last_update_ms) / config.server_tick_ms) as f32;
    progress.clamp(0.0, config.max_tick_progress)
}

pub fn advance_render_position(
    state: &mut Interpolation,
    now_ms: f64,
    config: &RenderConfig,
) -> Vec2 {
    let progress = tick_progress(state, now_ms, config);
    let remaining = state.target - state.current;

    if state.remaining() < config.snap_epsilon {
        state.current = state.target;
    } else {
        let next = if progress < config.late_phase_start {
            let t = progress / config.late_phase_start;
            let extrapolate_weight = 1.0 - t;
            let predicted = state.current + state.velocity * config.frame_interval_ms;
            let seek_fraction =
                config.early_seek_min + (config.early_seek_max - config.early_seek_min) * t;
            let seeking = state.current + remaining * seek_fraction;
            predicted * extrapolate_weight + seeking * (1.0 - extrapolate_weight)
        } else {
            let span = (config.max_tick_progress - config.late_phase_start).max(f32::EPSILON);
            let catch_up = (config.late_catch_min
                + (1.0 - config.late_catch_min) * (progress - config.late_phase_start) / span)
                .min(1.0);
            state.current + remaining * catch_up
        };

        let step = next - state.current;
        state.current = if step.dot(remaining) > remaining.dot(remaining) {
            state.target
        } else {
            next
        };
        if state.remaining() < config.snap_epsilon {
            state.current = state.target;
        }
    }

    // No news for longer than the overshoot allowance: the animal stopped.
    if progress >= config.max_tick_progress && state.current == state.target {
        state.velocity = Vec2::ZERO;
    }
    state.current
}

/// Feed this frame's server position for `entity` and return where to draw it.
///
/// The [`Interpolation`] component is created on first sight at the server
/// position. Returns `None` only when the animal has no state yet and the
/// server position is not finite.
pub fn interpolate_animal(
    world: &mut World,
    entity: Entity,
    animal_id: u64,
    server: Vec2,
    now_ms: f64,
) -> Option<Vec2> {
    if world.get::<Interpolation>(entity).is_none() {
        if !server.is_finite() {
            return None;
        }
        world
            .get_entity_mut(entity)
            .ok()?
            .insert(Interpolation::new(server, now_ms));
        return Some(server);
    }

    world.resource_scope(|world, config: Mut<RenderConfig>| {
        let mut state = world.get_mut::<Interpolation>(entity)?;
        if accept_server_position(&mut state, server, now_ms, &config) == ServerMotion::Teleported
        {
            debug!(
                "Animal {} teleported to ({:.1}, {:.1})",
                animal_id, server.x, server.y
            );
        }
        Some(advance_render_position(&mut state, now_ms, &config))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RenderConfig {
        RenderConfig::new()
    }

    #[test]
    fn test_jitter_below_noise_floor_is_ignored() {
        let cfg = config();
        let mut state = Interpolation::new(Vec2::new(10.0, 10.0), 0.0);
        let motion = accept_server_position(&mut state, Vec2::new(11.0, 10.5), 500.0, &cfg);
        assert_eq!(motion, ServerMotion::Unchanged);
        assert_eq!(state.target, Vec2::new(10.0, 10.0));
        assert_eq!(state.last_update_ms, 0.0);
    }

    #[test]
    fn test_velocity_blends_old_and_new_samples() {
        let cfg = config();
        let mut state = Interpolation::new(Vec2::ZERO, 0.0);
        state.velocity = Vec2::new(1.0, 0.0);
        accept_server_position(&mut state, Vec2::new(100.0, 0.0), 500.0, &cfg);
        // 0.3 * 1.0 + 0.7 * 0.2
        assert!((state.velocity.x - 0.44).abs() < 1e-5);
        assert_eq!(state.target, Vec2::new(100.0, 0.0));
        assert_eq!(state.last_update_ms, 500.0);
    }

    #[test]
    fn test_tiny_elapsed_keeps_previous_velocity() {
        let cfg = config();
        let mut state = Interpolation::new(Vec2::ZERO, 100.0);
        state.velocity = Vec2::new(0.25, 0.0);
        let motion = accept_server_position(&mut state, Vec2::new(50.0, 0.0), 101.0, &cfg);
        assert_eq!(motion, ServerMotion::Moved);
        assert_eq!(state.velocity, Vec2::new(0.25, 0.0));
        assert_eq!(state.target, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_teleport_snaps_and_clears_velocity() {
        let cfg = config();
        let mut state = Interpolation::new(Vec2::new(100.0, 100.0), 0.0);
        state.velocity = Vec2::new(0.5, 0.5);
        let motion = accept_server_position(&mut state, Vec2::new(900.0, 900.0), 500.0, &cfg);
        assert_eq!(motion, ServerMotion::Teleported);
        assert_eq!(state.current, Vec2::new(900.0, 900.0));
        assert_eq!(state.velocity, Vec2::ZERO);
        let pos = advance_render_position(&mut state, 516.0, &cfg);
        assert_eq!(pos, Vec2::new(900.0, 900.0));
    }

    #[test]
    fn test_non_finite_position_is_ignored() {
        let cfg = config();
        let mut state = Interpolation::new(Vec2::new(5.0, 5.0), 0.0);
        let motion = accept_server_position(&mut state, Vec2::new(f32::NAN, 0.0), 500.0, &cfg);
        assert_eq!(motion, ServerMotion::Unchanged);
        assert_eq!(state.last_server, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_step_never_passes_target() {
        let cfg = config();
        let mut state = Interpolation::new(Vec2::ZERO, 0.0);
        state.target = Vec2::new(10.0, 0.0);
        state.last_server = state.target;
        // Wildly overestimated velocity would extrapolate far past the target.
        state.velocity = Vec2::new(50.0, 0.0);
        let pos = advance_render_position(&mut state, 1.0, &cfg);
        assert_eq!(pos, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_snapped_position_stays_on_target() {
        let cfg = config();
        let mut state = Interpolation::new(Vec2::ZERO, 0.0);
        state.target = Vec2::new(0.5, 0.0);
        state.velocity = Vec2::new(-1.0, 0.0);
        for frame in 1..20 {
            let pos = advance_render_position(&mut state, frame as f64 * 16.0, &cfg);
            assert_eq!(pos, state.target);
        }
    }

    #[test]
    fn test_late_phase_reaches_target() {
        let cfg = config();
        let mut state = Interpolation::new(Vec2::ZERO, 0.0);
        state.target = Vec2::new(200.0, 0.0);
        let mut now = 400.0;
        while now <= 560.0 {
            advance_render_position(&mut state, now, &cfg);
            now += 16.0;
        }
        assert_eq!(state.current, state.target);
    }

    #[test]
    fn test_velocity_zeroed_after_long_silence() {
        let cfg = config();
        let mut state = Interpolation::new(Vec2::ZERO, 0.0);
        state.velocity = Vec2::new(0.3, 0.0);
        advance_render_position(&mut state, 700.0, &cfg);
        assert_eq!(state.velocity, Vec2::new(0.3, 0.0));
        advance_render_position(&mut state, 800.0, &cfg);
        assert_eq!(state.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_first_sight_spawns_state_without_motion() {
        let mut world = World::new();
        world.insert_resource(RenderConfig::new());
        let entity = world.spawn_empty().id();
        let pos = interpolate_animal(&mut world, entity, 1, Vec2::new(3.0, 4.0), 10.0);
        assert_eq!(pos, Some(Vec2::new(3.0, 4.0)));
        let state = world.get::<Interpolation>(entity).unwrap();
        assert_eq!(state.velocity, Vec2::ZERO);
        assert_eq!(state.last_update_ms, 10.0);
    }

    #[test]
    fn test_first_sight_with_nan_draws_nothing() {
        let mut world = World::new();
        world.insert_resource(RenderConfig::new());
        let entity = world.spawn_empty().id();
        assert_eq!(
            interpolate_animal(&mut world, entity, 1, Vec2::new(f32::NAN, 0.0), 0.0),
            None
        );
        assert!(world.get::<Interpolation>(entity).is_none());
    }
}
