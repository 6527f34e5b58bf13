//! Burrow dust bursts.
//!
//! [`process_burrow_effects`] runs once per snapshot batch. An animal whose
//! state is `Burrowed` with a state change time newer than the one in its
//! [`BurrowMarker`] gets a new [`BurrowBurst`] entity. Bursts are drawn by
//! [`render_burrow_effects`] and despawned by [`expire_burrow_bursts`] once
//! their fade-out is over.

use std::f32::consts::TAU;

use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::burrow::{BurrowBurst, BurrowMarker, BurrowParticle, MAX_BURROW_PARTICLES};
use crate::components::interpolation::Interpolation;
use crate::resources::effectrng::EffectRng;
use crate::resources::renderconfig::RenderConfig;
use crate::resources::worldtime::WorldTime;
use crate::snapshot::WildAnimalSnapshot;
use crate::surface::{Color, RasterSurface};
use crate::systems::lifecycle::track_animal;

const DIRT_COLORS: [Color; 3] = [
    Color::new(110, 84, 58, 255),
    Color::new(139, 108, 74, 255),
    Color::new(86, 66, 48, 255),
];

/// Spawn bursts for newly burrowed animals. Returns how many were spawned.
pub fn process_burrow_effects(
    world: &mut World,
    snapshots: &[WildAnimalSnapshot],
    now_ms: f64,
) -> usize {
    let mut spawned = 0;
    for snapshot in snapshots.iter().filter(|s| s.is_burrowed()) {
        let entity = track_animal(world, snapshot.id, snapshot.species);
        // Same or older transition times were already played.
        let already = world
            .get::<BurrowMarker>(entity)
            .is_some_and(|m| snapshot.state_change_time <= m.last_state_change);
        if already {
            continue;
        }

        let origin = world
            .get::<Interpolation>(entity)
            .map(|state| state.current)
            .filter(|p| p.is_finite())
            .unwrap_or_else(|| snapshot.position());
        if !origin.is_finite() {
            continue;
        }

        world.entity_mut(entity).insert(BurrowMarker {
            last_state_change: snapshot.state_change_time,
        });
        spawn_burrow_burst(world, snapshot.id, origin, now_ms);
        debug!(
            "Animal {} burrowed at ({:.1}, {:.1})",
            snapshot.id, origin.x, origin.y
        );
        spawned += 1;
    }
    spawned
}

pub fn spawn_burrow_burst(world: &mut World, owner: u64, origin: Vec2, now_ms: f64) -> Entity {
    let config = world.resource::<RenderConfig>().clone();
    let count = config.burrow_particles.min(MAX_BURROW_PARTICLES);
    let mut particles = ArrayVec::<BurrowParticle, MAX_BURROW_PARTICLES>::new();
    {
        let mut rng = world.resource_mut::<EffectRng>();
        for _ in 0..count {
            let angle = rng.range_f32(0.0, TAU);
            let speed = rng.range_f32(config.burrow_speed_min, config.burrow_speed_max);
            let lift = rng.range_f32(config.burrow_lift_min, config.burrow_lift_max);
            let color = DIRT_COLORS[rng.0.usize(..DIRT_COLORS.len())];
            particles.push(BurrowParticle {
                offset: Vec2::new(rng.signed(6.0), rng.signed(3.0)),
                // Vertical scatter is flattened so the lift always wins.
                velocity: Vec2::new(angle.cos() * speed, angle.sin() * speed * 0.5 - lift),
                size: rng.range_f32(2.0, 4.5),
                color,
            });
        }
    }
    world
        .spawn(BurrowBurst {
            owner,
            origin,
            start_ms: now_ms,
            particles,
        })
        .id()
}

/// Despawn bursts whose fade-out has finished.
pub fn expire_burrow_bursts(
    world_time: Res<WorldTime>,
    config: Res<RenderConfig>,
    query: Query<(Entity, &BurrowBurst)>,
    mut commands: Commands,
) {
    for (entity, burst) in query.iter() {
        if burst.is_expired(world_time.now_ms, config.burrow_duration_ms) {
            commands.entity(entity).try_despawn();
        }
    }
}

/// Draw every live burst. Returns the number of particles drawn.
pub fn render_burrow_effects<S: RasterSurface>(
    world: &mut World,
    surface: &mut S,
    now_ms: f64,
) -> usize {
    let (duration_ms, gravity) = {
        let config = world.resource::<RenderConfig>();
        (config.burrow_duration_ms, config.burrow_gravity)
    };
    let mut drawn = 0;
    let mut q = world.query::<&BurrowBurst>();
    for burst in q.iter(world) {
        let opacity = burst.opacity(now_ms, duration_ms);
        if opacity <= 0.0 {
            continue;
        }
        let elapsed_s = ((now_ms - burst.start_ms).max(0.0) / 1000.0) as f32;
        surface.save();
        surface.set_alpha(opacity);
        for particle in &burst.particles {
            let pos = burst.origin + particle.offset_at(elapsed_s, gravity);
            surface.fill_circle(pos, particle.size * (0.5 + 0.5 * opacity), particle.color);
            drawn += 1;
        }
        surface.restore();
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animalindex::AnimalIndex;
    use crate::snapshot::{AnimalSpecies, AnimalState, ServerTimestamp};
    use crate::surface::recording::RecordingSurface;

    fn make_world() -> World {
        let mut world = World::new();
        world.insert_resource(RenderConfig::new());
        world.insert_resource(EffectRng::new(Some(11)));
        world.insert_resource(AnimalIndex::default());
        world.insert_resource(WorldTime::default());
        world
    }

    fn burrowed(id: u64, change: i64) -> WildAnimalSnapshot {
        let mut s = WildAnimalSnapshot::new(id, AnimalSpecies::Vole, 40.0, 60.0);
        s.state = AnimalState::Burrowed;
        s.state_change_time = ServerTimestamp(change);
        s
    }

    fn burst_count(world: &mut World) -> usize {
        world.query::<&BurrowBurst>().iter(world).count()
    }

    #[test]
    fn test_repeated_snapshots_trigger_once() {
        let mut world = make_world();
        let batch = [burrowed(1, 500)];
        let mut total = 0;
        for frame in 0..10 {
            total += process_burrow_effects(&mut world, &batch, frame as f64 * 16.0);
        }
        assert_eq!(total, 1);
        assert_eq!(burst_count(&mut world), 1);
    }

    #[test]
    fn test_older_transition_time_is_ignored() {
        let mut world = make_world();
        let mut total = process_burrow_effects(&mut world, &[burrowed(6, 500)], 0.0);
        total += process_burrow_effects(&mut world, &[burrowed(6, 300)], 16.0);
        total += process_burrow_effects(&mut world, &[burrowed(6, 500)], 32.0);
        assert_eq!(total, 1);
        assert_eq!(burst_count(&mut world), 1);

        let entity = world.resource::<AnimalIndex>().get(6).unwrap();
        assert_eq!(
            world.get::<BurrowMarker>(entity).unwrap().last_state_change,
            ServerTimestamp(500)
        );

        assert_eq!(process_burrow_effects(&mut world, &[burrowed(6, 900)], 48.0), 1);
    }

    #[test]
    fn test_visible_animals_do_not_trigger() {
        let mut world = make_world();
        let batch = [WildAnimalSnapshot::new(2, AnimalSpecies::Hare, 0.0, 0.0)];
        assert_eq!(process_burrow_effects(&mut world, &batch, 0.0), 0);
        assert_eq!(burst_count(&mut world), 0);
    }

    #[test]
    fn test_burst_has_configured_particle_count() {
        let mut world = make_world();
        process_burrow_effects(&mut world, &[burrowed(3, 1)], 0.0);
        let mut q = world.query::<&BurrowBurst>();
        let burst = q.iter(&world).next().unwrap();
        assert_eq!(burst.particles.len(), 12);
        assert_eq!(burst.origin, Vec2::new(40.0, 60.0));
        for p in &burst.particles {
            assert!(p.velocity.y <= 0.0);
        }
    }

    #[test]
    fn test_expiry_system_despawns_after_duration() {
        let mut world = make_world();
        let mut schedule = Schedule::default();
        schedule.add_systems(expire_burrow_bursts);

        process_burrow_effects(&mut world, &[burrowed(4, 1)], 0.0);
        world.resource_mut::<WorldTime>().now_ms = 799.0;
        schedule.run(&mut world);
        assert_eq!(burst_count(&mut world), 1);

        world.resource_mut::<WorldTime>().now_ms = 800.0;
        schedule.run(&mut world);
        assert_eq!(burst_count(&mut world), 0);

        // Marker survives the burst; still burrowed means no new burst.
        assert_eq!(process_burrow_effects(&mut world, &[burrowed(4, 1)], 900.0), 0);
    }

    #[test]
    fn test_render_draws_particles_with_fading_alpha() {
        let mut world = make_world();
        process_burrow_effects(&mut world, &[burrowed(5, 1)], 0.0);
        let mut surface = RecordingSurface::new(200, 200);
        assert_eq!(render_burrow_effects(&mut world, &mut surface, 400.0), 12);
        let alpha = surface.commands()[0].state().alpha;
        assert!((alpha - 0.5).abs() < 1e-4);
        assert_eq!(surface.stack_depth(), 0);
    }
}
