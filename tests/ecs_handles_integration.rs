//! ECS Handle Integration Tests
//!
//! Per-animal state lives on bevy_ecs entities looked up through a side
//! table keyed by backend id. These tests pin down the handle behaviour the
//! pipeline relies on when animals leave and re-enter view.
//!
//! # Test Categories
//!
//! 1. **Stale Handles** - despawned entities stay dead, ids get fresh entities
//! 2. **Component Layout** - which components an animal carries and when
//! 3. **Effect Schedule** - burst expiry driven by the frame clock

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use wildlife_render::components::animalid::AnimalId;
use wildlife_render::components::boxcollider::BoxCollider;
use wildlife_render::components::burrow::{BurrowBurst, BurrowMarker};
use wildlife_render::components::interpolation::Interpolation;
use wildlife_render::pipeline::WildlifePipeline;
use wildlife_render::resources::renderconfig::RenderConfig;
use wildlife_render::resources::spriteregistry::SpriteRegistry;
use wildlife_render::snapshot::{AnimalSpecies, AnimalState, ServerTimestamp, WildAnimalSnapshot};
use wildlife_render::surface::DrawTargets;
use wildlife_render::surface::recording::RecordingSurface;

fn make_pipeline() -> WildlifePipeline {
    let config = RenderConfig {
        effect_seed: Some(7),
        ..RenderConfig::new()
    };
    WildlifePipeline::new(config, SpriteRegistry::with_default_sheets())
}

fn draw(pipeline: &mut WildlifePipeline, animal: &WildAnimalSnapshot, now_ms: f64) {
    let mut screen = RecordingSurface::new(640, 480);
    let mut scratch = RecordingSurface::default();
    let mut targets = DrawTargets::new(&mut screen, &mut scratch);
    pipeline.render_animal(&mut targets, animal, now_ms, 0.5, None, None);
}

fn burrowed_vole(id: u64, changed_at: i64) -> WildAnimalSnapshot {
    let mut vole = WildAnimalSnapshot::new(id, AnimalSpecies::Vole, 32.0, 48.0);
    vole.state = AnimalState::Burrowed;
    vole.state_change_time = ServerTimestamp(changed_at);
    vole
}

// =============================================================================
// Stale Handles
// =============================================================================

#[test]
fn reclaimed_entity_handle_is_dead() {
    let mut pipeline = make_pipeline();
    let fox = WildAnimalSnapshot::new(1, AnimalSpecies::CinderFox, 0.0, 0.0);
    draw(&mut pipeline, &fox, 0.0);
    let old = pipeline.entity_for(1).unwrap();
    assert!(pipeline.world().get_entity(old).is_ok());

    pipeline.reclaim(&FxHashSet::default());
    assert!(pipeline.entity_for(1).is_none());
    assert!(pipeline.world().get_entity(old).is_err());
}

#[test]
fn resighted_animal_gets_fresh_entity() {
    let mut pipeline = make_pipeline();
    let fox = WildAnimalSnapshot::new(2, AnimalSpecies::CinderFox, 0.0, 0.0);
    draw(&mut pipeline, &fox, 0.0);
    let old = pipeline.entity_for(2).unwrap();
    pipeline.reclaim(&FxHashSet::default());

    let moved = WildAnimalSnapshot::new(2, AnimalSpecies::CinderFox, 400.0, 0.0);
    draw(&mut pipeline, &moved, 500.0);
    let new = pipeline.entity_for(2).unwrap();
    assert_ne!(old, new);
    assert_eq!(
        pipeline.interpolation(2).unwrap().current.x,
        400.0,
        "fresh state must start where the animal was first seen"
    );
}

#[test]
fn same_id_keeps_same_entity_across_frames() {
    let mut pipeline = make_pipeline();
    let hare = WildAnimalSnapshot::new(3, AnimalSpecies::Hare, 0.0, 0.0);
    draw(&mut pipeline, &hare, 0.0);
    let first = pipeline.entity_for(3).unwrap();
    for frame in 1..10 {
        draw(&mut pipeline, &hare, frame as f64 * 16.0);
    }
    assert_eq!(pipeline.entity_for(3), Some(first));
    assert_eq!(pipeline.tracked_animals(), 1);
}

// =============================================================================
// Component Layout
// =============================================================================

#[test]
fn tracked_animal_carries_id_and_collider() {
    let mut pipeline = make_pipeline();
    let bear = WildAnimalSnapshot::new(4, AnimalSpecies::PolarBear, 10.0, 10.0);
    draw(&mut pipeline, &bear, 0.0);
    let entity = pipeline.entity_for(4).unwrap();
    let world = pipeline.world();
    assert_eq!(world.get::<AnimalId>(entity), Some(&AnimalId(4)));
    assert_eq!(
        world.get::<BoxCollider>(entity),
        Some(&BoxCollider::for_species(AnimalSpecies::PolarBear))
    );
    assert!(world.get::<Interpolation>(entity).is_some());
}

#[test]
fn burrow_only_animal_has_marker_but_no_interpolation() {
    let mut pipeline = make_pipeline();
    pipeline.process_burrow_effects(&[burrowed_vole(5, 10)], 0.0);
    let entity = pipeline.entity_for(5).unwrap();
    let world = pipeline.world();
    assert!(world.get::<BurrowMarker>(entity).is_some());
    assert!(world.get::<Interpolation>(entity).is_none());
}

#[test]
fn reclaim_despawns_orphaned_bursts() {
    let mut pipeline = make_pipeline();
    pipeline.process_burrow_effects(&[burrowed_vole(6, 10), burrowed_vole(7, 10)], 0.0);
    assert_eq!(pipeline.active_bursts(), 2);

    let live: FxHashSet<u64> = [7].into_iter().collect();
    let stats = pipeline.reclaim(&live);
    assert_eq!(stats.animals, 1);
    assert_eq!(stats.bursts, 1);
    assert_eq!(pipeline.active_bursts(), 1);
}

// =============================================================================
// Effect Schedule
// =============================================================================

#[test]
fn bursts_expire_on_frame_clock() {
    let mut pipeline = make_pipeline();
    pipeline.process_burrow_effects(&[burrowed_vole(8, 10)], 1_000.0);
    let mut surface = RecordingSurface::new(64, 64);

    assert!(pipeline.render_burrow_effects(&mut surface, 1_400.0) > 0);
    assert_eq!(pipeline.active_bursts(), 1);

    assert_eq!(pipeline.render_burrow_effects(&mut surface, 1_800.0), 0);
    assert_eq!(pipeline.active_bursts(), 0);
}

#[test]
fn burst_entities_are_separate_from_animals() {
    let mut pipeline = make_pipeline();
    pipeline.process_burrow_effects(&[burrowed_vole(9, 10)], 0.0);
    let animal = pipeline.entity_for(9).unwrap();
    let world = pipeline.world();
    let mut query = world
        .try_query::<(Entity, &BurrowBurst)>()
        .expect("burst component is registered once a burst spawned");
    let world_bursts: Vec<(Entity, u64)> = query
        .iter(world)
        .map(|(entity, burst)| (entity, burst.owner))
        .collect();
    assert_eq!(world_bursts.len(), 1);
    assert_ne!(world_bursts[0].0, animal);
    assert_eq!(world_bursts[0].1, 9);
}
