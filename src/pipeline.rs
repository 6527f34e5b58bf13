//! Host-facing entry point.
//!
//! [`WildlifePipeline`] owns the ECS world holding every tracked animal and
//! exposes the calls the host makes from its frame loop:
//!
//! - [`render_animal`](WildlifePipeline::render_animal) once per visible animal per frame
//! - [`process_burrow_effects`](WildlifePipeline::process_burrow_effects) once per snapshot batch
//! - [`render_burrow_effects`](WildlifePipeline::render_burrow_effects) once per frame
//! - [`reclaim`](WildlifePipeline::reclaim) with the current live id set
//!
//! Everything is single-threaded and synchronous. Per-animal state is never
//! dropped on its own; skipping `reclaim` leaks one entity per animal ever
//! seen.

use std::collections::HashSet;
use std::hash::BuildHasher;

use bevy_ecs::prelude::*;
use log::info;
use rustc_hash::FxHashMap;

use crate::components::burrow::{BurrowBurst, BurrowMarker};
use crate::components::hiteffect::HitEffect;
use crate::components::interpolation::Interpolation;
use crate::resources::animalindex::AnimalIndex;
use crate::resources::debugmode::DebugMode;
use crate::resources::effectrng::EffectRng;
use crate::resources::renderconfig::RenderConfig;
use crate::resources::spriteregistry::SpriteRegistry;
use crate::resources::worldtime::WorldTime;
use crate::snapshot::{BreedingData, WildAnimalSnapshot};
use crate::surface::{DrawTargets, RasterSurface};
use crate::systems::burrow::{expire_burrow_bursts, process_burrow_effects, render_burrow_effects};
use crate::systems::lifecycle::{ReclaimStats, reclaim_animals, tracked_entity};
use crate::systems::render::{RenderOutcome, ViewerContext, render_animal};
use crate::systems::time::update_world_time;

/// Sizes of every per-animal state store, for leak checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateCounts {
    pub animals: usize,
    pub interpolations: usize,
    pub hit_effects: usize,
    pub burrow_markers: usize,
    pub bursts: usize,
}

impl StateCounts {
    pub fn is_empty(&self) -> bool {
        *self == StateCounts::default()
    }
}

pub struct WildlifePipeline {
    world: World,
    effects: Schedule,
}

impl Default for WildlifePipeline {
    fn default() -> Self {
        Self::new(RenderConfig::new(), SpriteRegistry::with_default_sheets())
    }
}

impl WildlifePipeline {
    pub fn new(config: RenderConfig, sprites: SpriteRegistry) -> Self {
        let mut world = World::new();
        world.insert_resource(EffectRng::new(config.effect_seed));
        world.insert_resource(config);
        world.insert_resource(sprites);
        world.insert_resource(AnimalIndex::default());
        world.insert_resource(WorldTime::default());

        let mut effects = Schedule::default();
        effects.add_systems(expire_burrow_bursts);

        info!(
            "Wildlife pipeline ready: teleport threshold {:.0} units",
            world.resource::<RenderConfig>().teleport_threshold()
        );
        Self { world, effects }
    }

    pub fn config(&self) -> &RenderConfig {
        self.world.resource::<RenderConfig>()
    }

    pub fn sprites(&self) -> &SpriteRegistry {
        self.world.resource::<SpriteRegistry>()
    }

    pub fn sprites_mut(&mut self) -> Mut<'_, SpriteRegistry> {
        self.world.resource_mut::<SpriteRegistry>()
    }

    pub fn set_debug(&mut self, enabled: bool) {
        if enabled {
            self.world.insert_resource(DebugMode {});
        } else {
            self.world.remove_resource::<DebugMode>();
        }
    }

    pub fn is_debug(&self) -> bool {
        self.world.contains_resource::<DebugMode>()
    }

    /// Draw one animal. See [`render_animal`].
    pub fn render_animal<S: RasterSurface>(
        &mut self,
        targets: &mut DrawTargets<'_, S>,
        animal: &WildAnimalSnapshot,
        now_ms: f64,
        day_night_progress: f32,
        breeding: Option<&FxHashMap<u64, BreedingData>>,
        viewer: Option<&ViewerContext>,
    ) -> RenderOutcome {
        render_animal(
            &mut self.world,
            targets,
            animal,
            now_ms,
            day_night_progress,
            breeding,
            viewer,
        )
    }

    /// Start dust bursts for animals that just burrowed. Returns the number
    /// of bursts started.
    pub fn process_burrow_effects(&mut self, animals: &[WildAnimalSnapshot], now_ms: f64) -> usize {
        self.tick_effects(now_ms);
        process_burrow_effects(&mut self.world, animals, now_ms)
    }

    /// Draw live dust bursts. Returns the number of particles drawn.
    pub fn render_burrow_effects<S: RasterSurface>(&mut self, surface: &mut S, now_ms: f64) -> usize {
        self.tick_effects(now_ms);
        render_burrow_effects(&mut self.world, surface, now_ms)
    }

    /// Drop all client state for animals not in `live`.
    pub fn reclaim<H: BuildHasher>(&mut self, live: &HashSet<u64, H>) -> ReclaimStats {
        reclaim_animals(&mut self.world, |id| live.contains(&id))
    }

    fn tick_effects(&mut self, now_ms: f64) {
        update_world_time(&mut self.world, now_ms);
        self.effects.run(&mut self.world);
    }

    /// Frame clock as of the last call that carried a `now_ms`.
    pub fn world_time(&self) -> WorldTime {
        *self.world.resource::<WorldTime>()
    }

    pub fn tracked_animals(&self) -> usize {
        self.world.resource::<AnimalIndex>().len()
    }

    pub fn active_bursts(&mut self) -> usize {
        self.world.query::<&BurrowBurst>().iter(&self.world).count()
    }

    pub fn state_counts(&mut self) -> StateCounts {
        StateCounts {
            animals: self.tracked_animals(),
            interpolations: self.world.query::<&Interpolation>().iter(&self.world).count(),
            hit_effects: self.world.query::<&HitEffect>().iter(&self.world).count(),
            burrow_markers: self.world.query::<&BurrowMarker>().iter(&self.world).count(),
            bursts: self.active_bursts(),
        }
    }

    pub fn entity_for(&self, id: u64) -> Option<Entity> {
        tracked_entity(&self.world, id)
    }

    pub fn interpolation(&self, id: u64) -> Option<Interpolation> {
        self.entity_for(id)
            .and_then(|e| self.world.get::<Interpolation>(e).copied())
    }

    pub fn hit_effect(&self, id: u64) -> Option<HitEffect> {
        self.entity_for(id)
            .and_then(|e| self.world.get::<HitEffect>(e).copied())
    }

    pub fn world(&self) -> &World {
        &self.world
    }
}
