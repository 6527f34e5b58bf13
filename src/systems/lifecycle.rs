//! Animal entity lifecycle.
//!
//! Animals get an ECS entity the first time any inbound call mentions them and
//! lose it when [`reclaim_animals`] no longer finds their id in the live set.
//! Nothing expires on its own: a host that never reclaims keeps every animal
//! it has ever seen.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::animalid::AnimalId;
use crate::components::boxcollider::BoxCollider;
use crate::components::burrow::BurrowBurst;
use crate::resources::animalindex::AnimalIndex;
use crate::snapshot::AnimalSpecies;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReclaimStats {
    pub animals: usize,
    pub bursts: usize,
}

/// Entity for animal `id`, spawning it on first sight.
pub fn track_animal(world: &mut World, id: u64, species: AnimalSpecies) -> Entity {
    if let Some(entity) = world.resource::<AnimalIndex>().get(id)
        && world.get_entity(entity).is_ok()
    {
        return entity;
    }
    let entity = world
        .spawn((AnimalId(id), BoxCollider::for_species(species)))
        .id();
    world.resource_mut::<AnimalIndex>().insert(id, entity);
    entity
}

/// Entity for animal `id` if it is currently tracked.
pub fn tracked_entity(world: &World, id: u64) -> Option<Entity> {
    world
        .resource::<AnimalIndex>()
        .get(id)
        .filter(|entity| world.get_entity(*entity).is_ok())
}

/// Despawn every animal entity and burrow burst whose id fails `is_live`.
pub fn reclaim_animals(world: &mut World, is_live: impl Fn(u64) -> bool) -> ReclaimStats {
    let dropped = world.resource_mut::<AnimalIndex>().drain_where(&is_live);
    for (_, entity) in &dropped {
        world.despawn(*entity);
    }

    let stale_bursts: Vec<Entity> = {
        let mut q = world.query::<(Entity, &BurrowBurst)>();
        q.iter(world)
            .filter(|(_, burst)| !is_live(burst.owner))
            .map(|(entity, _)| entity)
            .collect()
    };
    for entity in &stale_bursts {
        world.despawn(*entity);
    }

    let stats = ReclaimStats {
        animals: dropped.len(),
        bursts: stale_bursts.len(),
    };
    trace!(
        "Reclaimed {} animals and {} burrow bursts, {} still tracked",
        stats.animals,
        stats.bursts,
        world.resource::<AnimalIndex>().len()
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use arrayvec::ArrayVec;

    fn make_world() -> World {
        let mut world = World::new();
        world.insert_resource(AnimalIndex::default());
        world
    }

    #[test]
    fn test_track_animal_reuses_entity() {
        let mut world = make_world();
        let a = track_animal(&mut world, 7, AnimalSpecies::Vole);
        let b = track_animal(&mut world, 7, AnimalSpecies::Vole);
        assert_eq!(a, b);
        assert_eq!(world.get::<AnimalId>(a), Some(&AnimalId(7)));
    }

    #[test]
    fn test_reclaim_keeps_live_and_drops_rest() {
        let mut world = make_world();
        let keep = track_animal(&mut world, 1, AnimalSpecies::Hare);
        let gone = track_animal(&mut world, 2, AnimalSpecies::Hare);
        world.spawn(BurrowBurst {
            owner: 2,
            origin: Vec2::ZERO,
            start_ms: 0.0,
            particles: ArrayVec::new(),
        });

        let stats = reclaim_animals(&mut world, |id| id == 1);
        assert_eq!(stats, ReclaimStats { animals: 1, bursts: 1 });
        assert!(world.get_entity(keep).is_ok());
        assert!(world.get_entity(gone).is_err());
        assert_eq!(tracked_entity(&world, 2), None);
    }

    #[test]
    fn test_despawned_handle_is_replaced_on_next_sight() {
        let mut world = make_world();
        let first = track_animal(&mut world, 3, AnimalSpecies::Crow);
        world.despawn(first);
        let second = track_animal(&mut world, 3, AnimalSpecies::Crow);
        assert_ne!(first, second);
    }
}
