//! Side table from backend animal ids to ECS entity handles.
//!
//! ECS entities carry a generation, so a handle kept past `reclaim` no longer
//! resolves instead of silently pointing at a different animal.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

#[derive(Resource, Debug, Default)]
pub struct AnimalIndex {
    map: FxHashMap<u64, Entity>,
}

impl AnimalIndex {
    pub fn get(&self, id: u64) -> Option<Entity> {
        self.map.get(&id).copied()
    }

    pub fn insert(&mut self, id: u64, entity: Entity) -> Option<Entity> {
        self.map.insert(id, entity)
    }

    pub fn remove(&mut self, id: u64) -> Option<Entity> {
        self.map.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.map.contains_key(&id)
    }

    /// Remove every id rejected by `keep`, returning the dropped handles.
    pub fn drain_where(&mut self, mut keep: impl FnMut(u64) -> bool) -> Vec<(u64, Entity)> {
        let dropped: Vec<(u64, Entity)> = self
            .map
            .iter()
            .filter(|(id, _)| !keep(**id))
            .map(|(id, e)| (*id, *e))
            .collect();
        for (id, _) in &dropped {
            self.map.remove(id);
        }
        dropped
    }
}
