use bevy_ecs::prelude::Component;

/// Backend primary key of the wild animal this entity tracks.
///
/// The reverse mapping lives in [`AnimalIndex`](crate::resources::animalindex::AnimalIndex).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimalId(pub u64);
