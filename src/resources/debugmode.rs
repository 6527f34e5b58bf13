//! Debug overlay toggle.
//!
//! Present in the world while collision overlays are wanted; the pipeline
//! inserts and removes it from `set_debug`.

use bevy_ecs::prelude::Resource;

/// When present, each rendered animal gets its collision rectangle and
/// authoritative server position drawn over the sprite.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}
