use bevy_ecs::prelude::Resource;

/// Client frame clock in milliseconds, fed by the host's animation callback.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    pub now_ms: f64,
    pub delta_ms: f64,
    pub frame_count: u64,
}
