//! Frame clock update.
//!
//! Keeps the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource in step with the host's animation callback clock.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Move the frame clock to `now_ms`.
///
/// Every animal drawn in a frame reports the same `now_ms`, so repeated calls
/// with an unchanged clock are no-ops. A clock that goes backwards is adopted
/// with a zero delta.
pub fn update_world_time(world: &mut World, now_ms: f64) {
    let mut wt = world.resource_mut::<WorldTime>();
    if now_ms == wt.now_ms && wt.frame_count > 0 {
        return;
    }
    wt.delta_ms = (now_ms - wt.now_ms).max(0.0);
    wt.now_ms = now_ms;
    wt.frame_count += 1;
}
