//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta milliseconds on the `WorldTime` resource.
///
/// `dt` is the unscaled tick delta in milliseconds. Negative deltas are
/// treated as zero.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt.max(0.0) * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_time_scale() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.5));
        update_world_time(&mut world, 16.0);
        update_world_time(&mut world, 16.0);
        let wt = world.resource::<WorldTime>();
        assert_eq!(wt.delta, 8.0);
        assert_eq!(wt.elapsed, 16.0);
        assert_eq!(wt.frame_count, 2);
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        update_world_time(&mut world, -5.0);
        assert_eq!(world.resource::<WorldTime>().delta, 0.0);
    }
}
