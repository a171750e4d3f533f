//! Animation playback.
//!
//! Action slots only switch [`Animation::animation_key`]; this system
//! advances the frame index of every entity's current animation at the fps
//! registered in [`AnimationStore`]. Looping animations wrap, one-shot ones
//! hold their last frame and set `finished`.
//!
//! # Related
//!
//! - [`crate::components::animation::Animation`] – per-entity playback state
//! - [`crate::resources::animationstore::AnimationStore`] – animation definitions

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback by the tick delta (milliseconds).
pub fn animation_system(
    mut query: Query<&mut Animation>,
    animation_store: Option<Res<AnimationStore>>,
    time: Res<WorldTime>,
) {
    let Some(animation_store) = animation_store else {
        return;
    };
    for mut anim_comp in query.iter_mut() {
        if anim_comp.finished {
            continue;
        }
        let Ok(animation) = animation_store.get(&anim_comp.animation_key) else {
            continue;
        };
        if animation.fps <= 0.0 || animation.frame_count == 0 {
            continue;
        }
        anim_comp.elapsed_time += time.delta;

        let frame_duration = 1000.0 / animation.fps;
        if anim_comp.elapsed_time >= frame_duration {
            anim_comp.frame_index += 1;
            anim_comp.elapsed_time -= frame_duration;

            if anim_comp.frame_index >= animation.frame_count {
                if animation.looped {
                    anim_comp.frame_index = 0;
                } else {
                    anim_comp.frame_index = animation.frame_count - 1; // stay on last frame
                    anim_comp.finished = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::AnimationResource;
    use crate::systems::time::update_world_time;

    fn world_with(key: &str, frames: usize, looped: bool) -> World {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let mut store = AnimationStore::new();
        store.insert(key, AnimationResource::new(frames, 10.0, looped));
        world.insert_resource(store);
        world
    }

    fn run(world: &mut World, schedule: &mut Schedule, dt: f32) {
        update_world_time(world, dt);
        schedule.run(world);
    }

    #[test]
    fn looping_animation_wraps() {
        let mut world = world_with("Ayla_walk", 2, true);
        let entity = world.spawn(Animation::new("Ayla_walk")).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(animation_system);

        run(&mut world, &mut schedule, 100.0);
        assert_eq!(world.get::<Animation>(entity).unwrap().frame_index, 1);
        run(&mut world, &mut schedule, 100.0);
        assert_eq!(world.get::<Animation>(entity).unwrap().frame_index, 0);
    }

    #[test]
    fn one_shot_holds_last_frame() {
        let mut world = world_with("Ayla_attack", 2, false);
        let entity = world.spawn(Animation::new("Ayla_attack")).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(animation_system);

        for _ in 0..5 {
            run(&mut world, &mut schedule, 100.0);
        }
        let anim = world.get::<Animation>(entity).unwrap();
        assert_eq!(anim.frame_index, 1);
        assert!(anim.finished);
    }

    #[test]
    fn unknown_key_is_left_alone() {
        let mut world = world_with("Ayla_walk", 2, true);
        let entity = world.spawn(Animation::new("Nobody_walk")).id();
        let mut schedule = Schedule::default();
        schedule.add_systems(animation_system);

        run(&mut world, &mut schedule, 500.0);
        assert_eq!(world.get::<Animation>(entity).unwrap().frame_index, 0);
    }
}
