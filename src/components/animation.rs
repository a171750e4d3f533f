use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Playback state of the animation currently shown for an entity.
///
/// `animation_key` points into
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore); action
/// slots switch it through [`ActionString`](crate::action::actionstring::ActionString)
/// keys and [`crate::systems::animation::animation_system`] advances frames.
#[derive(Debug, Clone, Component, Serialize, Deserialize, PartialEq)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    pub elapsed_time: f32,
    /// Set when a non-looping animation reaches its last frame.
    pub finished: bool,
}

impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_time: 0.0,
            finished: false,
        }
    }

    /// Switch to another key and restart playback. Re-selecting the current
    /// key leaves playback untouched.
    pub fn play(&mut self, animation_key: impl Into<String>) {
        let key = animation_key.into();
        if key == self.animation_key {
            return;
        }
        self.animation_key = key;
        self.frame_index = 0;
        self.elapsed_time = 0.0;
        self.finished = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_restarts_on_new_key() {
        let mut anim = Animation::new("Ayla_idle");
        anim.frame_index = 3;
        anim.elapsed_time = 12.0;
        anim.play("Ayla_attack");
        assert_eq!(anim.animation_key, "Ayla_attack");
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.elapsed_time, 0.0);
    }

    #[test]
    fn play_same_key_keeps_progress() {
        let mut anim = Animation::new("Ayla_walk");
        anim.frame_index = 2;
        anim.play("Ayla_walk");
        assert_eq!(anim.frame_index, 2);
    }
}
