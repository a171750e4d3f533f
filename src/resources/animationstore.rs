//! Animation resource registry.
//!
//! A minimal store for animation definitions keyed by
//! [`ActionString`](crate::action::actionstring::ActionString) keys. Lookups
//! are validated: a missing key is a recoverable
//! [`BattleError::UnknownAnimationKey`], and [`AnimationStore::key_or_idle`]
//! turns it into the character's idle key instead of failing.

use bevy_ecs::prelude::Resource;
use log::warn;
use rustc_hash::FxHashMap;

use crate::action::actionstring::{ActionString, AnimAction};
use crate::error::{BattleError, Result};

/// Central registry of animation definitions keyed by string IDs.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

/// Immutable playback parameters for one animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationResource {
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
}

impl AnimationResource {
    pub fn new(frame_count: usize, fps: f32, looped: bool) -> Self {
        AnimationResource {
            frame_count,
            fps,
            looped,
        }
    }
}

/// Frame data used for characters whose content defines no animations.
fn default_resource(action: AnimAction) -> AnimationResource {
    match action {
        AnimAction::Idle | AnimAction::Victory => AnimationResource::new(4, 6.0, true),
        AnimAction::Walk | AnimAction::Dash => AnimationResource::new(6, 12.0, true),
        AnimAction::Jump | AnimAction::Cast => AnimationResource::new(4, 10.0, false),
        AnimAction::Attack | AnimAction::Hit => AnimationResource::new(3, 12.0, false),
        AnimAction::Death => AnimationResource::new(5, 8.0, false),
    }
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, animation: AnimationResource) {
        self.animations.insert(key.into(), animation);
    }

    /// Register the default frame data for every action of `character`.
    pub fn register_character(&mut self, character: &str) {
        for action in AnimAction::ALL {
            self.insert(ActionString::new(character, action).key(), default_resource(action));
        }
    }

    pub fn get(&self, key: &str) -> Result<&AnimationResource> {
        self.animations
            .get(key)
            .ok_or_else(|| BattleError::UnknownAnimationKey(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.animations.contains_key(key)
    }

    /// Validate a key built from `action_string`.
    pub fn resolve(&self, action_string: &ActionString) -> Result<String> {
        let key = action_string.key();
        self.get(&key)?;
        Ok(key)
    }

    /// The requested key when registered, otherwise the character's idle key.
    pub fn key_or_idle(&self, action_string: &ActionString) -> String {
        match self.resolve(action_string) {
            Ok(key) => key,
            Err(e) => {
                warn!("{}; falling back to idle", e);
                action_string.idle().key()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_character_covers_every_action() {
        let mut store = AnimationStore::new();
        store.register_character("Marle");
        for action in AnimAction::ALL {
            assert!(store.contains(&ActionString::new("Marle", action).key()));
        }
    }

    #[test]
    fn unknown_key_is_an_error() {
        let store = AnimationStore::new();
        assert_eq!(
            store.get("Nobody_idle"),
            Err(BattleError::UnknownAnimationKey("Nobody_idle".into()))
        );
    }

    #[test]
    fn key_or_idle_falls_back() {
        let mut store = AnimationStore::new();
        store.insert("Robo_idle", AnimationResource::new(2, 4.0, true));
        let key = store.key_or_idle(&ActionString::new("Robo", AnimAction::Jump));
        assert_eq!(key, "Robo_idle");

        store.insert("Robo_jump", AnimationResource::new(2, 4.0, false));
        let key = store.key_or_idle(&ActionString::new("Robo", AnimAction::Jump));
        assert_eq!(key, "Robo_jump");
    }
}
