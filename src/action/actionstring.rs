//! Animation key construction.
//!
//! Animations are registered per character under `"{name}_{action}"`, for
//! example `"Lucca_attack"`. Action slots never spell keys by hand; they ask
//! for an [`AnimAction`] and let [`ActionString`] build the key so the naming
//! convention lives in one place.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimAction {
    Idle,
    Walk,
    Dash,
    Jump,
    Attack,
    Cast,
    Hit,
    Victory,
    Death,
}

impl AnimAction {
    pub const ALL: [AnimAction; 9] = [
        AnimAction::Idle,
        AnimAction::Walk,
        AnimAction::Dash,
        AnimAction::Jump,
        AnimAction::Attack,
        AnimAction::Cast,
        AnimAction::Hit,
        AnimAction::Victory,
        AnimAction::Death,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnimAction::Idle => "idle",
            AnimAction::Walk => "walk",
            AnimAction::Dash => "dash",
            AnimAction::Jump => "jump",
            AnimAction::Attack => "attack",
            AnimAction::Cast => "cast",
            AnimAction::Hit => "hit",
            AnimAction::Victory => "victory",
            AnimAction::Death => "death",
        }
    }
}

/// Key of one character's animation for one action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionString {
    pub character: String,
    pub action: AnimAction,
}

impl ActionString {
    pub fn new(character: impl Into<String>, action: AnimAction) -> Self {
        ActionString {
            character: character.into(),
            action,
        }
    }

    /// The same character's idle key, used when a lookup misses.
    pub fn idle(&self) -> ActionString {
        ActionString::new(self.character.clone(), AnimAction::Idle)
    }

    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ActionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.character, self.action.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_joins_name_and_action() {
        assert_eq!(ActionString::new("Lucca", AnimAction::Attack).key(), "Lucca_attack");
        assert_eq!(ActionString::new("Imp", AnimAction::Death).key(), "Imp_death");
    }

    #[test]
    fn idle_keeps_character() {
        let hit = ActionString::new("Frog", AnimAction::Hit);
        assert_eq!(hit.idle().key(), "Frog_idle");
    }

    #[test]
    fn action_names_are_unique() {
        let mut names: Vec<_> = AnimAction::ALL.iter().map(|a| a.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), AnimAction::ALL.len());
    }
}
