//! Bit-flag status effects.
//!
//! Several effects gate the battle core directly:
//! - `STOPPED`, `SLEEP` and `DEATH` freeze the readiness timer
//! - `STOPPED` and `SHATTERED` freeze chrono force regeneration
//! - `LOCKED` disables skills, `SHATTERED` disables time and anti abilities
//! - `DEATH` removes the combatant from its party's alive count

use bevy_ecs::prelude::Component;
use bitflags::bitflags;

bitflags! {
    #[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusEffects: u8 {
        const POISON = 1 << 0;
        const SLEEP = 1 << 1;
        const CONFUSION = 1 << 2;
        const LOCKED = 1 << 3;
        const BLIND = 1 << 4;
        const STOPPED = 1 << 5;
        const SHATTERED = 1 << 6;
        const DEATH = 1 << 7;
    }
}

impl Default for StatusEffects {
    fn default() -> Self {
        StatusEffects::empty()
    }
}

impl StatusEffects {
    /// Parse a status name as written in roster files (`"sleep"`, `"Stopped"`).
    pub fn from_label(label: &str) -> Option<StatusEffects> {
        StatusEffects::from_name(&label.to_ascii_uppercase())
    }

    pub fn is_dead(&self) -> bool {
        self.contains(StatusEffects::DEATH)
    }

    /// Whether the readiness timer is frozen.
    pub fn blocks_readiness(&self) -> bool {
        self.intersects(StatusEffects::STOPPED | StatusEffects::SLEEP | StatusEffects::DEATH)
    }

    /// Whether chrono force regeneration is frozen.
    pub fn blocks_chrono_force(&self) -> bool {
        self.intersects(StatusEffects::STOPPED | StatusEffects::SHATTERED)
    }
}
