//! Stat block and ability flags of a combatant.
//!
//! Both are filled from roster content before the battle starts and are
//! treated as opaque input by the timing core, except for `hp` (damage),
//! `chrono_force` (regeneration) and `speed` (readiness rate).

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::status::StatusEffects;

#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub level: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub accuracy: i32,
    pub magic: i32,
    pub magic_defense: i32,
    pub time_affinity: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub chrono_force: f32,
    pub max_chrono_force: f32,
}

impl Default for Stats {
    fn default() -> Self {
        Stats {
            level: 1,
            attack: 1,
            defense: 0,
            speed: 10,
            accuracy: 0,
            magic: 0,
            magic_defense: 0,
            time_affinity: 0,
            hp: 1,
            max_hp: 1,
            mp: 0,
            max_mp: 0,
            chrono_force: 0.0,
            max_chrono_force: 0.0,
        }
    }
}

impl Stats {
    /// Subtract `amount` from HP, keeping it within `[0, max_hp]`.
    ///
    /// Negative amounts count as zero. Sets `DEATH` when HP reaches zero.
    /// Returns the HP actually removed.
    pub fn take_damage(&mut self, amount: i32, status: &mut StatusEffects) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0)).clamp(0, self.max_hp.max(0));
        if self.hp == 0 {
            status.insert(StatusEffects::DEATH);
        }
        before - self.hp
    }

    pub fn is_alive(&self, status: StatusEffects) -> bool {
        self.hp > 0 && !status.is_dead()
    }

    /// Regenerate chrono force toward its maximum.
    ///
    /// Runs every tick regardless of readiness; frozen while Stopped or
    /// Shattered.
    pub fn regen_chrono_force(&mut self, elapsed_ms: f32, status: StatusEffects, scale: f32) {
        if status.blocks_chrono_force() || self.chrono_force >= self.max_chrono_force {
            return;
        }
        let gain = elapsed_ms * self.time_affinity as f32 * scale;
        self.chrono_force = (self.chrono_force + gain).min(self.max_chrono_force);
    }
}

/// Result of an ability query: does the combatant have it, and can it be
/// used right now given its status effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Availability {
    pub available: bool,
    pub active: bool,
}

impl Availability {
    fn gated(available: bool, blocked: bool) -> Self {
        Availability {
            available,
            active: available && !blocked,
        }
    }
}

#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Abilities {
    pub attack: bool,
    pub skill: bool,
    pub time: bool,
    pub anti: bool,
    pub item: bool,
}

impl Default for Abilities {
    fn default() -> Self {
        Abilities {
            attack: true,
            skill: false,
            time: false,
            anti: false,
            item: true,
        }
    }
}

impl Abilities {
    pub fn attack(&self, _status: StatusEffects) -> Availability {
        Availability::gated(self.attack, false)
    }

    pub fn skill(&self, status: StatusEffects) -> Availability {
        Availability::gated(self.skill, status.contains(StatusEffects::LOCKED))
    }

    pub fn time(&self, status: StatusEffects) -> Availability {
        Availability::gated(self.time, status.contains(StatusEffects::SHATTERED))
    }

    pub fn anti(&self, status: StatusEffects) -> Availability {
        Availability::gated(self.anti, status.contains(StatusEffects::SHATTERED))
    }

    pub fn item(&self, _status: StatusEffects) -> Availability {
        Availability::gated(self.item, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn stats_with_hp(hp: i32) -> Stats {
        Stats {
            hp,
            max_hp: hp,
            ..Stats::default()
        }
    }

    #[test]
    fn take_damage_subtracts() {
        let mut stats = stats_with_hp(25);
        let mut status = StatusEffects::empty();
        assert_eq!(stats.take_damage(10, &mut status), 10);
        assert_eq!(stats.hp, 15);
        assert!(!status.is_dead());
    }

    #[test]
    fn take_damage_clamps_and_sets_death() {
        let mut stats = stats_with_hp(5);
        let mut status = StatusEffects::empty();
        assert_eq!(stats.take_damage(12, &mut status), 5);
        assert_eq!(stats.hp, 0);
        assert!(status.is_dead());
        assert!(!stats.is_alive(status));
    }

    #[test]
    fn negative_damage_never_heals_past_max() {
        let mut stats = stats_with_hp(25);
        let mut status = StatusEffects::empty();
        assert_eq!(stats.take_damage(-10, &mut status), 0);
        assert_eq!(stats.hp, 25);
        assert!(!status.is_dead());
    }

    #[test]
    fn regen_caps_at_max() {
        let mut stats = Stats {
            time_affinity: 10,
            chrono_force: 0.0,
            max_chrono_force: 1.0,
            ..Stats::default()
        };
        stats.regen_chrono_force(16.0, StatusEffects::empty(), 0.001);
        assert!(approx_eq(stats.chrono_force, 0.16));
        stats.regen_chrono_force(1000.0, StatusEffects::empty(), 0.001);
        assert!(approx_eq(stats.chrono_force, 1.0));
    }

    #[test]
    fn regen_frozen_when_stopped_or_shattered() {
        let mut stats = Stats {
            time_affinity: 10,
            max_chrono_force: 100.0,
            ..Stats::default()
        };
        stats.regen_chrono_force(100.0, StatusEffects::STOPPED, 0.01);
        stats.regen_chrono_force(100.0, StatusEffects::SHATTERED, 0.01);
        assert!(approx_eq(stats.chrono_force, 0.0));
        stats.regen_chrono_force(100.0, StatusEffects::SLEEP, 0.01);
        assert!(approx_eq(stats.chrono_force, 10.0));
    }

    #[test]
    fn locked_blocks_skill_only() {
        let abilities = Abilities {
            skill: true,
            time: true,
            ..Abilities::default()
        };
        let skill = abilities.skill(StatusEffects::LOCKED);
        assert!(skill.available);
        assert!(!skill.active);
        assert!(abilities.time(StatusEffects::LOCKED).active);
        assert!(abilities.attack(StatusEffects::LOCKED).active);
    }

    #[test]
    fn shattered_blocks_time_and_anti() {
        let abilities = Abilities {
            time: true,
            anti: true,
            ..Abilities::default()
        };
        assert!(!abilities.time(StatusEffects::SHATTERED).active);
        assert!(!abilities.anti(StatusEffects::SHATTERED).active);
        assert!(abilities.item(StatusEffects::SHATTERED).active);
    }

    #[test]
    fn missing_ability_is_never_active() {
        let abilities = Abilities::default();
        let anti = abilities.anti(StatusEffects::empty());
        assert!(!anti.available);
        assert!(!anti.active);
    }
}
