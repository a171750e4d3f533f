//! Per-combatant readiness timer.
//!
//! The timer climbs every tick at a rate derived from the combatant's speed.
//! Crossing [`READY_THRESHOLD`] reports the combatant ready exactly once; the
//! latch (`timer_called`) only clears when the timer is explicitly set again,
//! which happens after the combatant's action script completes.
//!
//! # Related
//!
//! - [`crate::systems::readiness::readiness_system`] – advances every timer
//! - [`crate::events::ready::ReadyMessage`] – written on each crossing

use bevy_ecs::prelude::Component;

use crate::components::status::StatusEffects;

/// Timer value at which a combatant becomes ready.
pub const READY_THRESHOLD: f32 = 100.0;

/// The two multiplicative tuning constants applied to `elapsed * speed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerScales {
    pub timer_scale: f32,
    pub speed_scale: f32,
}

impl Default for TimerScales {
    fn default() -> Self {
        TimerScales {
            timer_scale: 0.02,
            speed_scale: 0.07,
        }
    }
}

#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct Readiness {
    pub timer: f32,
    /// Set when the crossing has been reported; cleared by [`Readiness::set_time`].
    pub timer_called: bool,
    pub battle_going: bool,
}

impl Readiness {
    /// Advance the timer by one tick.
    ///
    /// Returns `true` on the tick the timer crosses [`READY_THRESHOLD`] and
    /// never again until [`Readiness::set_time`] is called. Overshoot past the
    /// threshold is kept; only the crossing matters.
    pub fn advance(
        &mut self,
        elapsed_ms: f32,
        speed: i32,
        status: StatusEffects,
        scales: TimerScales,
    ) -> bool {
        if !self.battle_going || status.blocks_readiness() {
            return false;
        }
        self.timer += elapsed_ms * speed as f32 * scales.timer_scale * scales.speed_scale;
        if self.timer >= READY_THRESHOLD && !self.timer_called {
            self.timer_called = true;
            return true;
        }
        false
    }

    pub fn set_time(&mut self, value: f32) {
        self.timer = value;
        self.timer_called = false;
    }

    /// Seed the timer at battle start so combatants do not all become ready
    /// on the same tick.
    pub fn initialize(&mut self, speed: i32, rng: &mut fastrand::Rng) {
        self.set_time(rng.f32() * speed as f32);
        self.battle_going = true;
    }

    pub fn is_ready(&self) -> bool {
        self.timer_called
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn going() -> Readiness {
        Readiness {
            battle_going: true,
            ..Readiness::default()
        }
    }

    #[test]
    fn does_not_advance_when_battle_not_going() {
        let mut r = Readiness::default();
        assert!(!r.advance(1000.0, 50, StatusEffects::empty(), TimerScales::default()));
        assert_eq!(r.timer, 0.0);
    }

    #[test]
    fn stopped_and_sleeping_never_advance() {
        for status in [StatusEffects::STOPPED, StatusEffects::SLEEP] {
            let mut r = going();
            for elapsed in [0.0, 16.0, 1000.0, 1.0e6] {
                assert!(!r.advance(elapsed, 99, status, TimerScales::default()));
            }
            assert_eq!(r.timer, 0.0);
        }
    }

    #[test]
    fn ready_fires_once_per_crossing() {
        let mut r = going();
        let scales = TimerScales {
            timer_scale: 1.0,
            speed_scale: 1.0,
        };
        let mut fired = 0;
        for _ in 0..30 {
            if r.advance(10.0, 1, StatusEffects::empty(), scales) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert!(r.timer >= 300.0 - 1e-3);

        r.set_time(0.0);
        assert!(!r.is_ready());
        for _ in 0..10 {
            if r.advance(10.0, 1, StatusEffects::empty(), scales) {
                fired += 1;
            }
        }
        assert_eq!(fired, 2);
    }

    #[test]
    fn initialize_seeds_below_speed() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut r = Readiness::default();
        r.initialize(40, &mut rng);
        assert!(r.battle_going);
        assert!(!r.timer_called);
        assert!(r.timer >= 0.0 && r.timer < 40.0);
    }
}
