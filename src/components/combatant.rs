//! Identity of a battle participant.
//!
//! A combatant is a plain entity carrying [`Combatant`] plus the stat,
//! status, readiness and visual components. Player- versus AI-driven
//! behavior is a [`Control`] tag looked up in the
//! [`StrategyTable`](crate::resources::strategy::StrategyTable) rather than a
//! type hierarchy.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Which roster a combatant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    pub fn is_enemy(self) -> bool {
        self == Side::Enemy
    }

    pub fn from_is_enemy(is_enemy: bool) -> Side {
        if is_enemy { Side::Enemy } else { Side::Player }
    }
}

/// Who picks commands when the combatant becomes ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Control {
    /// Commands come from the (external) battle menu.
    #[default]
    Player,
    /// Commands come from a strategy function.
    Ai,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Combatant {
    pub name: String,
    /// Index into the owning party.
    pub slot: usize,
    pub side: Side,
    pub control: Control,
    /// Where the combatant stands when idle; attack scripts walk back here.
    pub home: glam::Vec2,
}

impl Combatant {
    pub fn new(name: impl Into<String>, slot: usize, side: Side, control: Control) -> Self {
        Combatant {
            name: name.into(),
            slot,
            side,
            control,
            home: glam::Vec2::ZERO,
        }
    }

    pub fn with_home(mut self, home: glam::Vec2) -> Self {
        self.home = home;
        self
    }
}
