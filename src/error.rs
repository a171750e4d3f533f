//! Error type shared by the battle core.
//!
//! Structural misuse (missing battle, bad party, malformed scripts) is
//! reported as an error before any timer starts. Animation-key misses are
//! recoverable: callers log them and fall back to the idle key.

use thiserror::Error;

use crate::components::combatant::Side;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BattleError {
    #[error("Precondition violated: {0}")]
    PreconditionViolated(String),

    #[error("Malformed action script at slot {index}: {reason}")]
    MalformedScript { index: usize, reason: &'static str },

    #[error("Unknown animation key: {0}")]
    UnknownAnimationKey(String),

    #[error("No {side:?} combatant in party slot {slot}")]
    UnknownCombatant { side: Side, slot: usize },

    #[error("Combatant is missing component {0}")]
    MissingComponent(&'static str),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Roster error: {0}")]
    Roster(String),
}

pub type Result<T> = std::result::Result<T, BattleError>;
