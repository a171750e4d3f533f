//! Readiness crossings.
//!
//! [`readiness_system`](crate::systems::readiness::readiness_system) writes a
//! [`ReadyMessage`] on the tick a combatant's timer crosses the threshold.
//! The command system reads it to pick the combatant's next command.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

use crate::components::combatant::Side;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyMessage {
    pub entity: Entity,
    pub side: Side,
    /// Party slot of the combatant.
    pub slot: usize,
}
