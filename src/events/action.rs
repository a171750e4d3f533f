//! Action script completion.
//!
//! Written by the battle director system for every finished script that has
//! an owner. The engine reacts by resetting the owner's readiness timer.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDone {
    /// Combatant whose command produced the script.
    pub owner: Entity,
}
