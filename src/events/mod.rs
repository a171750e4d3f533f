//! Messages exchanged between battle systems.
//!
//! Completion is poll-based inside the action layer; these messages carry it
//! across system boundaries. Every message type is registered by
//! [`crate::game::start_battle`] and rotated once per tick by
//! [`crate::systems::messages::update_battle_messages`].
//!
//! Submodules:
//! - [`ready`] – a combatant's readiness timer crossed the threshold
//! - [`action`] – an action script owned by a combatant finished
//! - [`outcome`] – the battle was won or lost
pub mod action;
pub mod outcome;
pub mod ready;
