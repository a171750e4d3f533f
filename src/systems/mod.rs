//! Battle systems.
//!
//! Submodules overview
//! - [`animation`] – advance animation frames
//! - [`battle`] – timer reset on script completion, victory/defeat detection
//! - [`command`] – dispatch ready combatants through the strategy table
//! - [`director`] – tick the battle and world directors
//! - [`messages`] – register and rotate battle message queues
//! - [`readiness`] – advance readiness timers and chrono force
//! - [`textpopup`] – advance and despawn text popups
//! - [`time`] – update simulation time and delta
//! - [`ttl`] – despawn effect markers when their time runs out
//!
//! [`crate::game::build_battle_schedule`] chains them in a fixed order.

pub mod animation;
pub mod battle;
pub mod command;
pub mod director;
pub mod messages;
pub mod readiness;
pub mod textpopup;
pub mod time;
pub mod ttl;
