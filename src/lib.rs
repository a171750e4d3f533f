//! ChronoForce battle core.
//!
//! Real-time readiness timers decide turn order; commands become action
//! scripts, small programs of timed slots (move, wait, show, damage) that a
//! director plays one after another. Everything is built on `bevy_ecs`:
//! combatants are entities, the battle state lives in resources, and systems
//! talk through messages.
//!
//! - [`action`] – action slots, scripts and the actor seam they act through
//! - [`components`] – combatant data and the visual handles the renderer reads
//! - [`events`] – messages between battle systems
//! - [`game`] – battle lifecycle: start, schedule, tick, end
//! - [`resources`] – engine, directors, configuration and registries
//! - [`roster`] – JSON party content
//! - [`systems`] – the systems of the battle schedule

pub mod action;
pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod roster;
pub mod systems;
