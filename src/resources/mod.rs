//! ECS resources made available to systems.
//!
//! Overview
//! - `animationstore` – animation definitions keyed by action strings
//! - `battleconfig` – tuning constants loaded from an INI file
//! - `battleengine` – the two parties, ready mask and battle outcome
//! - `director` – script scheduling and the battle director
//! - `party` – one side's combatant handles
//! - `strategy` – control tag to command strategy mapping
//! - `worlddirector` – map-side director with unthrottled NPC slots
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod battleconfig;
pub mod battleengine;
pub mod director;
pub mod party;
pub mod strategy;
pub mod worlddirector;
pub mod worldtime;
