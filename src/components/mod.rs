//! ECS components for battle entities.
//!
//! Submodules overview:
//! - [`animation`] – playback state of the current animation key
//! - [`combatant`] – identity, side, party slot and control tag
//! - [`effect`] – short-lived effect markers spawned by action slots
//! - [`mapposition`] – world-space position of an entity
//! - [`readiness`] – per-combatant readiness timer
//! - [`stats`] – stat block and ability availability
//! - [`status`] – bit-flag status effects
//! - [`textpopup`] – floating battle text
//! - [`ttl`] – countdown after which an entity is despawned

pub mod animation;
pub mod combatant;
pub mod effect;
pub mod mapposition;
pub mod readiness;
pub mod stats;
pub mod status;
pub mod textpopup;
pub mod ttl;
