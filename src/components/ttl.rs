//! Time-to-live component for automatic entity despawning.
//!
//! The [`Ttl`] component counts down time each tick. When the remaining time
//! reaches zero, the entity is despawned. Effect markers spawned by the
//! `DisplayEffect` action slot carry one so they clean themselves up.
//!
//! # Related
//!
//! - [`crate::systems::ttl::ttl_system`] – system that updates and despawns entities
//! - [`crate::components::effect::VisualEffect`] – the marker that uses it

use bevy_ecs::prelude::Component;

/// Time-to-live component that automatically despawns entities after a duration.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ttl {
    /// Remaining time in milliseconds before despawn.
    pub remaining: f32,
}

impl Ttl {
    /// Create a new Ttl with the given duration in milliseconds.
    pub fn new(millis: f32) -> Self {
        Ttl { remaining: millis }
    }
}
