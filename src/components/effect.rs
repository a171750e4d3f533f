use bevy_ecs::prelude::{Component, Entity};

/// How long a displayed effect marker lives, in milliseconds.
pub const EFFECT_TTL_MS: f32 = 500.0;

/// Marker for a cosmetic effect played on an actor (spell flash, hit spark).
///
/// Spawned by the `DisplayEffect` action slot together with a
/// [`MapPosition`](super::mapposition::MapPosition) and a
/// [`Ttl`](super::ttl::Ttl). The renderer picks the visuals by `name`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct VisualEffect {
    pub name: String,
    pub target: Entity,
}
