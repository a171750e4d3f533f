//! The seam between action slots and the world they act on.
//!
//! Slots only hold [`Entity`] handles. Everything they do to an actor goes
//! through [`ActorAccess`], which the ECS implements over queries
//! ([`ActorParams`](crate::systems::director::ActorParams)) and tests can
//! implement over plain maps.

use bevy_ecs::prelude::Entity;
use glam::Vec2;

use crate::action::actionstring::AnimAction;

pub trait ActorAccess {
    /// Current position of the actor, `None` if it no longer exists.
    fn position(&self, actor: Entity) -> Option<Vec2>;

    fn set_position(&mut self, actor: Entity, pos: Vec2);

    /// Switch the actor's animation. Unknown keys fall back to idle.
    fn play(&mut self, actor: Entity, action: AnimAction);

    /// Subtract HP (clamped at zero). Returns the HP actually removed and
    /// whether the hit was lethal, or `None` if the actor has no stats.
    fn apply_damage(&mut self, actor: Entity, damage: i32) -> Option<(i32, bool)>;

    /// Start a text popup if it is idle.
    fn start_popup(&mut self, popup: Entity);

    /// A missing popup counts as done so a slot can never wait forever.
    fn popup_done(&self, popup: Entity) -> bool;

    fn display_effect(&mut self, actor: Entity, effect: &str);

    /// Whether the actor may still perform its own script. Actors without
    /// stats always can.
    fn can_act(&self, actor: Entity) -> bool;

    /// Remove a popup that belongs to a script which will never run.
    fn discard_popup(&mut self, popup: Entity);
}
