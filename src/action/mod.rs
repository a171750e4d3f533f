//! Action scripting: the small interpreter that sequences battle animations.
//!
//! - [`actionstring`] – animation key naming convention
//! - [`actors`] – the [`ActorAccess`](actors::ActorAccess) seam slots act through
//! - [`slot`] – a single timed unit of work (move, wait, show, damage)
//! - [`script`] – an ordered program of slots with Begin/End grouping
//!
//! Scripts are queued on a [`Director`](crate::resources::director::Director),
//! which paces how quickly they start.

pub mod actionstring;
pub mod actors;
pub mod script;
pub mod slot;

#[cfg(test)]
pub(crate) mod testing {
    use bevy_ecs::prelude::{Entity, World};
    use glam::Vec2;
    use rustc_hash::FxHashMap;

    use super::actionstring::AnimAction;
    use super::actors::ActorAccess;

    /// Distinct entity handles for tests that never touch a world.
    pub(crate) fn spawn_entities<const N: usize>() -> [Entity; N] {
        let mut world = World::new();
        std::array::from_fn(|_| world.spawn_empty().id())
    }

    /// Map-backed [`ActorAccess`] that records everything done to it.
    #[derive(Default)]
    pub(crate) struct TestActors {
        pub positions: FxHashMap<Entity, Vec2>,
        pub hp: FxHashMap<Entity, i32>,
        pub played: Vec<(Entity, AnimAction)>,
        /// Popup handle to "done" flag.
        pub popups: FxHashMap<Entity, bool>,
        pub started_popups: Vec<Entity>,
        pub effects: Vec<(Entity, String)>,
    }

    impl TestActors {
        pub(crate) fn with_actor(mut self, actor: Entity, pos: Vec2, hp: i32) -> Self {
            self.positions.insert(actor, pos);
            self.hp.insert(actor, hp);
            self
        }

        pub(crate) fn with_popup(mut self, popup: Entity) -> Self {
            self.popups.insert(popup, false);
            self
        }

        pub(crate) fn finish_popup(&mut self, popup: Entity) {
            self.popups.insert(popup, true);
        }
    }

    impl ActorAccess for TestActors {
        fn position(&self, actor: Entity) -> Option<Vec2> {
            self.positions.get(&actor).copied()
        }

        fn set_position(&mut self, actor: Entity, pos: Vec2) {
            self.positions.insert(actor, pos);
        }

        fn play(&mut self, actor: Entity, action: AnimAction) {
            self.played.push((actor, action));
        }

        fn apply_damage(&mut self, actor: Entity, damage: i32) -> Option<(i32, bool)> {
            let hp = self.hp.get_mut(&actor)?;
            let before = *hp;
            *hp = (*hp - damage.max(0)).max(0);
            Some((before - *hp, *hp == 0))
        }

        fn start_popup(&mut self, popup: Entity) {
            if self.popups.contains_key(&popup) && !self.started_popups.contains(&popup) {
                self.started_popups.push(popup);
            }
        }

        fn popup_done(&self, popup: Entity) -> bool {
            self.popups.get(&popup).copied().unwrap_or(true)
        }

        fn display_effect(&mut self, actor: Entity, effect: &str) {
            self.effects.push((actor, effect.to_string()));
        }

        fn can_act(&self, actor: Entity) -> bool {
            self.hp.get(&actor).is_none_or(|hp| *hp > 0)
        }

        fn discard_popup(&mut self, popup: Entity) {
            self.popups.remove(&popup);
        }
    }
}
