//! Script scheduling.
//!
//! A [`Director`] owns a FIFO of [`ActionScript`]s and runs at most one of
//! them at a time. Starting the next script is throttled: while idle with
//! work queued, elapsed time accumulates against `delay_ms`, and only once
//! that is reached is a script dequeued and started. A burst of commands
//! issued on the same tick therefore plays out one after another instead of
//! animating on top of each other.
//!
//! [`BattleDirector`] is the battle's director resource. Besides scheduling
//! it builds the scripts for battle commands; its system turns finished
//! scripts into [`ActionDone`](crate::events::action::ActionDone) messages.
//!
//! # Related
//!
//! - [`crate::resources::worlddirector::WorldDirector`] – map-side director with unthrottled NPC slots
//! - [`crate::systems::director::battle_director_system`] – ticks the battle director

use std::collections::VecDeque;

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::action::actors::ActorAccess;
use crate::action::script::ActionScript;
use crate::action::slot::{ActionSlot, Target};
use crate::components::combatant::Side;
use crate::error::Result;

/// Default pause between two scripts, in milliseconds.
pub const DEFAULT_DELAY_MS: f32 = 100.0;

/// Frames an attacker takes to close in on its target.
pub const APPROACH_FRAMES: u32 = 8;
/// Frames an attacker takes to walk back home.
pub const RETREAT_FRAMES: u32 = 10;
/// Frames a caster holds its casting pose before the spell lands.
pub const CAST_FRAMES: u32 = 6;
/// Horizontal gap kept between attacker and target when striking.
pub const STRIKE_GAP: f32 = 24.0;

/// Returned by [`Director::update`] when the active script finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedScript {
    pub owner: Option<Entity>,
}

#[derive(Debug)]
pub struct Director {
    queue: VecDeque<ActionScript>,
    active: Option<ActionScript>,
    delay_ms: f32,
    waited_ms: f32,
    started: u64,
}

impl Default for Director {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_MS)
    }
}

impl Director {
    pub fn new(delay_ms: f32) -> Self {
        Director {
            queue: VecDeque::new(),
            active: None,
            delay_ms,
            waited_ms: 0.0,
            started: 0,
        }
    }

    pub fn add_action_script(&mut self, script: ActionScript) {
        debug!(
            "Queued script for {:?} ({} slots, {} pending)",
            script.owner(),
            script.slots().len(),
            self.queue.len() + 1
        );
        self.queue.push_back(script);
    }

    pub fn has_active_script(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_script(&self) -> Option<&ActionScript> {
        self.active.as_ref()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.queue.is_empty()
    }

    /// Number of scripts started since creation.
    pub fn started_count(&self) -> u64 {
        self.started
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    /// Whether `owner` has a script queued or running.
    pub fn has_script_for(&self, owner: Entity) -> bool {
        self.active
            .iter()
            .chain(self.queue.iter())
            .any(|script| script.owner() == Some(owner))
    }

    /// Advance the director by one tick.
    ///
    /// Returns the finished script's owner on the tick the active script
    /// completes. A script started on this tick is first updated on the next.
    /// Queued scripts whose owner can no longer act are dropped without
    /// reporting completion.
    pub fn update<A: ActorAccess + ?Sized>(
        &mut self,
        elapsed_ms: f32,
        actors: &mut A,
    ) -> Option<FinishedScript> {
        if let Some(script) = self.active.as_mut() {
            if !script.update(elapsed_ms, actors) {
                return None;
            }
            let owner = script.owner();
            self.active = None;
            self.waited_ms = 0.0;
            debug!("Script for {:?} finished", owner);
            return Some(FinishedScript { owner });
        }

        if self.queue.is_empty() {
            return None;
        }
        self.waited_ms += elapsed_ms;
        if self.waited_ms < self.delay_ms {
            return None;
        }
        self.waited_ms = 0.0;
        while let Some(mut script) = self.queue.pop_front() {
            if let Some(owner) = script.owner().filter(|&owner| !actors.can_act(owner)) {
                info!("Dropped script for {:?}: owner can no longer act", owner);
                for popup in script.popups() {
                    actors.discard_popup(popup);
                }
                script.abort();
                continue;
            }
            script.start();
            self.started += 1;
            self.active = Some(script);
            break;
        }
        None
    }

    /// Drop the active and every queued script. None of them reports
    /// completion afterwards.
    pub fn abort(&mut self) {
        if let Some(script) = self.active.as_mut() {
            script.abort();
        }
        let dropped = self.queue.len() + usize::from(self.active.is_some());
        if dropped > 0 {
            info!("Director aborted {} script(s)", dropped);
        }
        self.active = None;
        self.queue.clear();
        self.waited_ms = 0.0;
    }
}

/// Director resource for a battle, plus the script builders for commands.
#[derive(Resource, Debug, Default)]
pub struct BattleDirector {
    pub director: Director,
}

impl BattleDirector {
    pub fn new(delay_ms: f32) -> Self {
        BattleDirector {
            director: Director::new(delay_ms),
        }
    }

    pub fn add_action_script(&mut self, script: ActionScript) {
        self.director.add_action_script(script);
    }

    pub fn update<A: ActorAccess + ?Sized>(
        &mut self,
        elapsed_ms: f32,
        actors: &mut A,
    ) -> Option<FinishedScript> {
        self.director.update(elapsed_ms, actors)
    }

    pub fn abort(&mut self) {
        self.director.abort();
    }

    /// Where an attacker from `side` stands to strike a target at `target_pos`.
    pub fn strike_position(side: Side, target_pos: Vec2) -> Vec2 {
        match side {
            Side::Player => target_pos + Vec2::new(STRIKE_GAP, 0.0),
            Side::Enemy => target_pos - Vec2::new(STRIKE_GAP, 0.0),
        }
    }

    /// Melee attack: approach, swing, then the target reacts, takes the
    /// damage and shows the number together, then the attacker walks home.
    pub fn attack_script(
        attacker: Entity,
        side: Side,
        home: Vec2,
        target: Entity,
        target_pos: Vec2,
        damage: i32,
        popup: Entity,
    ) -> Result<ActionScript> {
        let strike = Self::strike_position(side, target_pos);
        ActionScript::new(
            Some(attacker),
            vec![
                ActionSlot::dash_to(attacker, Target::Absolute(strike), APPROACH_FRAMES),
                ActionSlot::show_attack(attacker),
                ActionSlot::begin(),
                ActionSlot::show_hit(target),
                ActionSlot::take_damage(target, damage),
                ActionSlot::show_text(popup),
                ActionSlot::end(),
                ActionSlot::move_to(attacker, Target::Absolute(home), RETREAT_FRAMES),
            ],
        )
    }

    /// Spell: hold the casting pose, then effect, damage and number land
    /// together on the target.
    pub fn cast_script(
        caster: Entity,
        target: Entity,
        effect: &str,
        damage: i32,
        popup: Entity,
    ) -> Result<ActionScript> {
        ActionScript::new(
            Some(caster),
            vec![
                ActionSlot::show_casting(caster),
                ActionSlot::wait(CAST_FRAMES),
                ActionSlot::begin(),
                ActionSlot::display_effect(target, effect),
                ActionSlot::take_damage(target, damage),
                ActionSlot::show_text(popup),
                ActionSlot::end(),
            ],
        )
    }

    /// Every survivor of the winning side celebrates at once.
    pub fn victory_script(winners: &[Entity]) -> Result<ActionScript> {
        let mut slots = Vec::with_capacity(winners.len() + 2);
        if !winners.is_empty() {
            slots.push(ActionSlot::begin());
            slots.extend(winners.iter().map(|&e| ActionSlot::show_victory(e)));
            slots.push(ActionSlot::end());
        }
        ActionScript::new(None, slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::actors::ActorAccess;
    use crate::action::slot::{FRAME_DELAY_MS, SlotKind};
    use crate::action::testing::{TestActors, spawn_entities};

    fn wait_script(owner: Option<Entity>, frames: u32) -> ActionScript {
        ActionScript::new(owner, vec![ActionSlot::wait(frames)]).unwrap()
    }

    #[test]
    fn first_script_waits_for_the_throttle() {
        let mut actors = TestActors::default();
        let mut director = Director::new(100.0);
        director.add_action_script(wait_script(None, 1));

        for _ in 0..6 {
            director.update(16.0, &mut actors);
        }
        assert_eq!(director.started_count(), 0);
        director.update(16.0, &mut actors);
        assert_eq!(director.started_count(), 1);
        assert!(director.has_active_script());
    }

    #[test]
    fn burst_is_paced_after_each_completion() {
        let [a, b, c] = spawn_entities();
        let mut actors = TestActors::default();
        let mut director = Director::new(100.0);
        director.add_action_script(wait_script(Some(a), 1));
        director.add_action_script(wait_script(Some(b), 1));
        director.add_action_script(wait_script(Some(c), 1));

        // 100ms of throttle, then the first script starts.
        director.update(50.0, &mut actors);
        director.update(50.0, &mut actors);
        assert_eq!(director.started_count(), 1);

        // One frame of waiting finishes it.
        let done = director.update(FRAME_DELAY_MS, &mut actors);
        assert_eq!(done, Some(FinishedScript { owner: Some(a) }));
        assert_eq!(director.started_count(), 1);

        // Less than the delay after completion: second script still queued.
        director.update(40.0, &mut actors);
        director.update(40.0, &mut actors);
        assert_eq!(director.started_count(), 1);
        assert_eq!(director.pending(), 2);

        director.update(20.0, &mut actors);
        assert_eq!(director.started_count(), 2);
        assert_eq!(director.pending(), 1);
    }

    #[test]
    fn completion_reports_owner_once() {
        let [a] = spawn_entities();
        let mut actors = TestActors::default();
        let mut director = Director::new(0.0);
        director.add_action_script(wait_script(Some(a), 0));

        assert_eq!(director.update(0.0, &mut actors), None);
        assert_eq!(
            director.update(0.0, &mut actors),
            Some(FinishedScript { owner: Some(a) })
        );
        assert_eq!(director.update(0.0, &mut actors), None);
        assert!(director.is_idle());
    }

    #[test]
    fn scripts_of_fallen_owners_are_dropped_before_starting() {
        let [dead, alive, popup] = spawn_entities();
        let mut actors = TestActors::default()
            .with_actor(dead, Vec2::ZERO, 0)
            .with_actor(alive, Vec2::ZERO, 10)
            .with_popup(popup);
        let mut director = Director::new(0.0);
        director.add_action_script(
            ActionScript::new(
                Some(dead),
                vec![ActionSlot::show_attack(dead), ActionSlot::show_text(popup)],
            )
            .unwrap(),
        );
        director.add_action_script(wait_script(Some(alive), 0));

        director.update(0.0, &mut actors);
        assert_eq!(director.started_count(), 1);
        assert_eq!(director.active_script().and_then(|s| s.owner()), Some(alive));
        assert!(!actors.popups.contains_key(&popup));
        assert!(actors.played.is_empty());

        assert_eq!(
            director.update(0.0, &mut actors),
            Some(FinishedScript { owner: Some(alive) })
        );
        assert!(director.is_idle());
    }

    #[test]
    fn has_script_for_sees_active_and_queued() {
        let [a, b, c] = spawn_entities();
        let mut actors = TestActors::default();
        let mut director = Director::new(0.0);
        director.add_action_script(wait_script(Some(a), 5));
        director.add_action_script(wait_script(Some(b), 5));
        director.update(0.0, &mut actors);

        assert!(director.has_script_for(a));
        assert!(director.has_script_for(b));
        assert!(!director.has_script_for(c));
    }

    #[test]
    fn abort_drops_everything() {
        let mut actors = TestActors::default();
        let mut director = Director::new(0.0);
        director.add_action_script(wait_script(None, 3));
        director.add_action_script(wait_script(None, 3));
        director.update(0.0, &mut actors);
        assert!(director.has_active_script());

        director.abort();
        assert!(director.is_idle());
        for _ in 0..10 {
            assert_eq!(director.update(FRAME_DELAY_MS, &mut actors), None);
        }
        assert_eq!(director.started_count(), 1);
    }

    #[test]
    fn attack_script_groups_the_impact() {
        let [attacker, target, popup] = spawn_entities();
        let script = BattleDirector::attack_script(
            attacker,
            Side::Player,
            Vec2::new(200.0, 100.0),
            target,
            Vec2::new(40.0, 100.0),
            12,
            popup,
        )
        .unwrap();
        let kinds: Vec<_> = script.slots().iter().map(|s| s.kind().clone()).collect();
        assert_eq!(
            kinds[0],
            SlotKind::DashTo {
                actor: attacker,
                target: Target::Absolute(Vec2::new(64.0, 100.0)),
                frames: APPROACH_FRAMES
            }
        );
        assert_eq!(kinds[2], SlotKind::Begin);
        assert_eq!(kinds[4], SlotKind::TakeDamage { actor: target, damage: 12 });
        assert_eq!(kinds[6], SlotKind::End);
        assert_eq!(script.owner(), Some(attacker));
    }

    #[test]
    fn attack_script_plays_out_end_to_end() {
        let [attacker, target, popup] = spawn_entities();
        let home = Vec2::new(200.0, 100.0);
        let mut actors = TestActors::default()
            .with_actor(attacker, home, 30)
            .with_actor(target, Vec2::new(40.0, 100.0), 25)
            .with_popup(popup);
        let mut battle = BattleDirector::new(0.0);
        battle.add_action_script(
            BattleDirector::attack_script(
                attacker,
                Side::Player,
                home,
                target,
                Vec2::new(40.0, 100.0),
                10,
                popup,
            )
            .unwrap(),
        );

        let mut finished = None;
        for tick in 0..200 {
            if tick == 20 {
                actors.finish_popup(popup);
            }
            if let Some(done) = battle.update(FRAME_DELAY_MS, &mut actors) {
                finished = Some(done);
                break;
            }
        }
        assert_eq!(finished, Some(FinishedScript { owner: Some(attacker) }));
        assert_eq!(actors.hp[&target], 15);
        assert_eq!(actors.position(attacker), Some(home));
    }

    #[test]
    fn victory_script_for_nobody_is_empty() {
        let script = BattleDirector::victory_script(&[]).unwrap();
        assert!(script.slots().is_empty());
    }
}
