//! Battle coordination resource.
//!
//! [`BattleEngine`] owns both [`Party`]s for the length of one battle. It is
//! inserted by [`crate::game::start_battle`] and removed by
//! [`crate::game::end_battle`]; systems that need it take
//! `Option<ResMut<BattleEngine>>` and do nothing when no battle is running.
//!
//! The engine keeps bookkeeping only (slot handles, ready mask, alive count,
//! outcome). Combatant data lives in components, so the operations that touch
//! stats take them as arguments and the world-level helpers in
//! [`crate::game`] fetch them.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::combatant::Side;
use crate::components::stats::{Abilities, Availability, Stats};
use crate::components::status::StatusEffects;
use crate::error::{BattleError, Result};
use crate::resources::party::Party;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

impl BattleOutcome {
    /// Side whose survivors celebrate.
    pub fn winner(self) -> Side {
        match self {
            BattleOutcome::Victory => Side::Player,
            BattleOutcome::Defeat => Side::Enemy,
        }
    }
}

#[derive(Resource, Debug)]
pub struct BattleEngine {
    players: Party,
    enemies: Party,
    over: bool,
    outcome: Option<BattleOutcome>,
}

impl BattleEngine {
    pub fn new(players: &[Entity], enemies: &[Entity]) -> Result<Self> {
        Ok(BattleEngine {
            players: Party::new(Side::Player, players)?,
            enemies: Party::new(Side::Enemy, enemies)?,
            over: false,
            outcome: None,
        })
    }

    pub fn party(&self, side: Side) -> &Party {
        match side {
            Side::Player => &self.players,
            Side::Enemy => &self.enemies,
        }
    }

    pub fn party_mut(&mut self, side: Side) -> &mut Party {
        match side {
            Side::Player => &mut self.players,
            Side::Enemy => &mut self.enemies,
        }
    }

    /// Entity in `slot` of the player or enemy party.
    pub fn combatant(&self, slot: usize, is_enemy: bool) -> Result<Entity> {
        let side = Side::from_is_enemy(is_enemy);
        self.party(side)
            .get(slot)
            .ok_or(BattleError::UnknownCombatant { side, slot })
    }

    /// Every combatant of both parties, players first.
    pub fn combatants(&self) -> impl Iterator<Item = Entity> + '_ {
        self.players.iter().chain(self.enemies.iter())
    }

    pub fn mark_ready(&mut self, side: Side, slot: usize) {
        self.party_mut(side).set_ready(slot, true);
    }

    /// Clear the ready flag of a slot and return its entity so the caller
    /// can reset the timer component.
    pub fn clear_ready(&mut self, side: Side, slot: usize) -> Result<Entity> {
        let entity = self.combatant(slot, side.is_enemy())?;
        self.party_mut(side).set_ready(slot, false);
        Ok(entity)
    }

    /// Damage of a plain attack: the attacker's attack stat, no variance and
    /// no mitigation. A negative attack stat deals nothing.
    pub fn attack_damage(attacker: &Stats) -> i32 {
        attacker.attack.max(0)
    }

    /// Apply `damage` to a defender and update the alive bookkeeping.
    /// Returns the HP actually removed.
    pub fn apply_damage(
        &mut self,
        side: Side,
        slot: usize,
        stats: &mut Stats,
        status: &mut StatusEffects,
        damage: i32,
    ) -> i32 {
        let dealt = stats.take_damage(damage, status);
        if !stats.is_alive(*status) {
            self.party_mut(side).set_alive(slot, false);
        }
        dealt
    }

    /// Decide the outcome from the alive counts.
    ///
    /// Victory is checked before Defeat. Returns the outcome only on the
    /// call that ends the battle.
    pub fn evaluate(&mut self, player_alive: usize, enemy_alive: usize) -> Option<BattleOutcome> {
        if self.over {
            return None;
        }
        let outcome = if enemy_alive == 0 {
            BattleOutcome::Victory
        } else if player_alive == 0 {
            BattleOutcome::Defeat
        } else {
            return None;
        };
        info!("Battle over: {:?}", outcome);
        self.over = true;
        self.outcome = Some(outcome);
        Some(outcome)
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn has_attack(abilities: &Abilities, status: StatusEffects) -> Availability {
        abilities.attack(status)
    }

    pub fn has_skill(abilities: &Abilities, status: StatusEffects) -> Availability {
        abilities.skill(status)
    }

    pub fn has_time(abilities: &Abilities, status: StatusEffects) -> Availability {
        abilities.time(status)
    }

    pub fn has_anti(abilities: &Abilities, status: StatusEffects) -> Availability {
        abilities.anti(status)
    }

    pub fn has_item(abilities: &Abilities, status: StatusEffects) -> Availability {
        abilities.item(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::spawn_entities;

    fn engine() -> (BattleEngine, [Entity; 4]) {
        let handles: [Entity; 4] = spawn_entities();
        let engine = BattleEngine::new(&handles[..2], &handles[2..]).unwrap();
        (engine, handles)
    }

    #[test]
    fn rejects_empty_party() {
        let [a] = spawn_entities();
        assert!(matches!(
            BattleEngine::new(&[a], &[]),
            Err(BattleError::PreconditionViolated(_))
        ));
    }

    #[test]
    fn combatant_lookup_by_slot() {
        let (engine, [p0, _, e0, e1]) = engine();
        assert_eq!(engine.combatant(0, false), Ok(p0));
        assert_eq!(engine.combatant(0, true), Ok(e0));
        assert_eq!(engine.combatant(1, true), Ok(e1));
        assert_eq!(
            engine.combatant(2, true),
            Err(BattleError::UnknownCombatant { side: Side::Enemy, slot: 2 })
        );
    }

    #[test]
    fn clear_ready_returns_the_entity() {
        let (mut engine, [_, p1, _, _]) = engine();
        engine.mark_ready(Side::Player, 1);
        assert!(engine.party(Side::Player).is_ready(1));
        assert_eq!(engine.clear_ready(Side::Player, 1), Ok(p1));
        assert!(!engine.party(Side::Player).is_ready(1));
    }

    #[test]
    fn attack_damage_is_attack_stat() {
        let attacker = Stats { attack: 10, ..Default::default() };
        let mut defender = Stats { hp: 25, max_hp: 25, ..Default::default() };
        let mut status = StatusEffects::empty();
        let (mut engine, _) = engine();

        let damage = BattleEngine::attack_damage(&attacker);
        let dealt = engine.apply_damage(Side::Enemy, 0, &mut defender, &mut status, damage);
        assert_eq!(dealt, 10);
        assert_eq!(defender.hp, 15);
        assert_eq!(engine.party(Side::Enemy).alive_count(), 2);
    }

    #[test]
    fn negative_attack_deals_nothing() {
        let attacker = Stats { attack: -4, ..Default::default() };
        assert_eq!(BattleEngine::attack_damage(&attacker), 0);
    }

    #[test]
    fn lethal_damage_updates_alive_count() {
        let mut defender = Stats { hp: 5, max_hp: 5, ..Default::default() };
        let mut status = StatusEffects::empty();
        let (mut engine, _) = engine();
        engine.apply_damage(Side::Enemy, 1, &mut defender, &mut status, 8);
        assert_eq!(defender.hp, 0);
        assert!(status.is_dead());
        assert_eq!(engine.party(Side::Enemy).alive_count(), 1);
    }

    #[test]
    fn outcome_is_signalled_once() {
        let (mut engine, _) = engine();
        assert_eq!(engine.evaluate(2, 2), None);
        assert_eq!(engine.evaluate(2, 0), Some(BattleOutcome::Victory));
        assert!(engine.is_over());
        assert_eq!(engine.evaluate(2, 0), None);
        assert_eq!(engine.evaluate(0, 0), None);
        assert_eq!(engine.outcome(), Some(BattleOutcome::Victory));
    }

    #[test]
    fn victory_wins_a_double_knockout() {
        let (mut engine, _) = engine();
        assert_eq!(engine.evaluate(0, 0), Some(BattleOutcome::Victory));
    }

    #[test]
    fn defeat_when_players_fall() {
        let (mut engine, _) = engine();
        assert_eq!(engine.evaluate(0, 1), Some(BattleOutcome::Defeat));
        assert_eq!(BattleOutcome::Defeat.winner(), Side::Enemy);
    }

    #[test]
    fn ability_queries_respect_status() {
        let abilities = Abilities {
            skill: true,
            time: true,
            anti: true,
            ..Default::default()
        };
        let locked = StatusEffects::LOCKED;
        let shattered = StatusEffects::SHATTERED;

        assert_eq!(
            BattleEngine::has_skill(&abilities, locked),
            Availability { available: true, active: false }
        );
        assert!(BattleEngine::has_time(&abilities, locked).active);
        assert!(!BattleEngine::has_time(&abilities, shattered).active);
        assert!(!BattleEngine::has_anti(&abilities, shattered).active);
        assert!(BattleEngine::has_attack(&abilities, shattered).active);
        assert!(BattleEngine::has_item(&abilities, locked | shattered).active);
    }
}
