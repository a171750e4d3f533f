//! One side of a battle: combatant handles in slot order plus a ready mask.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Entity;

use crate::components::combatant::Side;
use crate::error::{BattleError, Result};

/// Members per party.
pub const PARTY_CAPACITY: usize = 3;

#[derive(Debug, Clone)]
pub struct Party {
    side: Side,
    members: ArrayVec<Entity, PARTY_CAPACITY>,
    ready: [bool; PARTY_CAPACITY],
    alive: [bool; PARTY_CAPACITY],
}

impl Party {
    /// Build a party from its members in slot order. Everyone starts alive
    /// and not ready.
    pub fn new(side: Side, members: &[Entity]) -> Result<Self> {
        if members.is_empty() {
            return Err(BattleError::PreconditionViolated(format!(
                "{:?} party has no members",
                side
            )));
        }
        if members.len() > PARTY_CAPACITY {
            return Err(BattleError::PreconditionViolated(format!(
                "{:?} party has {} members, capacity is {}",
                side,
                members.len(),
                PARTY_CAPACITY
            )));
        }
        let mut alive = [false; PARTY_CAPACITY];
        alive[..members.len()].fill(true);
        Ok(Party {
            side,
            members: members.iter().copied().collect(),
            ready: [false; PARTY_CAPACITY],
            alive,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<Entity> {
        self.members.get(slot).copied()
    }

    pub fn slot_of(&self, entity: Entity) -> Option<usize> {
        self.members.iter().position(|&member| member == entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.slot_of(entity).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.members.iter().copied()
    }

    /// Returns `false` for a slot past the member count.
    pub fn set_ready(&mut self, slot: usize, ready: bool) -> bool {
        if slot >= self.members.len() {
            return false;
        }
        self.ready[slot] = ready;
        true
    }

    pub fn is_ready(&self, slot: usize) -> bool {
        slot < self.members.len() && self.ready[slot]
    }

    pub fn ready_slots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.members.len()).filter(|&slot| self.ready[slot])
    }

    pub fn set_alive(&mut self, slot: usize, alive: bool) {
        if slot < self.members.len() {
            self.alive[slot] = alive;
            if !alive {
                self.ready[slot] = false;
            }
        }
    }

    pub fn is_alive(&self, slot: usize) -> bool {
        slot < self.members.len() && self.alive[slot]
    }

    pub fn alive_count(&self) -> usize {
        self.alive[..self.members.len()].iter().filter(|&&a| a).count()
    }

    /// Members still standing, in slot order.
    pub fn alive_members(&self) -> impl Iterator<Item = Entity> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(slot, _)| self.alive[*slot])
            .map(|(_, &member)| member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::spawn_entities;

    #[test]
    fn rejects_empty_and_oversized_parties() {
        let members: [Entity; 4] = spawn_entities();
        assert!(matches!(
            Party::new(Side::Player, &[]),
            Err(BattleError::PreconditionViolated(_))
        ));
        assert!(matches!(
            Party::new(Side::Enemy, &members),
            Err(BattleError::PreconditionViolated(_))
        ));
        assert!(Party::new(Side::Enemy, &members[..3]).is_ok());
    }

    #[test]
    fn slots_follow_member_order() {
        let [a, b] = spawn_entities();
        let party = Party::new(Side::Player, &[a, b]).unwrap();
        assert_eq!(party.get(0), Some(a));
        assert_eq!(party.get(1), Some(b));
        assert_eq!(party.get(2), None);
        assert_eq!(party.slot_of(b), Some(1));
        assert_eq!(party.iter().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn ready_mask_ignores_missing_slots() {
        let [a, b] = spawn_entities();
        let mut party = Party::new(Side::Player, &[a, b]).unwrap();
        assert!(party.set_ready(1, true));
        assert!(!party.set_ready(2, true));
        assert!(!party.is_ready(2));
        assert_eq!(party.ready_slots().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn death_clears_ready_and_alive_count() {
        let [a, b, c] = spawn_entities();
        let mut party = Party::new(Side::Enemy, &[a, b, c]).unwrap();
        assert_eq!(party.alive_count(), 3);
        party.set_ready(1, true);
        party.set_alive(1, false);
        assert!(!party.is_ready(1));
        assert_eq!(party.alive_count(), 2);
        assert_eq!(party.alive_members().collect::<Vec<_>>(), vec![a, c]);
    }
}
