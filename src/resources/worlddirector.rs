//! Map-side director.
//!
//! Cutscene scripts go through the throttled [`Director`]. Ambient NPC motion
//! does not: NPC slots sit in a bounded list and are ticked every update
//! until they finish. The party leader has one dedicated movement slot that
//! is retargeted on every [`WorldDirector::move_party`] call instead of
//! allocating a new slot per step.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::action::actors::ActorAccess;
use crate::action::script::ActionScript;
use crate::action::slot::{ActionSlot, SlotKind, Target};
use crate::resources::director::{Director, FinishedScript};

/// NPC slots that can run at once.
pub const MAX_NPC_SLOTS: usize = 16;

#[derive(Resource, Debug, Default)]
pub struct WorldDirector {
    pub director: Director,
    npc_slots: ArrayVec<ActionSlot, MAX_NPC_SLOTS>,
    party_move: Option<ActionSlot>,
}

impl WorldDirector {
    pub fn new(delay_ms: f32) -> Self {
        WorldDirector {
            director: Director::new(delay_ms),
            npc_slots: ArrayVec::new(),
            party_move: None,
        }
    }

    pub fn add_action_script(&mut self, script: ActionScript) {
        self.director.add_action_script(script);
    }

    /// Run `slot` unthrottled from the next update. Returns `false` and drops
    /// the slot when the list is full.
    pub fn add_npc_slot(&mut self, slot: ActionSlot) -> bool {
        match self.npc_slots.try_push(slot) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "NPC slot list full ({} slots), dropping {:?}",
                    MAX_NPC_SLOTS,
                    err.element().kind()
                );
                false
            }
        }
    }

    pub fn npc_slot_count(&self) -> usize {
        self.npc_slots.len()
    }

    /// Send the party leader toward `target`, replacing any move in progress.
    pub fn move_party(&mut self, leader: Entity, target: Target, frames: u32) {
        match self.party_move.as_mut() {
            Some(slot) if slot_actor(slot) == Some(leader) => {
                slot.retarget(target, frames);
            }
            _ => {
                self.party_move = Some(ActionSlot::move_to(leader, target, frames));
            }
        }
    }

    pub fn party_moving(&self) -> bool {
        self.party_move
            .as_ref()
            .is_some_and(|slot| !slot.is_finished())
    }

    /// Tick the party move, every NPC slot and the script director.
    pub fn update<A: ActorAccess + ?Sized>(
        &mut self,
        elapsed_ms: f32,
        actors: &mut A,
    ) -> Option<FinishedScript> {
        if let Some(slot) = self.party_move.as_mut() {
            slot.update(elapsed_ms, actors);
        }

        for slot in self.npc_slots.iter_mut() {
            slot.update(elapsed_ms, actors);
        }
        let before = self.npc_slots.len();
        self.npc_slots.retain(|slot| !slot.is_finished());
        if self.npc_slots.len() != before {
            debug!("{} NPC slot(s) finished", before - self.npc_slots.len());
        }

        self.director.update(elapsed_ms, actors)
    }

    /// Drop every NPC slot, the party move and all scripts.
    pub fn abort(&mut self) {
        self.npc_slots.clear();
        self.party_move = None;
        self.director.abort();
    }
}

fn slot_actor(slot: &ActionSlot) -> Option<Entity> {
    match *slot.kind() {
        SlotKind::MoveTo { actor, .. }
        | SlotKind::DashTo { actor, .. }
        | SlotKind::JumpTo { actor, .. } => Some(actor),
        _ => None,
    }
}
