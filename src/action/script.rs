//! Ordered program of action slots, executed one wave at a time.
//!
//! A wave is either a single slot, or every slot between a `Begin` and its
//! `End` marker. Slots in a wave are ticked together, in program order, on
//! each update; the script moves to the next wave only once every slot of
//! the current one has finished.
//!
//! Grouping is flat. Nested `Begin`, stray `End`, a `Begin` with no `End` and
//! empty groups are rejected by [`ActionScript::new`], so a running script
//! can never spin looking for a missing marker.
//!
//! Two slots of one wave that move or damage the same actor both apply;
//! the later slot in program order wins for positions.

use bevy_ecs::prelude::Entity;
use smallvec::SmallVec;

use crate::action::actors::ActorAccess;
use crate::action::slot::{ActionSlot, SlotKind};
use crate::error::{BattleError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptState {
    Idle,
    Running,
    Done,
    Aborted,
}

#[derive(Debug, Clone)]
pub struct ActionScript {
    /// Combatant whose command produced this script, if any.
    owner: Option<Entity>,
    slots: Vec<ActionSlot>,
    cursor: usize,
    wave: SmallVec<[usize; 4]>,
    completed: usize,
    state: ScriptState,
}

impl ActionScript {
    pub fn new(owner: Option<Entity>, slots: Vec<ActionSlot>) -> Result<Self> {
        Self::validate(&slots)?;
        Ok(ActionScript {
            owner,
            slots,
            cursor: 0,
            wave: SmallVec::new(),
            completed: 0,
            state: ScriptState::Idle,
        })
    }

    /// Check Begin/End pairing.
    pub fn validate(slots: &[ActionSlot]) -> Result<()> {
        let mut open: Option<usize> = None;
        for (index, slot) in slots.iter().enumerate() {
            match slot.kind() {
                SlotKind::Begin => {
                    if open.is_some() {
                        return Err(BattleError::MalformedScript {
                            index,
                            reason: "nested Begin",
                        });
                    }
                    open = Some(index);
                }
                SlotKind::End => match open.take() {
                    None => {
                        return Err(BattleError::MalformedScript {
                            index,
                            reason: "End without Begin",
                        });
                    }
                    Some(begin) if begin + 1 == index => {
                        return Err(BattleError::MalformedScript {
                            index: begin,
                            reason: "empty group",
                        });
                    }
                    Some(_) => {}
                },
                _ => {}
            }
        }
        match open {
            Some(index) => Err(BattleError::MalformedScript {
                index,
                reason: "Begin without matching End",
            }),
            None => Ok(()),
        }
    }

    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    pub fn state(&self) -> ScriptState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ScriptState::Done
    }

    pub fn slots(&self) -> &[ActionSlot] {
        &self.slots
    }

    /// Popups the script's ShowText slots drive.
    pub fn popups(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots.iter().filter_map(|slot| match slot.kind() {
            SlotKind::ShowText { popup } => Some(*popup),
            _ => None,
        })
    }

    /// Slots of the wave currently executing.
    pub fn current_wave(&self) -> impl Iterator<Item = &ActionSlot> + '_ {
        self.wave.iter().map(|&index| &self.slots[index])
    }

    pub fn wave_len(&self) -> usize {
        self.wave.len()
    }

    pub fn start(&mut self) {
        if self.state != ScriptState::Idle {
            return;
        }
        self.state = ScriptState::Running;
        self.pull_wave();
    }

    /// Tick every slot of the current wave.
    ///
    /// Returns `true` once, on the update where the last wave finishes.
    pub fn update<A: ActorAccess + ?Sized>(&mut self, elapsed_ms: f32, actors: &mut A) -> bool {
        if self.state != ScriptState::Running {
            return false;
        }
        for &index in self.wave.iter() {
            if self.slots[index].update(elapsed_ms, actors) {
                self.completed += 1;
            }
        }
        if self.completed < self.wave.len() {
            return false;
        }
        self.pull_wave();
        if self.wave.is_empty() {
            self.state = ScriptState::Done;
            return true;
        }
        false
    }

    /// Rewind to the first slot so the script can run again.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.reset();
        }
        self.cursor = 0;
        self.wave.clear();
        self.completed = 0;
        self.state = ScriptState::Idle;
    }

    /// Stop the script where it stands. It never reports completion.
    pub fn abort(&mut self) {
        if self.state == ScriptState::Done {
            return;
        }
        self.wave.clear();
        self.completed = 0;
        self.state = ScriptState::Aborted;
    }

    fn pull_wave(&mut self) {
        self.wave.clear();
        self.completed = 0;
        let Some(head) = self.slots.get(self.cursor) else {
            return;
        };
        if !head.is_begin() {
            self.wave.push(self.cursor);
            self.cursor += 1;
            return;
        }
        self.cursor += 1;
        while let Some(slot) = self.slots.get(self.cursor) {
            self.cursor += 1;
            if slot.is_end() {
                break;
            }
            self.wave.push(self.cursor - 1);
        }
    }
}
