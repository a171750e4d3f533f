//! A single timed unit of work inside an action script.
//!
//! Slots move through `Pending → Running → Finished`. Only [`ActionSlot::reset`]
//! brings a finished slot back to `Pending`.
//!
//! Movement and wait slots are paced at a fixed [`FRAME_DELAY_MS`] per frame
//! (about 30 fps) whatever the caller's tick rate: elapsed time goes into a
//! delay accumulator and at most one frame is taken per update. Cosmetic
//! `Show*` slots, `DisplayEffect` and `TakeDamage` finish on the update that
//! first reaches them. `ShowText` finishes when its popup reports done.

use bevy_ecs::prelude::Entity;
use glam::Vec2;
use log::debug;

use crate::action::actionstring::AnimAction;
use crate::action::actors::ActorAccess;

/// Milliseconds per movement/wait frame.
pub const FRAME_DELAY_MS: f32 = 33.0;
/// Peak height of a `JumpTo` arc, in pixels.
pub const JUMP_HEIGHT: f32 = 24.0;

/// Where a movement slot ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Absolute(Vec2),
    /// Offset from wherever the actor stands when the slot starts.
    Relative(Vec2),
}

impl Target {
    pub fn resolve(self, from: Vec2) -> Vec2 {
        match self {
            Target::Absolute(pos) => pos,
            Target::Relative(offset) => from + offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Move,
    Dash,
    Jump,
}

impl Motion {
    fn animation(self) -> AnimAction {
        match self {
            Motion::Move => AnimAction::Walk,
            Motion::Dash => AnimAction::Dash,
            Motion::Jump => AnimAction::Jump,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotKind {
    MoveTo { actor: Entity, target: Target, frames: u32 },
    DashTo { actor: Entity, target: Target, frames: u32 },
    JumpTo { actor: Entity, target: Target, frames: u32 },
    Wait { frames: u32 },
    ShowAttack { actor: Entity },
    ShowCasting { actor: Entity },
    ShowHit { actor: Entity },
    ShowText { popup: Entity },
    ShowVictory { actor: Entity },
    ShowDeath { actor: Entity },
    /// Opens a group whose slots run concurrently.
    Begin,
    /// Closes the group opened by the last `Begin`.
    End,
    DisplayEffect { actor: Entity, effect: String },
    TakeDamage { actor: Entity, damage: i32 },
}

impl SlotKind {
    fn movement(&self) -> Option<(Motion, Entity, Target, u32)> {
        match *self {
            SlotKind::MoveTo { actor, target, frames } => Some((Motion::Move, actor, target, frames)),
            SlotKind::DashTo { actor, target, frames } => Some((Motion::Dash, actor, target, frames)),
            SlotKind::JumpTo { actor, target, frames } => Some((Motion::Jump, actor, target, frames)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Pending,
    Running,
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionSlot {
    kind: SlotKind,
    state: SlotState,
    delay: f32,
    frame: u32,
    end: Vec2,
    step: Vec2,
    /// Position along the straight path; jumps draw the arc on top of it.
    ground: Vec2,
}

impl ActionSlot {
    pub fn new(kind: SlotKind) -> Self {
        ActionSlot {
            kind,
            state: SlotState::Pending,
            delay: 0.0,
            frame: 0,
            end: Vec2::ZERO,
            step: Vec2::ZERO,
            ground: Vec2::ZERO,
        }
    }

    pub fn move_to(actor: Entity, target: Target, frames: u32) -> Self {
        Self::new(SlotKind::MoveTo { actor, target, frames })
    }

    pub fn dash_to(actor: Entity, target: Target, frames: u32) -> Self {
        Self::new(SlotKind::DashTo { actor, target, frames })
    }

    pub fn jump_to(actor: Entity, target: Target, frames: u32) -> Self {
        Self::new(SlotKind::JumpTo { actor, target, frames })
    }

    pub fn wait(frames: u32) -> Self {
        Self::new(SlotKind::Wait { frames })
    }

    pub fn show_attack(actor: Entity) -> Self {
        Self::new(SlotKind::ShowAttack { actor })
    }

    pub fn show_casting(actor: Entity) -> Self {
        Self::new(SlotKind::ShowCasting { actor })
    }

    pub fn show_hit(actor: Entity) -> Self {
        Self::new(SlotKind::ShowHit { actor })
    }

    pub fn show_text(popup: Entity) -> Self {
        Self::new(SlotKind::ShowText { popup })
    }

    pub fn show_victory(actor: Entity) -> Self {
        Self::new(SlotKind::ShowVictory { actor })
    }

    pub fn show_death(actor: Entity) -> Self {
        Self::new(SlotKind::ShowDeath { actor })
    }

    pub fn begin() -> Self {
        Self::new(SlotKind::Begin)
    }

    pub fn end() -> Self {
        Self::new(SlotKind::End)
    }

    pub fn display_effect(actor: Entity, effect: impl Into<String>) -> Self {
        Self::new(SlotKind::DisplayEffect {
            actor,
            effect: effect.into(),
        })
    }

    pub fn take_damage(actor: Entity, damage: i32) -> Self {
        Self::new(SlotKind::TakeDamage { actor, damage })
    }

    pub fn kind(&self) -> &SlotKind {
        &self.kind
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    /// Frames taken so far by a movement or wait slot.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn is_finished(&self) -> bool {
        self.state == SlotState::Finished
    }

    pub fn is_begin(&self) -> bool {
        matches!(self.kind, SlotKind::Begin)
    }

    pub fn is_end(&self) -> bool {
        matches!(self.kind, SlotKind::End)
    }

    /// Recycle the slot for a new run.
    pub fn reset(&mut self) {
        self.state = SlotState::Pending;
        self.delay = 0.0;
        self.frame = 0;
        self.end = Vec2::ZERO;
        self.step = Vec2::ZERO;
        self.ground = Vec2::ZERO;
    }

    /// Point a movement slot somewhere else and reset it.
    ///
    /// Returns `false` (and changes nothing) for non-movement slots.
    pub fn retarget(&mut self, new_target: Target, new_frames: u32) -> bool {
        match &mut self.kind {
            SlotKind::MoveTo { target, frames, .. }
            | SlotKind::DashTo { target, frames, .. }
            | SlotKind::JumpTo { target, frames, .. } => {
                *target = new_target;
                *frames = new_frames;
            }
            _ => return false,
        }
        self.reset();
        true
    }

    /// Advance the slot by one tick.
    ///
    /// Returns `true` exactly once per run, on the update where the slot
    /// becomes finished; the state already reads `Finished` by then. A
    /// finished slot ignores further updates and never touches its actor.
    pub fn update<A: ActorAccess + ?Sized>(&mut self, elapsed_ms: f32, actors: &mut A) -> bool {
        if self.state == SlotState::Finished {
            return false;
        }
        let entering = self.state == SlotState::Pending;
        self.state = SlotState::Running;

        let done = if let Some((motion, actor, target, frames)) = self.kind.movement() {
            self.update_motion(motion, actor, target, frames, entering, elapsed_ms, actors)
        } else {
            match &self.kind {
                SlotKind::Wait { frames } => {
                    let frames = *frames;
                    frames == 0 || (self.take_frame(elapsed_ms) && self.frame >= frames)
                }
                SlotKind::ShowAttack { actor } => {
                    actors.play(*actor, AnimAction::Attack);
                    true
                }
                SlotKind::ShowCasting { actor } => {
                    actors.play(*actor, AnimAction::Cast);
                    true
                }
                SlotKind::ShowHit { actor } => {
                    actors.play(*actor, AnimAction::Hit);
                    true
                }
                SlotKind::ShowVictory { actor } => {
                    actors.play(*actor, AnimAction::Victory);
                    true
                }
                SlotKind::ShowDeath { actor } => {
                    actors.play(*actor, AnimAction::Death);
                    true
                }
                SlotKind::ShowText { popup } => {
                    if entering {
                        actors.start_popup(*popup);
                    }
                    actors.popup_done(*popup)
                }
                SlotKind::DisplayEffect { actor, effect } => {
                    actors.display_effect(*actor, effect);
                    true
                }
                SlotKind::TakeDamage { actor, damage } => {
                    if let Some((dealt, lethal)) = actors.apply_damage(*actor, *damage) {
                        debug!("{:?} took {} damage (lethal: {})", actor, dealt, lethal);
                        let reaction = if lethal { AnimAction::Death } else { AnimAction::Hit };
                        actors.play(*actor, reaction);
                    }
                    true
                }
                SlotKind::Begin | SlotKind::End => true,
                SlotKind::MoveTo { .. } | SlotKind::DashTo { .. } | SlotKind::JumpTo { .. } => true,
            }
        };

        if done {
            self.state = SlotState::Finished;
        }
        done
    }

    /// Feed the delay accumulator; returns `true` when a frame is taken.
    fn take_frame(&mut self, elapsed_ms: f32) -> bool {
        self.delay += elapsed_ms;
        if self.delay < FRAME_DELAY_MS {
            return false;
        }
        self.delay = (self.delay - FRAME_DELAY_MS) % FRAME_DELAY_MS;
        self.frame += 1;
        true
    }

    #[allow(clippy::too_many_arguments)]
    fn update_motion<A: ActorAccess + ?Sized>(
        &mut self,
        motion: Motion,
        actor: Entity,
        target: Target,
        frames: u32,
        entering: bool,
        elapsed_ms: f32,
        actors: &mut A,
    ) -> bool {
        if entering {
            let Some(start) = actors.position(actor) else {
                debug!("{:?} vanished before its move started", actor);
                return true;
            };
            self.ground = start;
            self.end = target.resolve(start);
            if frames == 0 || start == self.end {
                actors.set_position(actor, self.end);
                return true;
            }
            self.step = (self.end - start) / frames as f32;
            actors.play(actor, motion.animation());
        }

        if !self.take_frame(elapsed_ms) {
            return false;
        }

        if self.frame >= frames {
            actors.set_position(actor, self.end);
            actors.play(actor, AnimAction::Idle);
            return true;
        }

        self.ground += self.step;
        if self.ground == self.end {
            actors.set_position(actor, self.end);
            actors.play(actor, AnimAction::Idle);
            return true;
        }
        let pos = match motion {
            Motion::Jump => {
                let t = self.frame as f32 / frames as f32;
                self.ground - Vec2::new(0.0, 4.0 * JUMP_HEIGHT * t * (1.0 - t))
            }
            Motion::Move | Motion::Dash => self.ground,
        };
        actors.set_position(actor, pos);
        false
    }
}
