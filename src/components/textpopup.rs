//! Floating battle text (damage numbers, "Miss", status names).
//!
//! A popup is its own entity. The `ShowText` action slot starts it and
//! waits for it to report [`PopupState::Done`]; completion is delegated to
//! the popup rather than timed by the slot.
//!
//! # Related
//!
//! - [`crate::systems::textpopup::textpopup_system`] – advances and despawns popups

use bevy_ecs::prelude::Component;

/// Default time a popup stays on screen, in milliseconds.
pub const DEFAULT_POPUP_MS: f32 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Idle,
    Rendering,
    Done,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct TextPopup {
    pub text: String,
    pub duration_ms: f32,
    pub elapsed_ms: f32,
    pub state: PopupState,
}

impl TextPopup {
    pub fn new(text: impl Into<String>) -> Self {
        TextPopup {
            text: text.into(),
            duration_ms: DEFAULT_POPUP_MS,
            elapsed_ms: 0.0,
            state: PopupState::Idle,
        }
    }

    pub fn with_duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Start rendering. Returns `false` if the popup was already started.
    pub fn start(&mut self) -> bool {
        if self.state != PopupState::Idle {
            return false;
        }
        self.state = PopupState::Rendering;
        self.elapsed_ms = 0.0;
        true
    }

    /// Advance a rendering popup. Returns `true` on the tick it finishes.
    pub fn advance(&mut self, elapsed_ms: f32) -> bool {
        if self.state != PopupState::Rendering {
            return false;
        }
        self.elapsed_ms += elapsed_ms;
        if self.elapsed_ms >= self.duration_ms {
            self.state = PopupState::Done;
            return true;
        }
        false
    }

    pub fn is_done(&self) -> bool {
        self.state == PopupState::Done
    }
}
