//! Input boundary
//!
//! Key and button handlers only record edges here. The simulation reads a
//! [`TickInput`] snapshot once per frame, so events arriving mid-frame never
//! touch game state directly.

use crate::settings::SteerConflict;
use crate::sim::TickInput;

/// Discrete input edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    SteerLeft { pressed: bool },
    SteerRight { pressed: bool },
    Boost { pressed: bool },
    PauseToggle,
    /// Play / Play Again
    Play,
}

/// Map a `KeyboardEvent.code` to an input event
pub fn key_event(code: &str, pressed: bool) -> Option<InputEvent> {
    match code {
        "ArrowLeft" => Some(InputEvent::SteerLeft { pressed }),
        "ArrowRight" => Some(InputEvent::SteerRight { pressed }),
        "Space" => Some(InputEvent::Boost { pressed }),
        _ => None,
    }
}

/// Currently held controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub boost: bool,
}

impl InputState {
    /// Record a held-control edge. Returns false for command events
    /// (pause, play), which the session handles itself.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::SteerLeft { pressed } => self.left = pressed,
            InputEvent::SteerRight { pressed } => self.right = pressed,
            InputEvent::Boost { pressed } => self.boost = pressed,
            InputEvent::PauseToggle | InputEvent::Play => return false,
        }
        true
    }

    /// Snapshot for the next tick
    pub fn sample(&self, conflict: SteerConflict) -> TickInput {
        let cancel = conflict == SteerConflict::Cancel && self.left && self.right;
        TickInput {
            left: self.left && !cancel,
            right: self.right && !cancel,
            boost: self.boost,
        }
    }

    /// Drop all held controls (focus loss)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
