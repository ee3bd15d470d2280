// Per-player input state management

use super::action::{Action, InputSource};
use std::collections::{HashMap, HashSet};

/// The logical buttons the character controller reads each tick
///
/// Every field is a held/not-held level. Rules that need edge semantics
/// re-evaluate these levels every tick rather than tracking presses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub run: bool,
    pub jump: bool,
    pub attack: bool,
}

impl InputSnapshot {
    /// Whether either direction is held
    pub fn has_direction(&self) -> bool {
        self.left || self.right
    }
}

/// Held buttons for a single player
///
/// An action stays pressed while any source bound to it is held, so
/// releasing one Shift key does not drop Run while the other is down.
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Sources currently held, per action; never holds an empty set
    held: HashMap<Action, HashSet<InputSource>>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.held.contains_key(&action)
    }

    /// Capture the logical buttons for this tick
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            left: self.is_pressed(Action::MoveLeft),
            right: self.is_pressed(Action::MoveRight),
            run: self.is_pressed(Action::Run),
            jump: self.is_pressed(Action::Jump),
            attack: self.is_pressed(Action::Attack),
        }
    }

    /// `source` went down while bound to `action`
    pub(crate) fn press(&mut self, action: Action, source: InputSource) {
        self.held.entry(action).or_default().insert(source);
    }

    /// `source` came up; the action is released with its last source
    pub(crate) fn release(&mut self, action: Action, source: InputSource) {
        if let Some(sources) = self.held.get_mut(&action) {
            sources.remove(&source);
            if sources.is_empty() {
                self.held.remove(&action);
            }
        }
    }

    /// Release everything
    pub fn reset(&mut self) {
        self.held.clear();
    }
}
