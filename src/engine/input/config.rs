// Key bindings: which source drives which action

use super::action::{default_p1_bindings, global_bindings, Action, InputSource};
use std::collections::HashMap;

/// Source-to-action map for one player (or for the global bindings)
///
/// Several sources may drive the same action; a source drives at most one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: HashMap<InputSource, Action>,
}

impl KeyBindings {
    pub fn new(pairs: impl IntoIterator<Item = (InputSource, Action)>) -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        for (source, action) in pairs {
            keys.bind(source, action);
        }
        keys
    }

    /// Arrows, either Shift, Space and X
    pub fn arrows() -> Self {
        Self::new(default_p1_bindings())
    }

    /// Bindings shared by every player (Escape quits)
    pub fn global() -> Self {
        Self::new(global_bindings())
    }

    /// Bind a source, replacing whatever it drove before
    pub fn bind(&mut self, source: InputSource, action: Action) -> &mut Self {
        if let Some(previous) = self.bindings.insert(source, action) {
            if previous != action {
                log::debug!("Rebound {:?}: {:?} -> {:?}", source, previous, action);
            }
        }
        self
    }

    /// The action a source drives, if any
    pub fn action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::arrows()
    }
}
