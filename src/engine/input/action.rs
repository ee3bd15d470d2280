// Game action definitions and mappings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Run,
    Jump,

    // Combat
    Attack,

    // Meta actions
    Quit,
}

/// Represents an input source (keyboard key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings for Player 1
pub fn default_p1_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (arrow keys, either shift to run)
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::ShiftLeft), Action::Run),
        (InputSource::key(KeyCode::ShiftRight), Action::Run),
        (InputSource::key(KeyCode::Space), Action::Jump),
        // Combat
        (InputSource::key(KeyCode::KeyX), Action::Attack),
    ]
}

/// Global bindings (not player-specific)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![(InputSource::key(KeyCode::Escape), Action::Quit)]
}
