// Input manager - Main coordination system for all input

use super::action::{Action, InputSource};
use super::config::KeyBindings;
use super::player::{InputSnapshot, PlayerInput};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Main input manager that coordinates all input for all players
pub struct InputManager {
    /// One binding set per player, indexed like `players`
    bindings: Vec<KeyBindings>,

    /// Consulted when a player's own bindings don't map a source
    global: KeyBindings,

    /// Input state for each player
    players: Vec<PlayerInput>,
}

impl InputManager {
    /// One player per entry of `bindings`
    pub fn new(bindings: &[KeyBindings]) -> Self {
        Self {
            bindings: bindings.to_vec(),
            global: KeyBindings::global(),
            players: bindings.iter().map(|_| PlayerInput::new()).collect(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Key repeats carry no new information for level-triggered buttons
        if event.repeat {
            return;
        }

        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.apply(InputSource::key(key_code), event.state);
        }
    }

    /// Route a source's press/release to every player bound to it
    pub fn apply(&mut self, source: InputSource, state: ElementState) {
        for (player, keys) in self.players.iter_mut().zip(&self.bindings) {
            // Unmapped sources are ignored
            let Some(action) = keys.action(source).or_else(|| self.global.action(source)) else {
                continue;
            };

            match state {
                ElementState::Pressed => player.press(action, source),
                ElementState::Released => player.release(action, source),
            }
        }
    }

    /// Logical buttons for a player this tick (all released for unknown players)
    pub fn snapshot(&self, player_id: usize) -> InputSnapshot {
        self.player(player_id)
            .map(PlayerInput::snapshot)
            .unwrap_or_default()
    }

    /// Get input state for a specific player
    pub fn player(&self, player_id: usize) -> Option<&PlayerInput> {
        self.players.get(player_id)
    }

    /// Check if any player is pressing a specific action
    pub fn any_player_pressed(&self, action: Action) -> bool {
        self.players.iter().any(|p| p.is_pressed(action))
    }

    /// Release every held button
    ///
    /// Call when the window loses focus: key-up events sent while unfocused
    /// never arrive, and the buttons would otherwise stay held.
    pub fn reset_all(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(&[KeyBindings::arrows()])
    }
}
