// Input handling system
//
// Turns raw keyboard events into per-player held buttons, and from those
// into one `InputSnapshot` per player per tick.
//
// ## Architecture
//
// - `action`: Logical actions and default key bindings
// - `player`: Per-player held state and snapshots
// - `config`: Per-player key bindings
// - `manager`: Main input manager coordinating everything
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, KeyBindings};
//
// let mut input_manager = InputManager::new(&[KeyBindings::arrows()]);
//
// // In your event loop, process keyboard events
// input_manager.process_keyboard_event(&key_event);
//
// // Each tick, read the snapshot for a player
// let snapshot = input_manager.snapshot(0);
// if snapshot.attack {
//     // attack button is held this tick
// }
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use config::KeyBindings;
pub use manager::InputManager;
pub use player::{InputSnapshot, PlayerInput};
