// Character system
//
// This module contains everything related to the playable knight:
// - Character data structure and management
// - Character stats and properties
// - State machine for character behavior
// - Animation timing and sprite-sheet layout
// - Sprite sheets bound to states

pub mod animation;
pub mod character;
pub mod sprites;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{
    AnimationClip, AnimationSet, AnimationTick, AnimationTimer, Playback, SpriteSheetConfig,
};
pub use character::{Character, CharacterId, CharacterManager};
pub use sprites::CharacterSprites;
pub use state::{CharacterState, CharacterStateMachine, Facing, StateDelta};
pub use stats::{CharacterStats, BASE_STATS};
