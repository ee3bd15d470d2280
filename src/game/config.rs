// Game configuration

use std::path::PathBuf;

use crate::engine::game_loop::LoopConfig;
use crate::engine::input::KeyBindings;
use crate::engine::physics::PhysicsWorld;

use super::characters::{CharacterStats, SpriteSheetConfig, BASE_STATS};

/// Configuration errors, reported before anything is spawned
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("World must have a positive size, got {width}x{height}")]
    EmptyWorld { width: f32, height: f32 },

    #[error("Ground level {ground_level} is outside 0..={max} for a {sprite_height}px sprite")]
    GroundOutOfBounds {
        ground_level: f32,
        max: f32,
        sprite_height: f32,
    },

    #[error("Sprite {sprite_width}px wide does not fit a {width}px world")]
    SpriteTooWide { sprite_width: f32, width: f32 },

    #[error("Gravity must be positive, got {0}")]
    InvalidGravity(f32),

    #[error("Invalid speeds: walk {walk} and run {run} must satisfy 0 < walk <= run")]
    InvalidSpeed { walk: f32, run: f32 },

    #[error("Jump impulse must point up (negative), got {0}")]
    InvalidJump(f32),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("Player {0} has no key bindings")]
    Unbound(usize),
}

/// World size, gravity and the ground line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Downward acceleration in px/s²
    pub gravity: f32,
    /// Y of a standing sprite's top edge
    pub ground_level: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            gravity: 1500.0,
            ground_level: 516.0,
        }
    }
}

impl WorldConfig {
    /// Check the world can hold a sprite of `stats`' size standing on the ground
    pub fn validate(&self, stats: &CharacterStats) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::EmptyWorld {
                width: self.width,
                height: self.height,
            });
        }

        if self.gravity <= 0.0 {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }

        let sprite = stats.sprite_size();
        if sprite.x > self.width {
            return Err(ConfigError::SpriteTooWide {
                sprite_width: sprite.x,
                width: self.width,
            });
        }

        let max = self.height - sprite.y;
        if self.ground_level < 0.0 || self.ground_level > max {
            return Err(ConfigError::GroundOutOfBounds {
                ground_level: self.ground_level,
                max,
                sprite_height: sprite.y,
            });
        }

        Ok(())
    }

    /// Build the physics world
    pub fn physics(&self) -> PhysicsWorld {
        PhysicsWorld::new(self.gravity, self.ground_level, self.width, self.height)
    }
}

/// How the knight's sheets are laid out on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteSource {
    /// `<directory>/IDLE.png`, `<directory>/WALK.png`, ...
    PerState { directory: String },
    /// One sheet, one row per state
    Combined { file: String },
}

impl SpriteSource {
    /// Frame layout matching this source
    pub fn layout(&self, stats: &CharacterStats) -> SpriteSheetConfig {
        match self {
            Self::PerState { .. } => {
                SpriteSheetConfig::per_state(stats.frame_width, stats.frame_height)
            }
            Self::Combined { .. } => {
                SpriteSheetConfig::combined(stats.frame_width, stats.frame_height)
            }
        }
    }
}

/// Everything needed to start a game
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub timing: LoopConfig,
    pub stats: CharacterStats,
    /// Key bindings per player; one character is spawned for each entry
    pub bindings: Vec<KeyBindings>,
    /// Base directory for assets
    pub asset_root: PathBuf,
    pub sprites: SpriteSource,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            timing: LoopConfig::default(),
            stats: BASE_STATS,
            bindings: vec![KeyBindings::arrows()],
            asset_root: PathBuf::from("assets"),
            sprites: SpriteSource::PerState {
                directory: "character".to_string(),
            },
        }
    }
}

impl GameConfig {
    /// Number of player slots
    pub fn players(&self) -> usize {
        self.bindings.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bindings.is_empty() {
            return Err(ConfigError::Zero("players"));
        }
        if let Some(player) = self.bindings.iter().position(KeyBindings::is_empty) {
            return Err(ConfigError::Unbound(player));
        }
        if self.timing.tick_ms == 0 {
            return Err(ConfigError::Zero("tick_ms"));
        }
        if self.timing.max_steps_per_frame == 0 {
            return Err(ConfigError::Zero("max_steps_per_frame"));
        }

        let stats = &self.stats;
        if stats.frame_width == 0 || stats.frame_height == 0 {
            return Err(ConfigError::Zero("frame size"));
        }
        if stats.frame_interval_ms == 0 {
            return Err(ConfigError::Zero("frame_interval_ms"));
        }
        if !(stats.walk_speed > 0.0 && stats.walk_speed <= stats.run_speed) {
            return Err(ConfigError::InvalidSpeed {
                walk: stats.walk_speed,
                run: stats.run_speed,
            });
        }
        if stats.jump_impulse >= 0.0 {
            return Err(ConfigError::InvalidJump(stats.jump_impulse));
        }

        self.world.validate(stats)
    }
}
