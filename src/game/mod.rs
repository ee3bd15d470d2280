// Game layer: the knight and the session that drives it

pub mod characters;
pub mod config;
pub mod session;

pub use config::{ConfigError, GameConfig, SpriteSource, WorldConfig};
pub use session::Game;
