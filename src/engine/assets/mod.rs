// Asset management system
//
// Loads sprite sheets from disk once at startup and hands out typed handles.
// Any failure here is fatal: a character cannot be drawn with a sheet missing.

mod handle;
mod loader;
mod manager;
mod sheet;

pub use handle::{AssetHandle, AssetId, TextureAsset, TextureHandle};
pub use loader::AssetLoader;
pub use manager::{AssetManager, AssetStats};
pub use sheet::SpriteSheet;

#[cfg(test)]
pub(crate) use sheet::encode_png;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset already loaded: {0}")]
    AlreadyLoaded(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Sprite sheet {name} is {width}x{height}, needs at least {needed_width}x{needed_height}")]
    SheetTooSmall {
        name: String,
        width: u32,
        height: u32,
        needed_width: u32,
        needed_height: u32,
    },

    #[error("No sprite sheet bound for state {0}")]
    MissingStateTexture(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
