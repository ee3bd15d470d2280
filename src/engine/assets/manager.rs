// Central asset management system

use super::sheet::SpriteSheet;
use super::{AssetError, AssetHandle, AssetId, AssetLoader, TextureAsset};
use std::collections::HashMap;
use std::path::Path;

/// Central asset manager for the game
///
/// Handles loading and caching of sprite sheets. Sheets are loaded once at
/// startup and live until the manager is dropped.
pub struct AssetManager {
    /// Asset loader
    loader: AssetLoader,

    /// Loaded sheets
    textures: HashMap<AssetId, SpriteSheet>,

    /// Path to ID mapping for sheets
    texture_paths: HashMap<String, AssetId>,
}

impl AssetManager {
    /// Create a new asset manager
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            textures: HashMap::new(),
            texture_paths: HashMap::new(),
        }
    }

    /// Load a sprite sheet from disk; loading the same name twice returns the cached handle
    pub fn load_texture(&mut self, name: &str) -> Result<AssetHandle<TextureAsset>, AssetError> {
        if let Some(&id) = self.texture_paths.get(name) {
            return Ok(AssetHandle::new(id));
        }

        let bytes = self.loader.load_bytes(name)?;
        let sheet = SpriteSheet::from_bytes(name, &bytes)?;
        log::info!(
            "Loaded sprite sheet {} ({}x{})",
            name,
            sheet.width(),
            sheet.height()
        );

        Ok(self.store(name, sheet))
    }

    /// Create a sprite sheet from encoded bytes
    pub fn load_texture_bytes(
        &mut self,
        name: &str,
        bytes: &[u8],
    ) -> Result<AssetHandle<TextureAsset>, AssetError> {
        if self.texture_paths.contains_key(name) {
            return Err(AssetError::AlreadyLoaded(name.to_string()));
        }

        let sheet = SpriteSheet::from_bytes(name, bytes)?;
        Ok(self.store(name, sheet))
    }

    /// Register a transparent placeholder sheet (headless runs)
    pub fn create_blank_texture(
        &mut self,
        name: &str,
        width: u32,
        height: u32,
    ) -> Result<AssetHandle<TextureAsset>, AssetError> {
        if self.texture_paths.contains_key(name) {
            return Err(AssetError::AlreadyLoaded(name.to_string()));
        }

        Ok(self.store(name, SpriteSheet::blank(name, width, height)))
    }

    fn store(&mut self, name: &str, sheet: SpriteSheet) -> AssetHandle<TextureAsset> {
        let id = AssetId::from_path(name);
        self.textures.insert(id, sheet);
        self.texture_paths.insert(name.to_string(), id);
        AssetHandle::new(id)
    }

    /// Get a sheet by handle
    pub fn get_texture(&self, handle: AssetHandle<TextureAsset>) -> Option<&SpriteSheet> {
        self.textures.get(&handle.id())
    }

    /// Get statistics about loaded assets
    pub fn stats(&self) -> AssetStats {
        AssetStats {
            texture_count: self.textures.len(),
            texture_bytes: self.textures.values().map(|s| s.pixels().len()).sum(),
        }
    }
}

/// Statistics about loaded assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetStats {
    pub texture_count: usize,
    pub texture_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::sheet::encode_png;

    #[test]
    fn test_load_texture_bytes() {
        let mut manager = AssetManager::new("assets");
        let handle = manager
            .load_texture_bytes("character/IDLE.png", &encode_png(768, 84))
            .unwrap();

        let sheet = manager.get_texture(handle).unwrap();
        assert_eq!(sheet.width(), 768);
        assert_eq!(sheet.height(), 84);
    }

    #[test]
    fn test_duplicate_bytes_rejected() {
        let mut manager = AssetManager::new("assets");
        manager.create_blank_texture("a.png", 8, 8).unwrap();

        let err = manager.load_texture_bytes("a.png", &encode_png(8, 8)).unwrap_err();
        assert!(matches!(err, AssetError::AlreadyLoaded(_)));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let mut manager = AssetManager::new("/definitely/not/here");
        let err = manager.load_texture("character/IDLE.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
        assert_eq!(manager.stats().texture_count, 0);
    }

    #[test]
    fn test_load_texture_from_disk_is_cached() {
        let root = std::env::temp_dir().join(format!("knight-assets-{}", std::process::id()));
        let dir = root.join("textures").join("character");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("RUN.png"), encode_png(768, 84)).unwrap();

        let mut manager = AssetManager::new(&root);
        let first = manager.load_texture("character/RUN.png").unwrap();
        let second = manager.load_texture("character/RUN.png").unwrap();

        assert_eq!(first, second);
        assert_eq!(manager.stats().texture_count, 1);
        assert_eq!(manager.stats().texture_bytes, 768 * 84 * 4);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_asset_stats() {
        let mut manager = AssetManager::new("assets");
        manager.create_blank_texture("a.png", 2, 2).unwrap();
        manager.create_blank_texture("b.png", 4, 1).unwrap();

        assert_eq!(
            manager.stats(),
            AssetStats {
                texture_count: 2,
                texture_bytes: 32,
            }
        );
    }
}
