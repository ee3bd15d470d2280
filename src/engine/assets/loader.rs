// Asset loading functionality

use super::AssetError;
use std::path::{Path, PathBuf};

/// Directory under the asset root that holds sprite sheets
pub const TEXTURE_DIRECTORY: &str = "textures";

/// Asset loader responsible for finding and loading asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for a texture
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(TEXTURE_DIRECTORY).join(name)
    }

    /// Load texture bytes from disk
    pub fn load_bytes(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(name);

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        std::fs::read(&path)
            .map_err(|e| AssetError::LoadError(format!("Failed to read {}: {}", name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path("character/IDLE.png");

        assert_eq!(
            path,
            PathBuf::from("/game/assets/textures/character/IDLE.png")
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let loader = AssetLoader::new("/definitely/not/here");
        let err = loader.load_bytes("character/IDLE.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }
}
