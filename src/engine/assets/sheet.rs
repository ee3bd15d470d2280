// Decoded sprite sheet pixels

use image::RgbaImage;

use super::AssetError;

/// A decoded sprite sheet, ready for a renderer to upload
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    name: String,
    pixels: RgbaImage,
}

impl SpriteSheet {
    /// Decode a sheet from encoded image bytes (PNG/JPEG)
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|source| AssetError::Decode {
            name: name.to_string(),
            source,
        })?;

        Ok(Self::from_rgba(name, img.to_rgba8()))
    }

    /// Wrap already-decoded pixels
    pub fn from_rgba(name: &str, pixels: RgbaImage) -> Self {
        Self {
            name: name.to_string(),
            pixels,
        }
    }

    /// A transparent placeholder sheet of the given size
    pub fn blank(name: &str, width: u32, height: u32) -> Self {
        Self::from_rgba(name, RgbaImage::new(width, height))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Check the sheet can hold `columns` x `rows` frames of the given size
    pub fn ensure_frames(
        &self,
        frame_width: u32,
        frame_height: u32,
        columns: u32,
        rows: u32,
    ) -> Result<(), AssetError> {
        // A size past u32 can never fit
        let needed_width = frame_width.checked_mul(columns).unwrap_or(u32::MAX);
        let needed_height = frame_height.checked_mul(rows).unwrap_or(u32::MAX);

        if self.width() < needed_width || self.height() < needed_height {
            return Err(AssetError::SheetTooSmall {
                name: self.name.clone(),
                width: self.width(),
                height: self.height(),
                needed_width,
                needed_height,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(RgbaImage::new(width, height))
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageOutputFormat::Png,
        )
        .expect("encode test png");
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png() {
        let sheet = SpriteSheet::from_bytes("WALK.png", &encode_png(768, 84)).unwrap();
        assert_eq!(sheet.name(), "WALK.png");
        assert_eq!(sheet.width(), 768);
        assert_eq!(sheet.height(), 84);
        assert_eq!(sheet.pixels().len(), 768 * 84 * 4);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = SpriteSheet::from_bytes("bad.png", b"not an image").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn test_ensure_frames() {
        let sheet = SpriteSheet::blank("RUN.png", 768, 84);
        assert!(sheet.ensure_frames(96, 84, 8, 1).is_ok());

        let err = sheet.ensure_frames(96, 84, 9, 1).unwrap_err();
        assert!(matches!(
            err,
            AssetError::SheetTooSmall {
                needed_width: 864,
                ..
            }
        ));
    }

    #[test]
    fn test_oversized_frames_rejected_without_overflow() {
        let sheet = SpriteSheet::blank("RUN.png", 768, 84);

        let err = sheet.ensure_frames(u32::MAX / 2, 84, 8, 1).unwrap_err();
        assert!(matches!(
            err,
            AssetError::SheetTooSmall {
                needed_width: u32::MAX,
                needed_height: 84,
                ..
            }
        ));

        let err = sheet.ensure_frames(96, 1 << 20, 8, 1 << 13).unwrap_err();
        assert!(matches!(
            err,
            AssetError::SheetTooSmall {
                needed_height: u32::MAX,
                ..
            }
        ));
    }
}
