use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

use crate::backend::VisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A decoded picture. The pixel buffer and its size always travel together so
/// observations are rescaled against the image they came from. Clones share
/// the buffer.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pixels: Arc<RgbaImage>,
}

impl ImageInput {
    /// Decodes encoded bytes (PNG, JPEG, ...) into an RGBA buffer.
    pub fn decode(bytes: &[u8]) -> Result<Self, VisionError> {
        if bytes.is_empty() {
            return Err(VisionError::Decode("no image data".into()));
        }
        let decoded =
            image::load_from_memory(bytes).map_err(|e| VisionError::Decode(e.to_string()))?;
        Ok(Self::from_rgba(decoded.into_rgba8()))
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }

    /// Raw RGBA8 samples, row-major, no padding.
    pub fn rgba(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}
