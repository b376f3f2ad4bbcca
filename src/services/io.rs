//! Image codec and filter wrappers
//!
//! Thin wrappers over the image crate that keep decode/encode/filter calls
//! out of business logic. Decode accepts arbitrary uploaded bytes with
//! content-based format detection; encode always produces PNG.

use crate::error::{BgComposeError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage, RgbaImage};

/// Service for image decode, encode, and filter operations
pub struct ImageCodec;

impl ImageCodec {
    /// Decode arbitrary uploaded bytes into a pixel grid
    ///
    /// # Errors
    ///
    /// Returns a processing error when the bytes are not a decodable image.
    pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage> {
        image::load_from_memory(bytes).map_err(|e| {
            BgComposeError::processing(format!("Failed to decode image from bytes: {}", e))
        })
    }

    /// Encode an RGBA image as PNG bytes
    ///
    /// # Errors
    ///
    /// Returns a processing error when encoding fails.
    pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        image
            .write_to(&mut cursor, image::ImageFormat::Png)
            .map_err(|e| BgComposeError::processing(format!("Failed to encode PNG: {}", e)))?;
        Ok(buffer)
    }

    /// Gaussian blur at the given radius; radius 0 is the identity
    #[must_use]
    pub fn blur_rgb(image: &RgbImage, radius: u32) -> RgbImage {
        if radius == 0 {
            return image.clone();
        }
        log::debug!("Applying Gaussian blur at radius {}", radius);
        image::imageops::blur(image, radius as f32)
    }

    /// High-quality resize to exact target dimensions (Lanczos3)
    #[must_use]
    pub fn resize_to(image: &DynamicImage, width: u32, height: u32) -> RgbaImage {
        image
            .resize_exact(width, height, FilterType::Lanczos3)
            .to_rgba8()
    }
}
