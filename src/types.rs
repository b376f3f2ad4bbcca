//! Core result types for pipeline operations

use crate::config::OutputFormat;
use crate::error::Result;
use crate::scene::SceneCategory;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where the background behind the subject came from
///
/// Provenance is metadata only: both remote and procedural backgrounds reach
/// the compositor as the same image shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackgroundSource {
    /// Remote text-to-image provider, resized to the subject
    Remote,
    /// Locally synthesized gradient for the classified scene
    Procedural(SceneCategory),
    /// Blurred copy of the original image
    Blurred,
    /// No background: the transparent extracted subject itself
    None,
}

impl std::fmt::Display for BackgroundSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Procedural(category) => write!(f, "procedural ({})", category),
            Self::Blurred => write!(f, "blurred"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Timing breakdown for one pipeline run, in milliseconds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTimings {
    /// Input decode time
    pub decode_ms: Option<u64>,
    /// Subject extraction time
    pub extract_ms: Option<u64>,
    /// Background acquisition time (remote attempt included)
    pub background_ms: Option<u64>,
    /// Compositing time
    pub composite_ms: Option<u64>,
    /// End-to-end wall time
    pub total_ms: u64,
}

/// Result of a pipeline operation
#[derive(Debug, Clone)]
pub struct CompositeResult {
    /// The final image
    pub image: RgbaImage,
    /// Which strategy produced the background
    pub background_source: BackgroundSource,
    /// Subject (and output) dimensions
    pub dimensions: (u32, u32),
    /// Per-stage timing breakdown
    pub timings: StageTimings,
}

impl CompositeResult {
    /// Create a new result
    #[must_use]
    pub fn new(
        image: RgbaImage,
        background_source: BackgroundSource,
        dimensions: (u32, u32),
        timings: StageTimings,
    ) -> Self {
        Self {
            image,
            background_source,
            dimensions,
            timings,
        }
    }

    /// Get the image dimensions
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// Encode the image in the specified format
    ///
    /// # Errors
    ///
    /// Returns a processing error when encoding fails.
    pub fn to_bytes(&self, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Png => crate::services::ImageCodec::encode_png(&self.image),
            OutputFormat::Jpeg => {
                let mut buffer = Vec::new();
                let mut cursor = std::io::Cursor::new(&mut buffer);
                let rgb_image = image::DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
                let mut jpeg_encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
                jpeg_encoder.encode_image(&rgb_image)?;
                Ok(buffer)
            },
            OutputFormat::Rgba8 => Ok(self.image.as_raw().clone()),
        }
    }

    /// Encode the image as PNG bytes
    ///
    /// # Errors
    ///
    /// Returns a processing error when encoding fails.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes(OutputFormat::Png, 100)
    }

    /// Save the image as PNG
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written or encoding fails.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}
