//! Subject extraction seam
//!
//! Background removal itself is an external collaborator (an AI segmentation
//! model or service). The pipeline consumes it through this trait and never
//! constructs a concrete extractor; embedding applications inject one, the
//! same way inference backends are injected into a processor frontend.

use crate::error::Result;
use async_trait::async_trait;
use image::{DynamicImage, RgbaImage};

/// External collaborator that separates a subject from its background
#[async_trait]
pub trait SubjectExtractor: Send + Sync {
    /// Produce an RGBA image of identical dimensions with background pixels
    /// made transparent
    ///
    /// # Errors
    ///
    /// Any failure propagates to the pipeline as an extraction failure and
    /// surfaces to the caller as a processing error.
    async fn extract(&self, image: &DynamicImage) -> Result<RgbaImage>;
}
