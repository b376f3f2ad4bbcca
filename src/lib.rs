#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unused_async)]

//! # Background Compose Library
//!
//! A Rust library for replacing image backgrounds: a subject with existing
//! transparency is composited over a background that is either generated by
//! a remote text-to-image provider or, on any remote failure, synthesized
//! locally as a full-frame procedural gradient matched to the prompt.
//!
//! ## Features
//!
//! - **Scene classification**: free-text prompts map to a fixed set of scene
//!   categories through an ordered keyword-rule table
//! - **Procedural synthesis**: per-category color ramps rendered row by row,
//!   with star speckling for night scenes and seedable randomness
//! - **Alpha compositing**: standard "over" operator at pixel level
//! - **Remote generation with guaranteed fallback**: a single bounded HTTP
//!   attempt per request; every failure mode falls back to synthesis and is
//!   never surfaced to the caller
//! - **Blur backgrounds**: Gaussian-blurred copies of the original as an
//!   alternative background, at radius `intensity × 2`
//!
//! ## Quick Start
//!
//! The subject extractor is an external collaborator (an AI segmentation
//! model or service) injected into the pipeline:
//!
//! ```rust,no_run
//! use bgcompose::{BackgroundPipeline, PipelineConfig, Result, SubjectExtractor};
//! use image::{DynamicImage, RgbaImage};
//!
//! struct MattingService;
//!
//! #[async_trait::async_trait]
//! impl SubjectExtractor for MattingService {
//!     async fn extract(&self, image: &DynamicImage) -> Result<RgbaImage> {
//!         // Call your segmentation model here
//!         Ok(image.to_rgba8())
//!     }
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = PipelineConfig::builder().build()?;
//! let pipeline = BackgroundPipeline::new(config, Box::new(MattingService))?;
//!
//! let image_bytes = std::fs::read("portrait.jpg")?;
//! let result = pipeline
//!     .generate_ai_background(&image_bytes, "sunset over ocean")
//!     .await?;
//! result.save_png("composited.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `remote` (default): HTTP text-to-image provider via `reqwest`. Without
//!   it, the pipeline goes straight to procedural synthesis.

pub mod compositor;
pub mod config;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod pipeline;
mod ramp;
pub mod scene;
pub mod services;
pub mod synth;
pub mod types;

// Public API exports
pub use compositor::Compositor;
pub use config::{OutputFormat, PipelineConfig, PipelineConfigBuilder};
pub use error::{BgComposeError, Result};
pub use extractor::SubjectExtractor;
pub use generator::{enhance_prompt, BackgroundProvider, BackgroundRequest};
#[cfg(feature = "remote")]
pub use generator::RemoteBackgroundGenerator;
pub use pipeline::BackgroundPipeline;
pub use scene::{SceneCategory, SceneClassifier};
pub use services::ImageCodec;
pub use synth::BackgroundSynthesizer;
pub use types::{BackgroundSource, CompositeResult, StageTimings};

/// Replace the background of an image provided as bytes, returning encoded
/// image bytes in the configured output format (PNG by default)
///
/// This is the byte-level boundary operation: decode, extract the subject,
/// acquire a background (remote attempt, synthesis fallback), composite, and
/// encode per `config.output_format`.
///
/// # Errors
///
/// - Invalid input for empty image bytes
/// - Processing errors for decode, extraction, or encode failures
pub async fn generate_ai_background_from_bytes(
    pipeline: &BackgroundPipeline,
    image_bytes: &[u8],
    prompt: &str,
) -> Result<Vec<u8>> {
    let result = pipeline.generate_ai_background(image_bytes, prompt).await?;
    encode_result(pipeline, &result)
}

/// Composite a subject over a blurred original, returning encoded image
/// bytes in the configured output format (PNG by default)
///
/// # Errors
///
/// - Invalid input for empty original or subject bytes
/// - Processing errors for decode, compositing, or encode failures
pub async fn blur_background_from_bytes(
    pipeline: &BackgroundPipeline,
    original_bytes: &[u8],
    subject_bytes: &[u8],
    blur_intensity: u32,
) -> Result<Vec<u8>> {
    let result = pipeline
        .blur_background(original_bytes, subject_bytes, blur_intensity)
        .await?;
    encode_result(pipeline, &result)
}

/// Extract the subject from an image provided as bytes, returning it with a
/// transparent background in the configured output format (PNG by default)
///
/// # Errors
///
/// - Invalid input for empty image bytes
/// - Processing errors for decode, extraction, or encode failures
pub async fn remove_background_from_bytes(
    pipeline: &BackgroundPipeline,
    image_bytes: &[u8],
) -> Result<Vec<u8>> {
    let result = pipeline.remove_background(image_bytes).await?;
    encode_result(pipeline, &result)
}

/// Encode a result per the pipeline's configured format and quality
fn encode_result(pipeline: &BackgroundPipeline, result: &CompositeResult) -> Result<Vec<u8>> {
    let config = pipeline.config();
    result.to_bytes(config.output_format, config.jpeg_quality)
}
