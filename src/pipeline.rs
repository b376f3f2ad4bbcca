//! Pipeline orchestration for the background replacement flows
//!
//! `BackgroundPipeline` sequences the external collaborators (subject
//! extraction, remote generation) with the local core (classification,
//! synthesis, compositing). It is request-scoped and stateless across
//! requests: every invocation allocates its own images and a fresh
//! synthesizer, so concurrent requests need no locking.

use crate::{
    compositor::Compositor,
    config::PipelineConfig,
    error::{BgComposeError, Result},
    extractor::SubjectExtractor,
    generator::{BackgroundProvider, BackgroundRequest},
    scene::SceneClassifier,
    services::ImageCodec,
    synth::BackgroundSynthesizer,
    types::{BackgroundSource, CompositeResult, StageTimings},
};
use image::RgbaImage;
use instant::Instant;
use tracing::{debug, info, instrument, warn};

/// Orchestrator for the background replacement flows
///
/// The subject extractor is injected; the remote provider defaults to the
/// configured HTTP generator when the `remote` feature is enabled and can be
/// overridden (or removed) via [`BackgroundPipeline::with_provider`].
pub struct BackgroundPipeline {
    config: PipelineConfig,
    extractor: Box<dyn SubjectExtractor>,
    remote: Option<Box<dyn BackgroundProvider>>,
}

impl BackgroundPipeline {
    /// Create a pipeline with the configured remote provider
    ///
    /// # Errors
    ///
    /// Returns an error when the remote HTTP client cannot be constructed.
    pub fn new(config: PipelineConfig, extractor: Box<dyn SubjectExtractor>) -> Result<Self> {
        #[cfg(feature = "remote")]
        let remote: Option<Box<dyn BackgroundProvider>> =
            Some(Box::new(crate::generator::RemoteBackgroundGenerator::new(
                config.remote_endpoint.clone(),
                config.remote_timeout,
            )?));

        #[cfg(not(feature = "remote"))]
        let remote: Option<Box<dyn BackgroundProvider>> = None;

        Ok(Self {
            config,
            extractor,
            remote,
        })
    }

    /// Create a pipeline with an explicit remote provider (or none)
    ///
    /// `None` skips the remote attempt entirely and goes straight to
    /// procedural synthesis.
    #[must_use]
    pub fn with_provider(
        config: PipelineConfig,
        extractor: Box<dyn SubjectExtractor>,
        remote: Option<Box<dyn BackgroundProvider>>,
    ) -> Self {
        Self {
            config,
            extractor,
            remote,
        }
    }

    /// Access the pipeline configuration
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Flow A: replace the background with a generated scene
    ///
    /// Extracts the subject, attempts remote generation bounded by the
    /// configured timeout, and on any remote failure falls back to
    /// classifying the original prompt and synthesizing a gradient at the
    /// subject's dimensions. The composited result always matches the input
    /// dimensions.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for empty image bytes (nothing processed)
    /// - `Processing` for decode, extraction, or compositing failures
    ///
    /// Remote failures are never surfaced; they select the fallback.
    #[instrument(skip(self, image_bytes, prompt), fields(input_bytes = image_bytes.len()))]
    pub async fn generate_ai_background(
        &self,
        image_bytes: &[u8],
        prompt: &str,
    ) -> Result<CompositeResult> {
        if image_bytes.is_empty() {
            return Err(BgComposeError::invalid_input("No image uploaded"));
        }

        let total_start = Instant::now();
        let mut timings = StageTimings::default();

        let decode_start = Instant::now();
        let input = ImageCodec::decode_bytes(image_bytes)?;
        timings.decode_ms = Some(elapsed_ms(decode_start));

        let extract_start = Instant::now();
        let subject = self.extractor.extract(&input).await?;
        timings.extract_ms = Some(elapsed_ms(extract_start));

        let (width, height) = subject.dimensions();
        debug!(width, height, "Subject extracted");

        let background_start = Instant::now();
        let (background, source) = self.resolve_background(prompt, width, height).await;
        timings.background_ms = Some(elapsed_ms(background_start));

        let composite_start = Instant::now();
        let image = Compositor::composite(&background, &subject)?;
        timings.composite_ms = Some(elapsed_ms(composite_start));
        timings.total_ms = elapsed_ms(total_start);

        info!(source = %source, width, height, "Background replaced");
        Ok(CompositeResult::new(image, source, (width, height), timings))
    }

    /// Flow B: composite the subject over a blurred copy of the original
    ///
    /// The blur radius is `intensity × 2`. Intensity is documented as 0-10
    /// but intentionally not clamped; out-of-range values scale linearly.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for empty original or subject bytes
    /// - `Processing` for decode or compositing failures (including subject
    ///   dimensions that differ from the original's)
    #[instrument(skip(self, original_bytes, subject_bytes))]
    pub async fn blur_background(
        &self,
        original_bytes: &[u8],
        subject_bytes: &[u8],
        blur_intensity: u32,
    ) -> Result<CompositeResult> {
        if original_bytes.is_empty() || subject_bytes.is_empty() {
            return Err(BgComposeError::invalid_input("Missing image files"));
        }

        let total_start = Instant::now();
        let mut timings = StageTimings::default();

        let decode_start = Instant::now();
        let original = ImageCodec::decode_bytes(original_bytes)?.to_rgb8();
        let subject = ImageCodec::decode_bytes(subject_bytes)?.to_rgba8();
        timings.decode_ms = Some(elapsed_ms(decode_start));

        let background_start = Instant::now();
        let radius = blur_intensity.saturating_mul(2);
        let blurred = ImageCodec::blur_rgb(&original, radius);
        let background = image::DynamicImage::ImageRgb8(blurred).to_rgba8();
        timings.background_ms = Some(elapsed_ms(background_start));

        let composite_start = Instant::now();
        let image = Compositor::composite(&background, &subject)?;
        timings.composite_ms = Some(elapsed_ms(composite_start));
        timings.total_ms = elapsed_ms(total_start);

        let dimensions = image.dimensions();
        info!(radius, "Blur background composited");
        Ok(CompositeResult::new(
            image,
            BackgroundSource::Blurred,
            dimensions,
            timings,
        ))
    }

    /// Extract the subject and return it on a transparent canvas
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for empty image bytes
    /// - `Processing` for decode or extraction failures
    #[instrument(skip(self, image_bytes), fields(input_bytes = image_bytes.len()))]
    pub async fn remove_background(&self, image_bytes: &[u8]) -> Result<CompositeResult> {
        if image_bytes.is_empty() {
            return Err(BgComposeError::invalid_input("No image uploaded"));
        }

        let total_start = Instant::now();
        let mut timings = StageTimings::default();

        let decode_start = Instant::now();
        let input = ImageCodec::decode_bytes(image_bytes)?;
        timings.decode_ms = Some(elapsed_ms(decode_start));

        let extract_start = Instant::now();
        let subject = self.extractor.extract(&input).await?;
        timings.extract_ms = Some(elapsed_ms(extract_start));
        timings.total_ms = elapsed_ms(total_start);

        let dimensions = subject.dimensions();
        info!(width = dimensions.0, height = dimensions.1, "Background removed");
        Ok(CompositeResult::new(
            subject,
            BackgroundSource::None,
            dimensions,
            timings,
        ))
    }

    /// Attempt remote generation, falling back to procedural synthesis
    ///
    /// A single remote attempt is made per request, bounded by the
    /// configured timeout. Any failure — error status, transport problem,
    /// undecodable response, or timeout — selects the fallback: the ORIGINAL
    /// prompt is classified and a gradient synthesized at the subject's
    /// dimensions. Fallback synthesis cannot fail for positive dimensions,
    /// so this method is infallible.
    async fn resolve_background(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
    ) -> (RgbaImage, BackgroundSource) {
        if let Some(remote) = &self.remote {
            let request = BackgroundRequest {
                prompt: prompt.to_string(),
                width,
                height,
            };
            match tokio::time::timeout(self.config.remote_timeout, remote.generate(&request)).await
            {
                Ok(Ok(background)) => {
                    debug!("Remote background generated");
                    return (background, BackgroundSource::Remote);
                },
                Ok(Err(e)) => {
                    warn!("Remote generation failed, falling back to synthesis: {}", e);
                },
                Err(_) => {
                    warn!(
                        "Remote generation timed out after {:?}, falling back to synthesis",
                        self.config.remote_timeout
                    );
                },
            }
        }

        let category = SceneClassifier::classify(prompt);
        debug!(category = %category, "Synthesizing fallback background");
        let mut synthesizer = self.synthesizer();
        (
            synthesizer.synthesize(category, width, height),
            BackgroundSource::Procedural(category),
        )
    }

    fn synthesizer(&self) -> BackgroundSynthesizer {
        match self.config.synthesis_seed {
            Some(seed) => BackgroundSynthesizer::with_seed(seed),
            None => BackgroundSynthesizer::new(),
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
