//! Configuration types for the compositing pipeline

use crate::error::{BgComposeError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default remote text-to-image endpoint. The prompt is appended as a path
/// segment; width/height hints travel as query parameters.
pub const DEFAULT_REMOTE_ENDPOINT: &str = "https://image.pollinations.ai/prompt";

/// Default upper bound on a single remote generation attempt
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

/// Output image format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// PNG with alpha channel transparency
    Png,
    /// JPEG (no transparency, alpha dropped)
    Jpeg,
    /// Raw RGBA8 pixel data (4 bytes per pixel)
    Rgba8,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Png
    }
}

/// Configuration for pipeline operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Remote text-to-image endpoint (prompt appended as a path segment)
    pub remote_endpoint: String,

    /// Upper bound on a single remote generation attempt. One attempt is
    /// made per request; on expiry the pipeline falls back to synthesis.
    pub remote_timeout: Duration,

    /// Output format
    pub output_format: OutputFormat,

    /// JPEG quality (0-100, only used for JPEG output)
    pub jpeg_quality: u8,

    /// Fixed seed for procedural synthesis (None = entropy). Seeded runs
    /// make star placement and pastel endpoints reproducible.
    pub synthesis_seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            remote_endpoint: DEFAULT_REMOTE_ENDPOINT.to_string(),
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
            output_format: OutputFormat::default(),
            jpeg_quality: 90,
            synthesis_seed: None, // Default: visually distinct renders
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder for fluent API construction
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bgcompose::PipelineConfig;
    /// use std::time::Duration;
    ///
    /// let config = PipelineConfig::builder()
    ///     .remote_timeout(Duration::from_secs(10))
    ///     .synthesis_seed(7)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.remote_timeout, Duration::from_secs(10));
    /// ```
    #[must_use]
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }
}

/// Builder for `PipelineConfig`
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    #[must_use]
    pub fn remote_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.config.remote_endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn remote_timeout(mut self, timeout: Duration) -> Self {
        self.config.remote_timeout = timeout;
        self
    }

    #[must_use]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    #[must_use]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality.min(100);
        self
    }

    #[must_use]
    pub fn synthesis_seed(mut self, seed: u64) -> Self {
        self.config.synthesis_seed = Some(seed);
        self
    }

    /// Build the pipeline configuration
    ///
    /// # Errors
    ///
    /// Returns `BgComposeError` for:
    /// - Empty remote endpoint
    /// - Zero remote timeout
    /// - Invalid quality values (> 100)
    pub fn build(self) -> Result<PipelineConfig> {
        if self.config.remote_endpoint.is_empty() {
            return Err(BgComposeError::invalid_config(
                "Remote endpoint must not be empty",
            ));
        }
        if self.config.remote_timeout.is_zero() {
            return Err(BgComposeError::invalid_config(
                "Remote timeout must be non-zero",
            ));
        }
        if self.config.jpeg_quality > 100 {
            return Err(BgComposeError::invalid_config("JPEG quality must be 0-100"));
        }

        Ok(self.config)
    }
}

impl Default for PipelineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
