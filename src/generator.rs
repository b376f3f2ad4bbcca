//! Background generation strategies
//!
//! The remote text-to-image provider lives behind [`BackgroundProvider`] so
//! the pipeline can bound it with a timeout and swap it out in tests. Remote
//! failures are reported as [`crate::BgComposeError::RemoteService`] and are
//! recovered by the orchestrator's fallback synthesis, never re-thrown to
//! callers.

use crate::error::Result;
use async_trait::async_trait;
use image::RgbaImage;

/// Target parameters for one background generation attempt
#[derive(Debug, Clone)]
pub struct BackgroundRequest {
    /// The user's prompt, unmodified. Providers may wrap it with their own
    /// qualifiers; the fallback path classifies this original text.
    pub prompt: String,
    /// Target width in pixels (the subject's width)
    pub width: u32,
    /// Target height in pixels (the subject's height)
    pub height: u32,
}

/// Strategy producing a background image for a request
#[async_trait]
pub trait BackgroundProvider: Send + Sync {
    /// Generate a background matching the request's exact dimensions
    ///
    /// # Errors
    ///
    /// Implementations report any failure (transport, status, decode) as a
    /// remote service error.
    async fn generate(&self, request: &BackgroundRequest) -> Result<RgbaImage>;
}

/// Style qualifiers wrapped around the user prompt before remote generation
const PROMPT_PREFIX: &str = "professional photography background scene";
const PROMPT_SUFFIX: &str =
    "high quality, detailed, 8k, photorealistic, no people, no text, landscape background";

/// Wrap a user prompt with fixed scene-quality qualifiers for the remote
/// generator. The fallback path always classifies the original prompt, not
/// this enhanced form.
#[must_use]
pub fn enhance_prompt(prompt: &str) -> String {
    format!("{}, {}, {}", PROMPT_PREFIX, prompt, PROMPT_SUFFIX)
}

#[cfg(feature = "remote")]
pub use self::remote::RemoteBackgroundGenerator;

#[cfg(feature = "remote")]
mod remote {
    use super::{enhance_prompt, BackgroundProvider, BackgroundRequest};
    use crate::error::{BgComposeError, Result};
    use crate::services::ImageCodec;
    use async_trait::async_trait;
    use image::RgbaImage;
    use std::time::Duration;
    use tracing::debug;

    /// HTTP text-to-image provider
    ///
    /// Sends the enhanced prompt as a percent-encoded path segment with
    /// width/height hints as query parameters, then decodes the response and
    /// resizes it to the requested dimensions with a Lanczos3 filter.
    pub struct RemoteBackgroundGenerator {
        client: reqwest::Client,
        endpoint: String,
    }

    impl RemoteBackgroundGenerator {
        /// Create a generator for the given endpoint
        ///
        /// The timeout applies at the HTTP client level; the pipeline bounds
        /// the whole attempt with the same duration.
        ///
        /// # Errors
        ///
        /// Returns a remote service error when the HTTP client cannot be
        /// constructed.
        pub fn new<S: Into<String>>(endpoint: S, timeout: Duration) -> Result<Self> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| {
                    BgComposeError::remote_service(format!("Failed to create HTTP client: {}", e))
                })?;

            Ok(Self {
                client,
                endpoint: endpoint.into(),
            })
        }

        fn request_url(&self, prompt: &str, width: u32, height: u32) -> Result<reqwest::Url> {
            let mut url = reqwest::Url::parse(&self.endpoint).map_err(|e| {
                BgComposeError::invalid_config(format!(
                    "Invalid remote endpoint '{}': {}",
                    self.endpoint, e
                ))
            })?;

            url.path_segments_mut()
                .map_err(|()| {
                    BgComposeError::invalid_config("Remote endpoint cannot be a base URL")
                })?
                .push(prompt);

            url.query_pairs_mut()
                .append_pair("width", &width.to_string())
                .append_pair("height", &height.to_string())
                .append_pair("seed", "-1")
                .append_pair("nologo", "true");

            Ok(url)
        }
    }

    #[async_trait]
    impl BackgroundProvider for RemoteBackgroundGenerator {
        async fn generate(&self, request: &BackgroundRequest) -> Result<RgbaImage> {
            let prompt = enhance_prompt(&request.prompt);
            let url = self.request_url(&prompt, request.width, request.height)?;
            debug!(url = %url, "Requesting remote background");

            let response = self.client.get(url).send().await.map_err(|e| {
                BgComposeError::remote_service(format!("Remote generation request failed: {}", e))
            })?;

            if !response.status().is_success() {
                return Err(BgComposeError::remote_service(format!(
                    "Remote generator returned status {}",
                    response.status()
                )));
            }

            let bytes = response.bytes().await.map_err(|e| {
                BgComposeError::remote_service(format!("Failed to read remote response: {}", e))
            })?;

            let decoded = image::load_from_memory(&bytes).map_err(|e| {
                BgComposeError::remote_service(format!("Failed to decode remote image: {}", e))
            })?;

            // Provider output is square by default; match the subject exactly
            Ok(ImageCodec::resize_to(&decoded, request.width, request.height))
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_prompt_wraps_user_text() {
        let enhanced = enhance_prompt("sunset over ocean");
        assert!(enhanced.starts_with("professional photography background scene"));
        assert!(enhanced.contains("sunset over ocean"));
        assert!(enhanced.ends_with("landscape background"));
    }

    #[test]
    fn test_enhance_prompt_keeps_empty_prompt_slot() {
        let enhanced = enhance_prompt("");
        assert!(enhanced.contains(", , "));
    }
}
