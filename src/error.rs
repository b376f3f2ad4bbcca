//! Error types for background compositing operations

use thiserror::Error;

/// Result type alias for background compositing operations
pub type Result<T> = std::result::Result<T, BgComposeError>;

/// Error types for the background compositing pipeline
#[derive(Error, Debug)]
pub enum BgComposeError {
    /// Input/output errors (stream read failures, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode/encode errors from the image crate
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Missing or empty client input; nothing was processed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Remote generator failures (status, timeout, malformed response).
    /// Recovered inside the pipeline via fallback synthesis; never surfaced
    /// to the caller of the AI-background flow.
    #[error("Remote service error: {0}")]
    RemoteService(String),

    /// Pipeline processing failures (extraction, codec, compositing)
    #[error("Processing error: {0}")]
    Processing(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BgComposeError {
    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new remote service error
    pub fn remote_service<S: Into<String>>(msg: S) -> Self {
        Self::RemoteService(msg.into())
    }

    /// Create a new processing error
    pub fn processing<S: Into<String>>(msg: S) -> Self {
        Self::Processing(msg.into())
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a processing error with stage context
    pub fn processing_stage_error(stage: &str, details: &str, input_info: Option<&str>) -> Self {
        let input_context = match input_info {
            Some(info) => format!(" (input: {})", info),
            None => String::new(),
        };

        Self::Processing(format!(
            "Processing failed at stage '{}'{}: {}",
            stage, input_context, details
        ))
    }

    /// Whether this error reports bad client input rather than a failure
    /// inside the pipeline
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
