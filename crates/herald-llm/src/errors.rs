//! Generation error types.

use thiserror::Error;

/// Errors returned by [`TextGenerator`](crate::TextGenerator) implementations.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },

    /// Provider answered without any text.
    #[error("empty completion")]
    Empty,
}

impl GenerationError {
    /// Whether the failure is likely transient (timeouts, 429, 5xx).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Json(_) | Self::Empty => false,
        }
    }
}

/// Result type for generation.
pub type Result<T> = std::result::Result<T, GenerationError>;
