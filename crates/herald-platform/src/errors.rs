//! Platform client error types.

use thiserror::Error;

/// Errors returned by [`PlatformClient`](crate::PlatformClient) operations.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Platform returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },

    /// Submission was refused by the platform.
    #[error("submission rejected: {message}")]
    Rejected {
        /// Reason given by the platform.
        message: String,
    },

    /// Operation unavailable (used by the in-memory platform for injected failures).
    #[error("platform unavailable: {message}")]
    Unavailable {
        /// Error description.
        message: String,
    },
}

impl PlatformError {
    /// Whether the failure is likely transient (timeouts, 429, 5xx).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Unavailable { .. } => true,
            Self::Json(_) | Self::Rejected { .. } => false,
        }
    }
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
