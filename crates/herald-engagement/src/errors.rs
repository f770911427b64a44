//! Engagement error types.

use herald_llm::GenerationError;
use herald_platform::PlatformError;
use herald_settings::SettingsError;
use thiserror::Error;

/// Errors raised by the decision cycle and its setup.
#[derive(Debug, Error)]
pub enum EngagementError {
    /// Setup defect (missing playbook, empty weighted list, bad weight).
    /// Fails the agent's cycle instead of defaulting.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Text generation failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// A platform call failed.
    #[error("platform call failed: {0}")]
    Platform(#[from] PlatformError),

    /// The environment snapshot could not be produced.
    #[error("context unavailable: {0}")]
    Context(String),
}

impl EngagementError {
    /// Whether this is a setup defect rather than a collaborator failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Whether the collaborator failure is likely to clear by the next cycle.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Generation(e) => e.is_transient(),
            Self::Platform(e) => e.is_transient(),
            Self::Configuration(_) | Self::Context(_) => false,
        }
    }
}

impl From<SettingsError> for EngagementError {
    fn from(err: SettingsError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Result type for engagement operations.
pub type Result<T> = std::result::Result<T, EngagementError>;
