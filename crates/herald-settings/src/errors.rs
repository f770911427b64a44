//! Settings error types.

use thiserror::Error;

/// Errors that can occur when loading, parsing or resolving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file from disk.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse JSON in the settings file.
    #[error("failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A settings value was invalid (e.g., empty post-type list).
    #[error("invalid settings value: {0}")]
    InvalidValue(String),
    /// A playbook reference did not resolve.
    #[error("playbook not found: {domain}.{key}")]
    PlaybookNotFound {
        /// Strategy domain (e.g. `"web3"`).
        domain: String,
        /// Playbook key within the domain.
        key: String,
    },
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = SettingsError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "not found",
        ));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn json_error_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err = SettingsError::Json(json_err);
        assert!(err.to_string().contains("parse settings JSON"));
    }

    #[test]
    fn playbook_not_found_display() {
        let err = SettingsError::PlaybookNotFound {
            domain: "web3".into(),
            key: "reply_guy_ct".into(),
        };
        assert_eq!(err.to_string(), "playbook not found: web3.reply_guy_ct");
    }

    #[test]
    fn invalid_value_display() {
        let err = SettingsError::InvalidValue("weight must be positive".to_string());
        assert_eq!(err.to_string(), "invalid settings value: weight must be positive");
    }
}
