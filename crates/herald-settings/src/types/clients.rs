//! Collaborator client settings (platform API, language model).

use serde::{Deserialize, Serialize};

/// Platform REST client settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformSettings {
    /// API base URL.
    pub base_url: String,
    /// Name of the environment variable holding the bearer token.
    pub bearer_token_env: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.twitter.com".to_string(),
            bearer_token_env: "HERALD_PLATFORM_TOKEN".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Chat-completions client settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmSettings {
    /// API base URL (the `/chat/completions` path is appended).
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Model used when an agent does not override it.
    pub default_model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "HERALD_LLM_API_KEY".to_string(),
            default_model: "gpt-4o-mini".to_string(),
            temperature: 0.8,
            max_tokens: 200,
            timeout_ms: 60_000,
        }
    }
}
