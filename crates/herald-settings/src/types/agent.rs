//! Per-agent identity and persona settings.

use herald_core::AgentId;
use serde::{Deserialize, Serialize};

use super::playbook::PlaybookRef;
use super::strategy::Strategy;

/// One configured agent.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentSettings {
    /// Stable identity; keys identity-specific triggers.
    pub id: AgentId,
    /// Display name used in logs.
    pub name: String,
    /// Platform handle the agent posts as.
    pub handle: String,
    /// Whether the agent takes part in cycles.
    pub enabled: bool,
    /// Model override for text generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Persona used in prompts.
    pub personality: Personality,
    /// System prompt for every generation call.
    pub system_prompt: String,
    /// Posting strategy.
    pub strategy: Strategy,
    /// Engagement playbook; replies are disabled without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playbook: Option<PlaybookRef>,
    /// Fixed RNG seed for reproducible selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            id: AgentId::from("agent"),
            name: "agent".to_string(),
            handle: String::new(),
            enabled: true,
            model: None,
            personality: Personality::default(),
            system_prompt: String::new(),
            strategy: Strategy::default(),
            playbook: None,
            seed: None,
        }
    }
}

/// Persona description.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personality {
    /// Archetype, e.g. `"data-driven analyst"`.
    pub archetype: String,
    /// Tone, e.g. `"witty, concise"`.
    pub tone: String,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            archetype: "commentator".to_string(),
            tone: "neutral".to_string(),
        }
    }
}
