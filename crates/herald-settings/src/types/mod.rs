//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]`. Each type implements
//! [`Default`] with production default values; types marked with
//! `#[serde(default)]` accept partial JSON.

mod agent;
mod clients;
mod playbook;
mod strategy;

pub use agent::*;
pub use clients::*;
pub use playbook::*;
pub use strategy::*;

use herald_core::LogFormat;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Root settings type.
///
/// # JSON Format
///
/// ```json
/// {
///   "scheduler": { "cycleIntervalSecs": 300 },
///   "agents": [{ "id": "grok_crypto", "name": "Grok", "strategy": { ... } }],
///   "growthStrategies": { "web3": { "reply_guy_ct": { ... } } }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeraldSettings {
    /// Settings schema version.
    pub version: String,
    /// Logging configuration.
    pub logging: LoggingSettings,
    /// Cycle scheduling.
    pub scheduler: SchedulerSettings,
    /// Platform client configuration.
    pub platform: PlatformSettings,
    /// Language-model client configuration.
    pub llm: LlmSettings,
    /// Configured agents.
    pub agents: Vec<AgentSettings>,
    /// Playbook catalog, keyed by domain then playbook key.
    pub growth_strategies: GrowthStrategies,
}

impl Default for HeraldSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            logging: LoggingSettings::default(),
            scheduler: SchedulerSettings::default(),
            platform: PlatformSettings::default(),
            llm: LlmSettings::default(),
            agents: Vec::new(),
            growth_strategies: GrowthStrategies::default(),
        }
    }
}

impl HeraldSettings {
    /// Resolve the playbook an agent refers to.
    ///
    /// Returns `Ok(None)` when the agent has no playbook reference and
    /// [`SettingsError::PlaybookNotFound`](crate::SettingsError::PlaybookNotFound)
    /// when the reference is dangling.
    pub fn playbook_for(&self, agent: &AgentSettings) -> Result<Option<&Playbook>> {
        match &agent.playbook {
            Some(reference) => self
                .growth_strategies
                .playbook(&reference.domain, &reference.key)
                .map(Some),
            None => Ok(None),
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Scheduling loop settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerSettings {
    /// Seconds between decision cycles.
    pub cycle_interval_secs: u64,
    /// Run a single cycle and exit.
    pub run_once: bool,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            cycle_interval_secs: 300,
            run_once: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
