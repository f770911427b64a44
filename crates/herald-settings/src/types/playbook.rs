//! Engagement playbooks and the growth-strategy catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Named bundle of reply angles, guardrails and discovery heuristics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Playbook {
    /// Short strategy hints for replies.
    #[serde(alias = "angles")]
    pub reply_angles: Vec<String>,
    /// Textual constraints injected into generation prompts.
    pub guardrails: Vec<String>,
    /// Thresholds used by account discovery.
    pub heuristics: DiscoveryHeuristics,
}

/// Largest accepted `recencyHours` (one year).
pub const MAX_RECENCY_HOURS: u32 = 24 * 365;

/// Discovery admission and scoring thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoveryHeuristics {
    /// Accounts below this follower count are rejected.
    pub min_followers: u64,
    /// Accounts below this average engagement are rejected.
    pub min_avg_engagement: f64,
    /// Engagement-to-follower ratio that earns a full ratio score.
    pub min_ratio: f64,
    /// Accounts whose latest content is older than this are rejected.
    pub recency_hours: u32,
    /// Maximum ranked candidates returned.
    pub result_limit: usize,
    /// Topics searched during discovery.
    pub topics: Vec<String>,
}

impl Default for DiscoveryHeuristics {
    fn default() -> Self {
        Self {
            min_followers: 10_000,
            min_avg_engagement: 50.0,
            min_ratio: 0.003,
            recency_hours: 12,
            result_limit: 50,
            topics: Vec::new(),
        }
    }
}

/// Reference from an agent to a playbook in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybookRef {
    /// Strategy domain (e.g. `"web3"`).
    pub domain: String,
    /// Playbook key within the domain (e.g. `"reply_guy_ct"`).
    pub key: String,
}

/// Playbook catalog keyed by domain, then playbook key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrowthStrategies(BTreeMap<String, BTreeMap<String, Playbook>>);

impl GrowthStrategies {
    /// Look up `domain.key`.
    pub fn playbook(&self, domain: &str, key: &str) -> Result<&Playbook> {
        self.0
            .get(domain)
            .and_then(|d| d.get(key))
            .ok_or_else(|| SettingsError::PlaybookNotFound {
                domain: domain.to_string(),
                key: key.to_string(),
            })
    }

    /// Insert or replace a playbook.
    pub fn insert(&mut self, domain: impl Into<String>, key: impl Into<String>, playbook: Playbook) {
        let _ = self
            .0
            .entry(domain.into())
            .or_default()
            .insert(key.into(), playbook);
    }

    /// Number of playbooks across all domains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
