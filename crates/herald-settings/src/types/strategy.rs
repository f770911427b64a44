//! Posting strategy: trigger thresholds, frequency class, weighted post types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-agent posting strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Strategy {
    /// Numeric trigger thresholds.
    pub triggers: TriggerThresholds,
    /// Posting frequency class; selects the post cooldown.
    pub posting_frequency: PostingFrequency,
    /// Weighted post-type definitions.
    pub post_types: Vec<PostType>,
    /// Maximum replies within any 24-hour window.
    pub daily_reply_cap: u32,
    /// Number of reply angles drawn per reply.
    pub reply_angle_count: usize,
}

impl Default for Strategy {
    fn default() -> Self {
        Self {
            triggers: TriggerThresholds::default(),
            posting_frequency: PostingFrequency::default(),
            post_types: Vec::new(),
            daily_reply_cap: 10,
            reply_angle_count: 1,
        }
    }
}

/// Named thresholds consumed by the trigger evaluator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriggerThresholds {
    /// Price change (percent) that authorizes a post.
    pub price_movement_threshold: f64,
    /// Volume spike ratio that authorizes a post.
    pub volume_spike_threshold: f64,
    /// News relevance score that authorizes a post.
    pub news_relevance_score: f64,
    /// Fear/greed readings above this are extreme.
    pub fear_greed_upper: f64,
    /// Fear/greed readings below this are extreme.
    pub fear_greed_lower: f64,
}

impl Default for TriggerThresholds {
    fn default() -> Self {
        Self {
            price_movement_threshold: 5.0,
            volume_spike_threshold: 2.0,
            news_relevance_score: 7.0,
            fear_greed_upper: 75.0,
            fear_greed_lower: 25.0,
        }
    }
}

/// Posting frequency class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingFrequency {
    /// 15-minute cooldown.
    VeryHigh,
    /// 30-minute cooldown.
    High,
    /// 60-minute cooldown.
    #[default]
    Medium,
    /// 120-minute cooldown.
    Low,
}

impl PostingFrequency {
    /// Minimum time between consecutive posts for this class.
    #[must_use]
    pub const fn cooldown(self) -> Duration {
        let minutes = match self {
            Self::VeryHigh => 15,
            Self::High => 30,
            Self::Medium => 60,
            Self::Low => 120,
        };
        Duration::from_secs(minutes * 60)
    }
}

/// One weighted post type with its templates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostType {
    /// Post type label (e.g. `"market_take"`).
    #[serde(rename = "type")]
    pub name: String,
    /// Relative selection weight.
    pub weight: f64,
    /// Template strings; one is chosen uniformly.
    pub templates: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldowns_by_class() {
        assert_eq!(PostingFrequency::VeryHigh.cooldown(), Duration::from_secs(15 * 60));
        assert_eq!(PostingFrequency::High.cooldown(), Duration::from_secs(30 * 60));
        assert_eq!(PostingFrequency::Medium.cooldown(), Duration::from_secs(60 * 60));
        assert_eq!(PostingFrequency::Low.cooldown(), Duration::from_secs(120 * 60));
    }

    #[test]
    fn frequency_parses_snake_case() {
        let f: PostingFrequency = serde_json::from_str("\"very_high\"").unwrap();
        assert_eq!(f, PostingFrequency::VeryHigh);
        assert_eq!(PostingFrequency::default(), PostingFrequency::Medium);
    }

    #[test]
    fn unknown_frequency_is_rejected() {
        assert!(serde_json::from_str::<PostingFrequency>("\"hourly\"").is_err());
    }

    #[test]
    fn post_type_uses_type_key() {
        let pt: PostType = serde_json::from_value(serde_json::json!({
            "type": "hot_take",
            "weight": 0.4,
            "templates": ["{asset} just did what?"]
        }))
        .unwrap();
        assert_eq!(pt.name, "hot_take");
        assert_eq!(pt.templates.len(), 1);
    }

    #[test]
    fn strategy_defaults() {
        let s: Strategy = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(s.daily_reply_cap, 10);
        assert_eq!(s.reply_angle_count, 1);
        assert!((s.triggers.price_movement_threshold - 5.0).abs() < f64::EPSILON);
        assert!((s.triggers.volume_spike_threshold - 2.0).abs() < f64::EPSILON);
        assert!((s.triggers.news_relevance_score - 7.0).abs() < f64::EPSILON);
    }
}
