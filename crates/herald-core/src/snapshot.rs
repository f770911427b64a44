//! Environment snapshot.
//!
//! One read of external signals, owned by the orchestrator for the duration
//! of a single cycle. Numeric signals feed the trigger evaluator; descriptive
//! fields only feed content generation.

use serde::{Deserialize, Serialize};

/// Neutral fear/greed reading used when upstream does not provide one.
pub const NEUTRAL_FEAR_GREED: f64 = 50.0;

/// External signals for one decision cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentSnapshot {
    /// Price change in percent.
    pub price_change: f64,
    /// Volume relative to baseline (1.0 = normal).
    pub volume_spike: f64,
    /// News relevance score (0–10).
    pub news_relevance: f64,
    /// Fear/greed index (0–100).
    pub fear_greed_index: f64,
    /// Whether misinformation was detected upstream.
    pub misinformation_detected: bool,
    /// Whether a meme opportunity was detected upstream.
    pub meme_opportunity: bool,
    /// Trending topics (generation only).
    pub trending_topics: Vec<String>,
    /// Latest headline (generation only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_news: Option<String>,
    /// Sentiment label such as `"bullish"` (generation only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    /// Reference asset price (generation only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_price: Option<f64>,
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self {
            price_change: 0.0,
            volume_spike: 1.0,
            news_relevance: 0.0,
            fear_greed_index: NEUTRAL_FEAR_GREED,
            misinformation_detected: false,
            meme_opportunity: false,
            trending_topics: Vec::new(),
            latest_news: None,
            sentiment: None,
            asset_price: None,
        }
    }
}
