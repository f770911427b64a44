//! Scoring heuristics.
//!
//! Pure functions over platform data. Missing metrics count as zero and an
//! unparseable timestamp is "unknown"; nothing here returns an error.

use chrono::{DateTime, Utc};
use herald_core::ContentItem;

/// Posts considered when estimating engagement.
pub const ENGAGEMENT_LOOKBACK: usize = 10;

const RATIO_WEIGHT: f64 = 0.5;
const FOLLOWER_WEIGHT: f64 = 0.3;
const TOPIC_WEIGHT: f64 = 0.2;
/// Followers at which the follower score saturates.
const FOLLOWER_SCALE: f64 = 100_000.0;
/// Distinct matched topics at which the topic score saturates.
const TOPIC_SCALE: f64 = 5.0;

/// Mean of likes + retweets + replies over the first `lookback` posts.
///
/// `posts` is most recent first. Returns 0 for an empty slice. A `lookback`
/// of 0 is treated as 1.
#[allow(clippy::cast_precision_loss)]
pub fn estimate_engagement(posts: &[ContentItem], lookback: usize) -> f64 {
    let window = &posts[..posts.len().min(lookback.max(1))];
    if window.is_empty() {
        return 0.0;
    }
    let total: f64 = window.iter().map(|p| p.interaction_total() as f64).sum();
    total / window.len() as f64
}

/// Timestamp of the first (most recent) post, if present and parseable.
pub fn most_recent_timestamp(posts: &[ContentItem]) -> Option<DateTime<Utc>> {
    posts.first().and_then(ContentItem::created_at_utc)
}

/// Engagement-to-follower ratio; followers below 1 count as 1.
#[allow(clippy::cast_precision_loss)]
pub fn engagement_ratio(avg_engagement: f64, followers: u64) -> f64 {
    avg_engagement / followers.max(1) as f64
}

/// `0.5·ratio + 0.3·followers + 0.2·topics`, each component capped at 1.
///
/// A non-positive `min_ratio` gives a full ratio component.
#[allow(clippy::cast_precision_loss)]
pub fn composite_score(ratio: f64, min_ratio: f64, followers: u64, distinct_topics: usize) -> f64 {
    let ratio_score = if min_ratio > 0.0 {
        (ratio / min_ratio).min(1.0)
    } else {
        1.0
    };
    let follower_score = (followers as f64 / FOLLOWER_SCALE).min(1.0);
    let topic_score = (distinct_topics as f64 / TOPIC_SCALE).min(1.0);
    RATIO_WEIGHT * ratio_score + FOLLOWER_WEIGHT * follower_score + TOPIC_WEIGHT * topic_score
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
