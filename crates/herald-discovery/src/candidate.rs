//! Scored prospects for engagement.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An account admitted by discovery.
///
/// Followers and engagement always come from the platform. Held only for the
/// discovery pass that produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCandidate {
    /// Platform author ID.
    pub author_id: String,
    /// Handle.
    pub handle: String,
    /// Display name.
    pub display_name: String,
    /// Follower count.
    pub followers: u64,
    /// Mean interactions per recent post.
    pub avg_engagement: f64,
    /// `avg_engagement / max(1, followers)`.
    pub engagement_ratio: f64,
    /// Most recent content time; `None` when unknown.
    pub last_active: Option<DateTime<Utc>>,
    /// Topics this author was found under.
    pub topics: BTreeSet<String>,
    /// Composite score, set once per ranking pass.
    pub score: f64,
}

impl AccountCandidate {
    /// Record another topic match.
    pub fn add_topic(&mut self, topic: &str) {
        if !self.topics.contains(topic) {
            let _ = self.topics.insert(topic.to_string());
        }
    }
}
