//! Content items and profiles as seen through the platform collaborator.
//!
//! Metric fields default to zero when the upstream payload omits them, and
//! timestamps are kept as the raw upstream string. Parsing happens lazily
//! through [`parse_timestamp`], which never fails loudly: an unparseable
//! value is simply "unknown".

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One piece of content (a post) returned by search or a user timeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentItem {
    /// Platform-assigned content identifier.
    pub id: String,
    /// Author identifier. Items without an author are skipped by discovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    /// Content text.
    pub text: String,
    /// Like count.
    pub like_count: u64,
    /// Retweet / repost count.
    pub retweet_count: u64,
    /// Reply count.
    pub reply_count: u64,
    /// Raw creation timestamp as delivered upstream (RFC 3339 expected).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ContentItem {
    /// Sum of likes, retweets and replies.
    #[must_use]
    pub fn interaction_total(&self) -> u64 {
        self.like_count
            .saturating_add(self.retweet_count)
            .saturating_add(self.reply_count)
    }

    /// Parsed creation time, or `None` when absent or unparseable.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

/// Public profile of an account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    /// Follower count.
    pub follower_count: u64,
    /// Handle (username without `@`).
    pub handle: String,
    /// Display name.
    pub display_name: String,
}

/// Acknowledgement of a successful post or reply submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    /// Identifier the platform assigned to the new content.
    pub platform_id: String,
}

/// Parse an upstream timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T12:00:00Z`, `...+02:00`) and naive ISO 8601
/// without an offset, which is read as UTC. Anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
