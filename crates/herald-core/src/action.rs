//! Records of actions an agent has taken.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of outward action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Original post.
    Post,
    /// Reply to another account's content.
    Reply,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Post => write!(f, "post"),
            Self::Reply => write!(f, "reply"),
        }
    }
}

/// One successfully submitted post or reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    /// Post or reply.
    pub kind: ActionKind,
    /// Submitted text.
    pub content: String,
    /// When the submission succeeded.
    pub timestamp: DateTime<Utc>,
    /// Identifier assigned by the platform.
    pub platform_id: String,
    /// Content replied to (replies only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_content_id: Option<String>,
}

impl ActionRecord {
    /// Record for an original post.
    #[must_use]
    pub fn post(content: String, platform_id: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind: ActionKind::Post,
            content,
            timestamp,
            platform_id,
            target_content_id: None,
        }
    }

    /// Record for a reply to `target_content_id`.
    #[must_use]
    pub fn reply(
        content: String,
        platform_id: String,
        target_content_id: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            kind: ActionKind::Reply,
            content,
            timestamp,
            platform_id,
            target_content_id: Some(target_content_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_carries_target() {
        let now = Utc::now();
        let rec = ActionRecord::reply("gm".into(), "p1".into(), "t9".into(), now);
        assert_eq!(rec.kind, ActionKind::Reply);
        assert_eq!(rec.target_content_id.as_deref(), Some("t9"));
    }

    #[test]
    fn post_serializes_without_target() {
        let rec = ActionRecord::post("hello".into(), "p1".into(), Utc::now());
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["kind"], "post");
        assert!(json.get("targetContentId").is_none());
    }

    #[test]
    fn kind_display() {
        assert_eq!(ActionKind::Post.to_string(), "post");
        assert_eq!(ActionKind::Reply.to_string(), "reply");
    }
}
