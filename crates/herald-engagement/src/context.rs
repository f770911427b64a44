//! Environment snapshot sources.
//!
//! Market data acquisition is not part of this crate. [`StaticContextSource`]
//! serves a fixed snapshot and [`FileContextSource`] re-reads a JSON file each
//! tick, so an external process can feed signals in.

use std::path::PathBuf;

use async_trait::async_trait;
use herald_core::EnvironmentSnapshot;

use crate::errors::{EngagementError, Result};

/// Produces one snapshot per scheduling tick.
#[async_trait]
pub trait ContextSource: Send + Sync {
    /// Current snapshot.
    async fn snapshot(&self) -> Result<EnvironmentSnapshot>;
}

/// Always returns the same snapshot.
#[derive(Clone, Debug, Default)]
pub struct StaticContextSource {
    snapshot: EnvironmentSnapshot,
}

impl StaticContextSource {
    /// Source for a fixed snapshot.
    #[must_use]
    pub fn new(snapshot: EnvironmentSnapshot) -> Self {
        Self { snapshot }
    }

    /// Canned market reading used when no feed is configured.
    #[must_use]
    pub fn mock_market() -> Self {
        Self::new(EnvironmentSnapshot {
            price_change: 3.5,
            volume_spike: 1.2,
            news_relevance: 8.0,
            fear_greed_index: 65.0,
            misinformation_detected: false,
            meme_opportunity: false,
            trending_topics: vec!["Bitcoin".into(), "ETF".into(), "DeFi".into()],
            latest_news: Some("Bitcoin breaks $50K resistance".into()),
            sentiment: Some("bullish".into()),
            asset_price: Some(50_000.0),
        })
    }
}

#[async_trait]
impl ContextSource for StaticContextSource {
    async fn snapshot(&self) -> Result<EnvironmentSnapshot> {
        Ok(self.snapshot.clone())
    }
}

/// Reads the snapshot from a JSON file on every call.
#[derive(Clone, Debug)]
pub struct FileContextSource {
    path: PathBuf,
}

impl FileContextSource {
    /// Source backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContextSource for FileContextSource {
    async fn snapshot(&self) -> Result<EnvironmentSnapshot> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| EngagementError::Context(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| EngagementError::Context(format!("{}: {e}", self.path.display())))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn static_source_repeats_snapshot() {
        let source = StaticContextSource::mock_market();
        let a = source.snapshot().await.unwrap();
        let b = source.snapshot().await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.trending_topics.len(), 3);
    }

    #[tokio::test]
    async fn file_source_reads_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.json");
        std::fs::write(&path, r#"{"priceChange": 7.2, "memeOpportunity": true}"#).unwrap();

        let snapshot = FileContextSource::new(&path).snapshot().await.unwrap();
        assert!((snapshot.price_change - 7.2).abs() < f64::EPSILON);
        assert!(snapshot.meme_opportunity);
        assert!((snapshot.volume_spike - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn file_source_errors_are_context_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = FileContextSource::new(dir.path().join("nope.json"));
        assert_matches!(missing.snapshot().await, Err(EngagementError::Context(_)));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        assert_matches!(
            FileContextSource::new(&path).snapshot().await,
            Err(EngagementError::Context(_))
        );
    }
}
