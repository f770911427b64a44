//! In-memory platform.
//!
//! Serves seeded search results, profiles and timelines, and records every
//! submission instead of publishing it. Individual operations can be made to
//! fail so callers can exercise their isolation paths. The binary uses it for
//! `--dry-run`, loading the seed data from a JSON fixture.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use herald_core::{ContentItem, Profile, SubmitReceipt};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::PlatformClient;
use crate::errors::{PlatformError, Result};

/// Seed data for an [`InMemoryPlatform`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformFixture {
    /// Search results per topic, in the order search returns them.
    pub search: HashMap<String, Vec<ContentItem>>,
    /// Known authors keyed by author ID.
    pub authors: HashMap<String, AuthorFixture>,
}

/// One seeded author.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorFixture {
    /// Public profile.
    pub profile: Profile,
    /// Timeline, most recent first.
    pub posts: Vec<ContentItem>,
}

/// A submission captured by the in-memory platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Assigned platform ID.
    pub platform_id: String,
    /// Submitted text.
    pub text: String,
    /// Reply target, if this was a reply.
    pub in_reply_to: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    fixture: PlatformFixture,
    failing_searches: HashSet<String>,
    failing_profiles: HashSet<String>,
    failing_content: HashSet<String>,
    reject_submissions: bool,
    submissions: Vec<Submission>,
    profile_lookups: HashMap<String, usize>,
    next_id: u64,
}

/// Fake [`PlatformClient`] backed by seeded data.
#[derive(Debug, Default)]
pub struct InMemoryPlatform {
    state: Mutex<State>,
}

impl InMemoryPlatform {
    /// Empty platform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform seeded from a fixture.
    #[must_use]
    pub fn from_fixture(fixture: PlatformFixture) -> Self {
        Self {
            state: Mutex::new(State {
                fixture,
                ..State::default()
            }),
        }
    }

    /// Add search results for `topic` (appended after existing ones).
    #[must_use]
    pub fn with_search(self, topic: &str, items: Vec<ContentItem>) -> Self {
        self.state
            .lock()
            .fixture
            .search
            .entry(topic.to_string())
            .or_default()
            .extend(items);
        self
    }

    /// Add an author with a profile and timeline (most recent first).
    #[must_use]
    pub fn with_author(self, author_id: &str, profile: Profile, posts: Vec<ContentItem>) -> Self {
        let _ = self
            .state
            .lock()
            .fixture
            .authors
            .insert(author_id.to_string(), AuthorFixture { profile, posts });
        self
    }

    /// Make searches for `topic` fail.
    #[must_use]
    pub fn failing_search(self, topic: &str) -> Self {
        let _ = self.state.lock().failing_searches.insert(topic.to_string());
        self
    }

    /// Make profile lookups for `author_id` fail.
    #[must_use]
    pub fn failing_profile(self, author_id: &str) -> Self {
        let _ = self.state.lock().failing_profiles.insert(author_id.to_string());
        self
    }

    /// Make timeline fetches for `author_id` fail.
    #[must_use]
    pub fn failing_content(self, author_id: &str) -> Self {
        self.set_failing_content(author_id, true);
        self
    }

    /// Start or stop failing timeline fetches for `author_id`.
    pub fn set_failing_content(&self, author_id: &str, failing: bool) {
        let mut state = self.state.lock();
        if failing {
            let _ = state.failing_content.insert(author_id.to_string());
        } else {
            let _ = state.failing_content.remove(author_id);
        }
    }

    /// Reject (or stop rejecting) every submission.
    pub fn set_reject_submissions(&self, reject: bool) {
        self.state.lock().reject_submissions = reject;
    }

    /// All captured submissions, oldest first.
    pub fn submissions(&self) -> Vec<Submission> {
        self.state.lock().submissions.clone()
    }

    /// How many times the profile of `author_id` was requested.
    pub fn profile_lookups(&self, author_id: &str) -> usize {
        self.state
            .lock()
            .profile_lookups
            .get(author_id)
            .copied()
            .unwrap_or(0)
    }

    fn submit(&self, text: &str, in_reply_to: Option<&str>) -> Result<SubmitReceipt> {
        let mut state = self.state.lock();
        if state.reject_submissions {
            return Err(PlatformError::Rejected {
                message: "submissions disabled".to_string(),
            });
        }
        state.next_id += 1;
        let platform_id = format!("mem-{}", state.next_id);
        info!(platform_id = %platform_id, reply_to = ?in_reply_to, "captured submission");
        state.submissions.push(Submission {
            platform_id: platform_id.clone(),
            text: text.to_string(),
            in_reply_to: in_reply_to.map(str::to_string),
        });
        Ok(SubmitReceipt { platform_id })
    }
}

fn unavailable(what: &str, key: &str) -> PlatformError {
    PlatformError::Unavailable {
        message: format!("{what} failed for {key}"),
    }
}

#[async_trait]
impl PlatformClient for InMemoryPlatform {
    async fn search_recent(&self, query: &str, max_results: usize) -> Result<Vec<ContentItem>> {
        let state = self.state.lock();
        if state.failing_searches.contains(query) {
            return Err(unavailable("search", query));
        }
        Ok(state
            .fixture
            .search
            .get(query)
            .map(|items| items.iter().take(max_results).cloned().collect())
            .unwrap_or_default())
    }

    async fn get_profile(&self, author_id: &str) -> Result<Option<Profile>> {
        let mut state = self.state.lock();
        *state.profile_lookups.entry(author_id.to_string()).or_insert(0) += 1;
        if state.failing_profiles.contains(author_id) {
            return Err(unavailable("profile lookup", author_id));
        }
        Ok(state
            .fixture
            .authors
            .get(author_id)
            .map(|a| a.profile.clone()))
    }

    async fn get_recent_content(
        &self,
        author_id: &str,
        max_results: usize,
    ) -> Result<Vec<ContentItem>> {
        let state = self.state.lock();
        if state.failing_content.contains(author_id) {
            return Err(unavailable("content fetch", author_id));
        }
        Ok(state
            .fixture
            .authors
            .get(author_id)
            .map(|a| a.posts.iter().take(max_results).cloned().collect())
            .unwrap_or_default())
    }

    async fn submit_post(&self, text: &str) -> Result<SubmitReceipt> {
        self.submit(text, None)
    }

    async fn submit_reply(&self, target_content_id: &str, text: &str) -> Result<SubmitReceipt> {
        self.submit(text, Some(target_content_id))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn item(id: &str, author: &str) -> ContentItem {
        ContentItem {
            id: id.into(),
            author_id: Some(author.into()),
            ..ContentItem::default()
        }
    }

    #[tokio::test]
    async fn search_respects_max_results() {
        let platform =
            InMemoryPlatform::new().with_search("btc", vec![item("1", "a"), item("2", "b")]);
        assert_eq!(platform.search_recent("btc", 1).await.unwrap().len(), 1);
        assert!(platform.search_recent("eth", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn profile_lookups_are_counted() {
        let platform = InMemoryPlatform::new().with_author("a", Profile::default(), vec![]);
        let _ = platform.get_profile("a").await.unwrap();
        let _ = platform.get_profile("a").await.unwrap();
        assert_eq!(platform.profile_lookups("a"), 2);
        assert!(platform.get_profile("zz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn injected_failures() {
        let platform = InMemoryPlatform::new()
            .failing_search("btc")
            .failing_profile("a")
            .failing_content("b");
        assert_matches!(
            platform.search_recent("btc", 10).await,
            Err(PlatformError::Unavailable { .. })
        );
        assert!(platform.get_profile("a").await.is_err());
        assert!(platform.get_recent_content("b", 20).await.is_err());

        platform.set_failing_content("b", false);
        assert!(platform.get_recent_content("b", 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn submissions_are_captured_in_order() {
        let platform = InMemoryPlatform::new();
        let first = platform.submit_post("hello").await.unwrap();
        let second = platform.submit_reply("t1", "agreed").await.unwrap();
        assert_ne!(first.platform_id, second.platform_id);

        let subs = platform.submissions();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].text, "hello");
        assert_eq!(subs[1].in_reply_to.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn rejected_submissions_are_not_captured() {
        let platform = InMemoryPlatform::new();
        platform.set_reject_submissions(true);
        assert_matches!(
            platform.submit_post("hello").await,
            Err(PlatformError::Rejected { .. })
        );
        assert!(platform.submissions().is_empty());
    }

    #[test]
    fn fixture_from_json() {
        let fixture: PlatformFixture = serde_json::from_value(serde_json::json!({
            "search": {"btc": [{"id": "1", "authorId": "a"}]},
            "authors": {"a": {"profile": {"followerCount": 20000, "handle": "a"}}}
        }))
        .unwrap();
        assert_eq!(fixture.search["btc"].len(), 1);
        assert_eq!(fixture.authors["a"].profile.follower_count, 20_000);
        assert!(fixture.authors["a"].posts.is_empty());
    }
}
