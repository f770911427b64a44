//! Discovery and ranking engine.
//!
//! One pass:
//!
//! 1. search each topic (at most [`SEARCH_BATCH_SIZE`] items)
//! 2. profile each new author once, with [`AUTHOR_POST_WINDOW`] recent posts
//! 3. admit authors that pass the follower, engagement and recency filters
//! 4. score, stable-sort descending, truncate
//!
//! A failed search counts as an empty batch for that topic. A failed profile
//! or timeline fetch drops that author only.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, TimeDelta, Utc};
use herald_core::ContentItem;
use herald_platform::PlatformClient;
use herald_settings::DiscoveryHeuristics;
use tracing::{debug, info, warn};

use crate::candidate::AccountCandidate;
use crate::scoring::{
    ENGAGEMENT_LOOKBACK, composite_score, engagement_ratio, estimate_engagement,
    most_recent_timestamp,
};

/// Content items fetched per topic search.
pub const SEARCH_BATCH_SIZE: usize = 100;
/// Recent posts fetched per newly seen author.
pub const AUTHOR_POST_WINDOW: usize = 20;

/// Outcome of profiling a newly seen author.
enum Admission {
    Admitted(AccountCandidate),
    Rejected(&'static str),
}

/// Searches topics and ranks the authors behind the results.
#[derive(Clone, Debug)]
pub struct DiscoveryEngine<P> {
    platform: P,
}

impl<P: PlatformClient> DiscoveryEngine<P> {
    /// Create an engine over a platform client.
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Underlying platform client.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Run one discovery pass over `topics`.
    ///
    /// Returns at most `heuristics.result_limit` candidates, highest score
    /// first; ties keep admission order. No author appears twice.
    pub async fn search_and_rank(
        &self,
        topics: &[String],
        heuristics: &DiscoveryHeuristics,
        now: DateTime<Utc>,
    ) -> Vec<AccountCandidate> {
        // A window reaching past the representable range filters nothing.
        let window = TimeDelta::hours(i64::from(heuristics.recency_hours));
        let cutoff = now.checked_sub_signed(window);
        let mut candidates: Vec<AccountCandidate> = Vec::new();
        let mut admitted: HashMap<String, usize> = HashMap::new();
        let mut visited: HashSet<String> = HashSet::new();

        for topic in topics {
            let batch = match self.platform.search_recent(topic, SEARCH_BATCH_SIZE).await {
                Ok(batch) => batch,
                Err(e) => {
                    warn!(topic = %topic, error = %e, "topic search failed, treating as empty");
                    Vec::new()
                }
            };
            debug!(topic = %topic, items = batch.len(), "searched topic");

            for item in &batch {
                let Some(author_id) = item.author_id.as_deref() else {
                    continue;
                };
                if let Some(&idx) = admitted.get(author_id) {
                    candidates[idx].add_topic(topic);
                    continue;
                }
                if !visited.insert(author_id.to_string()) {
                    continue;
                }

                match self.profile(author_id, topic, heuristics, cutoff).await {
                    Admission::Admitted(candidate) => {
                        let _ = admitted.insert(author_id.to_string(), candidates.len());
                        candidates.push(candidate);
                    }
                    Admission::Rejected(reason) => {
                        debug!(author_id, reason, "author rejected");
                    }
                }
            }
        }

        for candidate in &mut candidates {
            candidate.score = composite_score(
                candidate.engagement_ratio,
                heuristics.min_ratio,
                candidate.followers,
                candidate.topics.len(),
            );
        }
        // Stable: equal scores keep admission order.
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(heuristics.result_limit);

        info!(
            topics = topics.len(),
            authors_seen = visited.len(),
            ranked = candidates.len(),
            top_score = candidates.first().map(|c| c.score),
            "discovery pass complete"
        );
        candidates
    }

    async fn profile(
        &self,
        author_id: &str,
        topic: &str,
        heuristics: &DiscoveryHeuristics,
        cutoff: Option<DateTime<Utc>>,
    ) -> Admission {
        let profile = match self.platform.get_profile(author_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => return Admission::Rejected("profile absent"),
            Err(e) => {
                warn!(author_id, error = %e, "profile lookup failed, skipping author");
                return Admission::Rejected("profile lookup failed");
            }
        };
        if profile.follower_count < heuristics.min_followers {
            return Admission::Rejected("below min followers");
        }

        let posts: Vec<ContentItem> = match self
            .platform
            .get_recent_content(author_id, AUTHOR_POST_WINDOW)
            .await
        {
            Ok(posts) => posts,
            Err(e) => {
                warn!(author_id, error = %e, "content fetch failed, skipping author");
                return Admission::Rejected("content fetch failed");
            }
        };
        let avg_engagement = estimate_engagement(&posts, ENGAGEMENT_LOOKBACK);
        if avg_engagement < heuristics.min_avg_engagement {
            return Admission::Rejected("below min engagement");
        }

        let last_active = most_recent_timestamp(&posts);
        if last_active.zip(cutoff).is_some_and(|(ts, cutoff)| ts < cutoff) {
            return Admission::Rejected("stale");
        }

        Admission::Admitted(AccountCandidate {
            author_id: author_id.to_string(),
            handle: profile.handle,
            display_name: profile.display_name,
            followers: profile.follower_count,
            avg_engagement,
            engagement_ratio: engagement_ratio(avg_engagement, profile.follower_count),
            last_active,
            topics: BTreeSet::from([topic.to_string()]),
            score: 0.0,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::Profile;
    use herald_platform::InMemoryPlatform;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn hit(id: &str, author: &str) -> ContentItem {
        ContentItem {
            id: id.into(),
            author_id: Some(author.into()),
            ..ContentItem::default()
        }
    }

    fn posts(total: u64, hours_ago: Option<i64>) -> Vec<ContentItem> {
        let created_at = hours_ago.map(|h| (now() - TimeDelta::hours(h)).to_rfc3339());
        vec![ContentItem {
            id: format!("p{total}"),
            like_count: total,
            created_at,
            ..ContentItem::default()
        }]
    }

    fn profile(handle: &str, followers: u64) -> Profile {
        Profile {
            follower_count: followers,
            handle: handle.into(),
            display_name: handle.to_uppercase(),
        }
    }

    fn heuristics() -> DiscoveryHeuristics {
        DiscoveryHeuristics::default()
    }

    fn topics(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| (*t).to_string()).collect()
    }

    #[tokio::test]
    async fn dedups_authors_across_and_within_topics() {
        let platform = InMemoryPlatform::new()
            .with_search("btc", vec![hit("1", "a"), hit("2", "a"), hit("3", "b")])
            .with_search("eth", vec![hit("4", "a")])
            .with_author("a", profile("alice", 50_000), posts(500, Some(1)))
            .with_author("b", profile("bob", 20_000), posts(100, Some(1)));
        let engine = DiscoveryEngine::new(platform);

        let ranked = engine
            .search_and_rank(&topics(&["btc", "eth"]), &heuristics(), now())
            .await;

        assert_eq!(ranked.len(), 2);
        let alice = ranked.iter().find(|c| c.author_id == "a").unwrap();
        assert_eq!(alice.topics, BTreeSet::from(["btc".to_string(), "eth".to_string()]));
        assert_eq!(engine.platform().profile_lookups("a"), 1);
        assert_eq!(engine.platform().profile_lookups("b"), 1);
    }

    #[tokio::test]
    async fn rejected_authors_are_profiled_once() {
        let platform = InMemoryPlatform::new()
            .with_search("btc", vec![hit("1", "small"), hit("2", "small")])
            .with_search("eth", vec![hit("3", "small")])
            .with_author("small", profile("small", 10), posts(500, Some(1)));
        let engine = DiscoveryEngine::new(platform);

        let ranked = engine
            .search_and_rank(&topics(&["btc", "eth"]), &heuristics(), now())
            .await;
        assert!(ranked.is_empty());
        assert_eq!(engine.platform().profile_lookups("small"), 1);
    }

    #[tokio::test]
    async fn follower_floor_excludes_high_ratio_accounts() {
        let platform = InMemoryPlatform::new()
            .with_search("btc", vec![hit("1", "tiny"), hit("2", "big")])
            .with_author("tiny", profile("tiny", 5_000), posts(4_000, Some(1)))
            .with_author("big", profile("big", 20_000), posts(60, Some(1)));
        let engine = DiscoveryEngine::new(platform);

        let ranked = engine.search_and_rank(&topics(&["btc"]), &heuristics(), now()).await;
        let ids: Vec<&str> = ranked.iter().map(|c| c.author_id.as_str()).collect();
        assert_eq!(ids, vec!["big"]);
    }

    #[tokio::test]
    async fn engagement_and_recency_filters() {
        let platform = InMemoryPlatform::new()
            .with_search(
                "btc",
                vec![hit("1", "quiet"), hit("2", "stale"), hit("3", "unknown"), hit("4", "fresh")],
            )
            .with_author("quiet", profile("quiet", 20_000), posts(10, Some(1)))
            .with_author("stale", profile("stale", 20_000), posts(500, Some(13)))
            .with_author("unknown", profile("unknown", 20_000), posts(500, None))
            .with_author("fresh", profile("fresh", 20_000), posts(500, Some(11)));
        let engine = DiscoveryEngine::new(platform);

        let ranked = engine.search_and_rank(&topics(&["btc"]), &heuristics(), now()).await;
        let mut ids: Vec<&str> = ranked.iter().map(|c| c.author_id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["fresh", "unknown"]);
        let unknown = ranked.iter().find(|c| c.author_id == "unknown").unwrap();
        assert!(unknown.last_active.is_none());
    }

    #[tokio::test]
    async fn oversized_recency_window_admits_old_content() {
        let platform = InMemoryPlatform::new()
            .with_search("btc", vec![hit("1", "ancient")])
            .with_author("ancient", profile("ancient", 20_000), posts(500, Some(24 * 365 * 20)));
        let engine = DiscoveryEngine::new(platform);
        let wide = DiscoveryHeuristics {
            recency_hours: u32::MAX,
            ..heuristics()
        };

        let ranked = engine.search_and_rank(&topics(&["btc"]), &wide, now()).await;
        assert_eq!(ranked.len(), 1);

        let ranked = engine
            .search_and_rank(&topics(&["btc"]), &wide, DateTime::<Utc>::MIN_UTC)
            .await;
        assert_eq!(ranked.len(), 1);
    }

    #[tokio::test]
    async fn ratio_is_scoring_only() {
        // 50 / 100k is far below min_ratio but still admitted
        let platform = InMemoryPlatform::new()
            .with_search("btc", vec![hit("1", "whale")])
            .with_author("whale", profile("whale", 100_000), posts(50, Some(1)));
        let engine = DiscoveryEngine::new(platform);

        let ranked = engine.search_and_rank(&topics(&["btc"]), &heuristics(), now()).await;
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].engagement_ratio < heuristics().min_ratio);
    }

    #[tokio::test]
    async fn failures_are_isolated() {
        let platform = InMemoryPlatform::new()
            .with_search("btc", vec![hit("1", "broken"), hit("2", "mute"), hit("3", "ok")])
            .with_search("eth", vec![hit("4", "ok2")])
            .failing_search("sol")
            .failing_profile("broken")
            .failing_content("mute")
            .with_author("broken", profile("broken", 20_000), posts(500, Some(1)))
            .with_author("mute", profile("mute", 20_000), posts(500, Some(1)))
            .with_author("ok", profile("ok", 20_000), posts(500, Some(1)))
            .with_author("ok2", profile("ok2", 20_000), posts(500, Some(1)));
        let engine = DiscoveryEngine::new(platform);

        let ranked = engine
            .search_and_rank(&topics(&["sol", "btc", "eth"]), &heuristics(), now())
            .await;
        let ids: Vec<&str> = ranked.iter().map(|c| c.author_id.as_str()).collect();
        assert_eq!(ids, vec!["ok", "ok2"]);
    }

    #[tokio::test]
    async fn items_without_author_are_skipped() {
        let platform = InMemoryPlatform::new().with_search(
            "btc",
            vec![ContentItem {
                id: "1".into(),
                ..ContentItem::default()
            }],
        );
        let engine = DiscoveryEngine::new(platform);
        assert!(
            engine
                .search_and_rank(&topics(&["btc"]), &heuristics(), now())
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn ranking_is_stable_and_truncated() {
        let platform = InMemoryPlatform::new()
            .with_search(
                "btc",
                vec![hit("1", "first"), hit("2", "second"), hit("3", "best")],
            )
            .with_author("first", profile("first", 20_000), posts(100, Some(1)))
            .with_author("second", profile("second", 20_000), posts(100, Some(1)))
            .with_author("best", profile("best", 200_000), posts(1_000, Some(1)));
        let engine = DiscoveryEngine::new(platform);
        let limited = DiscoveryHeuristics {
            result_limit: 2,
            ..heuristics()
        };

        let ranked = engine.search_and_rank(&topics(&["btc"]), &limited, now()).await;
        let ids: Vec<&str> = ranked.iter().map(|c| c.author_id.as_str()).collect();
        assert_eq!(ids, vec!["best", "first"]);

        let again = engine.search_and_rank(&topics(&["btc"]), &limited, now()).await;
        assert_eq!(ranked, again);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[tokio::test]
    async fn topic_breadth_raises_score() {
        let platform = InMemoryPlatform::new()
            .with_search("btc", vec![hit("1", "narrow"), hit("2", "broad")])
            .with_search("eth", vec![hit("3", "broad")])
            .with_author("narrow", profile("narrow", 20_000), posts(100, Some(1)))
            .with_author("broad", profile("broad", 20_000), posts(100, Some(1)));
        let engine = DiscoveryEngine::new(platform);

        let ranked = engine
            .search_and_rank(&topics(&["btc", "eth"]), &heuristics(), now())
            .await;
        assert_eq!(ranked[0].author_id, "broad");
        assert!((ranked[0].score - ranked[1].score - 0.2 / 5.0).abs() < 1e-9);
    }
}
