//! Per-agent activity counters.

use std::collections::BTreeMap;

use herald_core::ActionKind;
use serde::Serialize;

use crate::agent::CycleOutcome;

/// Counters accumulated from cycle results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Cycles run.
    pub cycles: u64,
    /// Successful posts.
    pub total_posts: u64,
    /// Successful replies.
    pub total_replies: u64,
    /// Posts whose generation or submission failed.
    pub failed_posts: u64,
    /// Replies whose generation or submission failed.
    pub failed_replies: u64,
    /// Cycles that ended in an error.
    pub cycle_errors: u64,
    /// Successful posts per post type.
    pub post_type_counts: BTreeMap<String, u64>,
}

/// Summary returned by [`PerformanceMetrics::analyze_performance`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    /// Successful posts.
    pub total_posts: u64,
    /// Successful replies.
    pub total_replies: u64,
    /// Share of attempted actions that succeeded, if any were attempted.
    pub success_rate: Option<f64>,
    /// Most used post type; ties go to the alphabetically first.
    pub top_post_type: Option<String>,
}

impl PerformanceMetrics {
    /// Fold one cycle result into the counters.
    pub fn record<E>(&mut self, result: &Result<CycleOutcome, E>) {
        self.cycles += 1;
        match result {
            Ok(CycleOutcome::Posted { post_type, .. }) => {
                self.total_posts += 1;
                *self.post_type_counts.entry(post_type.clone()).or_insert(0) += 1;
            }
            Ok(CycleOutcome::Replied { .. }) => self.total_replies += 1,
            Ok(CycleOutcome::Failed { kind, .. }) => match kind {
                ActionKind::Post => self.failed_posts += 1,
                ActionKind::Reply => self.failed_replies += 1,
            },
            Ok(CycleOutcome::Idle(_)) => {}
            Err(_) => self.cycle_errors += 1,
        }
    }

    /// Summarize the counters.
    #[allow(clippy::cast_precision_loss)]
    pub fn analyze_performance(&self) -> PerformanceSummary {
        let succeeded = self.total_posts + self.total_replies;
        let attempted = succeeded + self.failed_posts + self.failed_replies;
        let success_rate = (attempted > 0).then(|| succeeded as f64 / attempted as f64);
        let top_post_type = self
            .post_type_counts
            .iter()
            .fold(None::<(&String, u64)>, |best, (name, &count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((name, count)),
            })
            .map(|(name, _)| name.clone());
        PerformanceSummary {
            total_posts: self.total_posts,
            total_replies: self.total_replies,
            success_rate,
            top_post_type,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
