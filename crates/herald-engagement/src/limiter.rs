//! Per-kind action throttles.
//!
//! [`PostCooldown`] compares against the single most recent post.
//! [`ReplyCap`] counts replies in a sliding 24-hour window.

use chrono::{DateTime, TimeDelta, Utc};
use herald_core::ActionRecord;
use herald_settings::PostingFrequency;

use crate::history::{ActionHistory, RETENTION};

/// Single-slot post cooldown.
#[derive(Clone, Debug)]
pub struct PostCooldown {
    cooldown: TimeDelta,
    history: ActionHistory,
}

impl PostCooldown {
    /// Cooldown of a fixed length.
    #[must_use]
    pub fn new(cooldown: TimeDelta) -> Self {
        Self {
            cooldown,
            history: ActionHistory::default(),
        }
    }

    /// Cooldown for a posting frequency class.
    #[must_use]
    pub fn for_frequency(frequency: PostingFrequency) -> Self {
        // Every class is well inside the retention horizon.
        Self::new(TimeDelta::from_std(frequency.cooldown()).unwrap_or(RETENTION))
    }

    /// True if nothing was posted yet or the last post is older than the cooldown.
    pub fn can_post_now(&self, now: DateTime<Utc>) -> bool {
        match self.history.latest(now) {
            None => true,
            Some(last) => now - last.timestamp > self.cooldown,
        }
    }

    /// Record a successful post.
    pub fn record(&mut self, entry: ActionRecord) {
        self.history.record(entry);
    }

    /// Most recent post, if still retained.
    pub fn last_post(&self, now: DateTime<Utc>) -> Option<&ActionRecord> {
        self.history.latest(now)
    }

    /// Configured cooldown.
    pub fn cooldown(&self) -> TimeDelta {
        self.cooldown
    }
}

/// Daily reply cap over a sliding 24-hour window.
#[derive(Clone, Debug)]
pub struct ReplyCap {
    cap: u32,
    history: ActionHistory,
}

impl ReplyCap {
    /// Cap of `cap` replies per 24 hours.
    #[must_use]
    pub fn new(cap: u32) -> Self {
        Self {
            cap,
            history: ActionHistory::default(),
        }
    }

    /// Replies within the last 24 hours.
    pub fn replies_in_window(&self, now: DateTime<Utc>) -> usize {
        self.history.count_since(RETENTION, now)
    }

    /// True while the windowed count is strictly below the cap.
    pub fn can_reply_now(&self, now: DateTime<Utc>) -> bool {
        self.replies_in_window(now) < self.cap as usize
    }

    /// Record a successful reply.
    pub fn record(&mut self, entry: ActionRecord) {
        self.history.record(entry);
    }

    /// Configured cap.
    pub fn cap(&self) -> u32 {
        self.cap
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
