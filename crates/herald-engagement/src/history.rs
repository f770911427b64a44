//! Time-bounded action history.
//!
//! Records older than the retention horizon are dropped on every write.
//! Reads filter by timestamp, so a stale record never counts even before the
//! next write removes it.

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};
use herald_core::ActionRecord;

/// Retention horizon for action records.
pub const RETENTION: TimeDelta = TimeDelta::hours(24);

/// Action records of one kind, oldest first.
#[derive(Clone, Debug)]
pub struct ActionHistory {
    retention: TimeDelta,
    entries: VecDeque<ActionRecord>,
}

impl Default for ActionHistory {
    fn default() -> Self {
        Self::new(RETENTION)
    }
}

impl ActionHistory {
    /// Empty history keeping records for `retention`.
    #[must_use]
    pub fn new(retention: TimeDelta) -> Self {
        Self {
            retention,
            entries: VecDeque::new(),
        }
    }

    /// Append a record and drop everything older than the horizon.
    ///
    /// Records are expected in timestamp order; an out-of-order record is
    /// inserted at its sorted position.
    pub fn record(&mut self, entry: ActionRecord) {
        let now = entry.timestamp;
        let pos = self
            .entries
            .iter()
            .rposition(|e| e.timestamp <= entry.timestamp)
            .map_or(0, |i| i + 1);
        self.entries.insert(pos, entry);
        self.prune(now);
    }

    /// Records with a timestamp strictly within `window` before `now`.
    pub fn count_since(&self, window: TimeDelta, now: DateTime<Utc>) -> usize {
        let cutoff = now - window;
        self.entries.iter().filter(|e| e.timestamp > cutoff).count()
    }

    /// Most recent record, if it is still within retention at `now`.
    pub fn latest(&self, now: DateTime<Utc>) -> Option<&ActionRecord> {
        self.entries
            .back()
            .filter(|e| e.timestamp > now - self.retention)
    }

    /// Number of stored records (including any not yet pruned).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ActionRecord> {
        self.entries.iter()
    }

    fn prune(&mut self, now: DateTime<Utc>) {
        let cutoff = now - self.retention;
        while self.entries.front().is_some_and(|e| e.timestamp <= cutoff) {
            let _ = self.entries.pop_front();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
