//! Profiling records and snapshots
//!
//! The registry keeps one [`TimingRecord`] per registered key. A
//! [`ProfileSnapshot`] is a read-only copy of those records in registration
//! order, which is all a reporting panel needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Mutable per-key profiling state owned by the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimingRecord {
    /// Number of cache populations. Each distinct argument list counts once
    /// until its cached result is invalidated; recomputing it after
    /// `invalidate`/`clear_cache` counts again.
    pub executed: u64,
    /// Duration of the most recent computation.
    pub last_duration: Option<Duration>,
    /// Sum of all measured computation durations.
    pub total_duration: Option<Duration>,
    /// When the most recent computation finished.
    pub last_computed_at: Option<Timestamp>,
}

impl TimingRecord {
    /// Record one cache population. `elapsed` is `None` when timings are off.
    pub fn record(&mut self, elapsed: Option<Duration>, at: Timestamp) {
        self.executed += 1;
        self.last_computed_at = Some(at);
        if let Some(elapsed) = elapsed {
            self.last_duration = Some(elapsed);
            self.total_duration = Some(self.total_duration.unwrap_or_default() + elapsed);
        }
    }
}

/// Profiling data for a single key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub key: String,
    /// Cache populations, see [`TimingRecord::executed`].
    pub executed: u64,
    pub last_duration: Option<Duration>,
    pub total_duration: Option<Duration>,
    pub last_computed_at: Option<Timestamp>,
}

impl ProfileEntry {
    pub(crate) fn from_record(key: &str, record: &TimingRecord) -> Self {
        Self {
            key: key.to_string(),
            executed: record.executed,
            last_duration: record.last_duration,
            total_duration: record.total_duration,
            last_computed_at: record.last_computed_at,
        }
    }
}

/// Profiling data for every registered key, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub entries: Vec<ProfileEntry>,
}

impl ProfileSnapshot {
    pub fn new(entries: Vec<ProfileEntry>) -> Self {
        Self { entries }
    }

    /// Look up the entry for a key.
    pub fn get(&self, key: &str) -> Option<&ProfileEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Total executions across all keys.
    pub fn total_executed(&self) -> u64 {
        self.entries.iter().map(|e| e.executed).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProfileEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProfileSnapshot {
    type Item = &'a ProfileEntry;
    type IntoIter = std::slice::Iter<'a, ProfileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
