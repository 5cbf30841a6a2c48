//! Age-based retention rules for the collector

use common::file_utils::matches_pattern;
use std::time::{Duration, SystemTime};

const SECONDS_PER_HOUR: u64 = 60 * 60;

/// Which stored files a collection pass may delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Files whose age exceeds this are deleted
    pub max_age: Duration,
    /// Wildcard patterns for names that are never deleted
    pub ignore: Vec<String>,
}

impl RetentionPolicy {
    /// Policy for a maximum age in hours. A negative age makes every file
    /// with a past modification time stale, the same as zero.
    pub fn from_hours(hours: i64) -> Self {
        let hours = u64::try_from(hours).unwrap_or(0);
        Self {
            max_age: Duration::from_secs(hours.saturating_mul(SECONDS_PER_HOUR)),
            ignore: Vec::new(),
        }
    }

    pub fn with_ignore(mut self, patterns: Vec<String>) -> Self {
        self.ignore = patterns;
        self
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore
            .iter()
            .any(|pattern| matches_pattern(pattern, name))
    }

    /// Whether a file last modified at `modified` is stale at `now`.
    /// Modification times in the future never expire.
    pub fn is_expired(&self, modified: SystemTime, now: SystemTime) -> bool {
        match now.duration_since(modified) {
            Ok(age) => age > self.max_age,
            Err(_) => false,
        }
    }
}

/// Counters for one collection pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Directory entries seen
    pub scanned: usize,
    /// Stale files deleted
    pub removed: usize,
    /// Files still within the maximum age
    pub kept: usize,
    /// Directories, non-regular entries and ignored names
    pub skipped: usize,
    /// Entries whose stat or delete failed
    pub failed: usize,
}
