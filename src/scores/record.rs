//! Persisted score entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One finished game worth remembering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Longest sequence reproduced.
    pub length: usize,
    /// When the game ended (RFC 3339 on disk).
    pub recorded_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Create a record.
    #[must_use]
    pub fn new(length: usize, recorded_at: DateTime<Utc>) -> Self {
        Self {
            length,
            recorded_at,
        }
    }

    /// Create a record stamped with the current time.
    #[must_use]
    pub fn now(length: usize) -> Self {
        Self::new(length, Utc::now())
    }
}

/// Sort records best first; equal lengths keep the earlier record first.
pub fn sort_best_first(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| {
        b.length
            .cmp(&a.length)
            .then_with(|| a.recorded_at.cmp(&b.recorded_at))
    });
}
