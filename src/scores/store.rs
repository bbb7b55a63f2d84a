//! Score storage backends and the new-best check.
//!
//! The engine never touches storage. When a game ends the caller takes
//! `GameEngine::final_score` and hands it to `record_if_best`.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::record::{sort_best_first, ScoreRecord};
use crate::error::StoreError;

/// Somewhere score records live.
pub trait ScoreStore {
    /// All records, best first.
    fn records(&self) -> Result<Vec<ScoreRecord>, StoreError>;

    /// Add a record.
    fn append(&mut self, record: ScoreRecord) -> Result<(), StoreError>;

    /// Highest recorded length, if any.
    fn best(&self) -> Result<Option<usize>, StoreError> {
        Ok(self.records()?.iter().map(|r| r.length).max())
    }
}

/// Result of offering a final score to a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The score beat the previous best and was appended.
    NewBest { previous: Option<usize> },
    /// The score did not beat the best; nothing was written.
    NotBest { best: usize },
}

impl RecordOutcome {
    #[must_use]
    pub const fn is_new_best(&self) -> bool {
        matches!(self, RecordOutcome::NewBest { .. })
    }
}

/// Append `{score, now}` if it beats the stored best.
///
/// An empty store counts as a best of 0, so a score of 0 is never recorded.
pub fn record_if_best<S>(
    store: &mut S,
    score: usize,
    now: DateTime<Utc>,
) -> Result<RecordOutcome, StoreError>
where
    S: ScoreStore + ?Sized,
{
    let previous = store.best()?;
    let best = previous.unwrap_or(0);
    if score <= best {
        return Ok(RecordOutcome::NotBest { best });
    }

    store.append(ScoreRecord::new(score, now))?;
    tracing::info!(score, previous = ?previous, "new best score recorded");
    Ok(RecordOutcome::NewBest { previous })
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    records: Vec<ScoreRecord>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn records(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let mut records = self.records.clone();
        sort_best_first(&mut records);
        Ok(records)
    }

    fn append(&mut self, record: ScoreRecord) -> Result<(), StoreError> {
        self.records.push(record);
        Ok(())
    }
}

/// File-backed store: one JSON record per line.
///
/// Appends never rewrite earlier lines.
#[derive(Clone, Debug)]
pub struct JsonlScoreStore {
    path: PathBuf,
}

impl JsonlScoreStore {
    /// Open (or create) a store at `path`, creating parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonlScoreStore {
    fn records(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .map_err(|source| StoreError::Malformed { line: i + 1, source })?;
            records.push(record);
        }
        sort_best_first(&mut records);
        Ok(records)
    }

    fn append(&mut self, record: ScoreRecord) -> Result<(), StoreError> {
        let line = serde_json::to_string(&record)?;
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
