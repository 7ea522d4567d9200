//! Best-score persistence in ~/.skyward/.
//!
//! The session talks to a [`ScoreStore`]; the game uses [`JsonScoreStore`]
//! and tests swap in [`MemoryScoreStore`]. Loading never fails: a missing or
//! unreadable file counts as a best score of 0.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SCORE_FILE: &str = "highscore.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error("score store is read-only")]
    ReadOnly,
}

/// Where the best score lives between runs.
pub trait ScoreStore {
    /// Best score on record, or 0 when nothing usable is stored.
    fn load_best_score(&self) -> u32;

    /// Record a new best score. Callers treat failure as non-fatal.
    fn save_best_score(&mut self, score: u32) -> Result<(), StoreError>;
}

/// On-disk layout of the score file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct ScoreRecord {
    best_score: u32,
}

/// Get the ~/.skyward/ directory path, creating it if needed.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let home_dir = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
    let dir = home_dir.join(".skyward");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// JSON file holding a single best score.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    /// Store the score file inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(SCORE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_record(&self) -> Result<ScoreRecord, StoreError> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl ScoreStore for JsonScoreStore {
    fn load_best_score(&self) -> u32 {
        match self.read_record() {
            Ok(record) => record.best_score,
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no score file at {}", self.path.display());
                0
            }
            Err(e) => {
                log::warn!("ignoring score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save_best_score(&mut self, score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&ScoreRecord { best_score: score })?;
        fs::write(&self.path, json)?;
        log::debug!("saved best score {} to {}", score, self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and for running without a writable home.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub best_score: u32,
    /// Number of successful saves.
    pub saves: u32,
    /// When set, every save fails with [`StoreError::ReadOnly`].
    pub read_only: bool,
}

impl MemoryScoreStore {
    pub fn with_best(best_score: u32) -> Self {
        Self {
            best_score,
            ..Self::default()
        }
    }

    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_best_score(&self) -> u32 {
        self.best_score
    }

    fn save_best_score(&mut self, score: u32) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        self.best_score = score;
        self.saves += 1;
        Ok(())
    }
}
