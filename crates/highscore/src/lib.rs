//! Persist the best score to disk as a single plain-text integer.
//!
//! Loading distinguishes a missing file from an unreadable or malformed one,
//! but the game only ever needs [`HighScoreStore::load_or_default`], which
//! treats every failure as "no high score yet".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// File name used when no path is configured, relative to the working directory.
pub const DEFAULT_FILE_NAME: &str = ".tetris_high_score";

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("no high score file at {0}")]
    Missing(PathBuf),
    #[error("unreadable high score file: {0}")]
    Unreadable(#[from] io::Error),
    #[error("malformed high score: {0:?}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score.
    pub fn load(&self) -> Result<u32, HighScoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(HighScoreError::Missing(self.path.clone()))
            }
            Err(e) => return Err(e.into()),
        };
        let trimmed = content.trim();
        trimmed
            .parse::<u32>()
            .map_err(|_| HighScoreError::Malformed(trimmed.to_string()))
    }

    /// Stored score, or 0 on any failure.
    pub fn load_or_default(&self) -> u32 {
        match self.load() {
            Ok(score) => score,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "high score unavailable, using 0");
                0
            }
        }
    }

    /// Write `max(score, prior)` and return the value written.
    ///
    /// Missing parent directories are created.
    pub fn save(&self, score: u32, prior: u32) -> Result<u32, HighScoreError> {
        let best = score.max(prior);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, best.to_string())?;
        debug!(path = %self.path.display(), best, "high score saved");
        Ok(best)
    }
}
