use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::tally::Score;
use crate::error::ScoreError;

/// Fixed storage key for the score record.
pub const SCORE_KEY: &str = "tictactoe-score";

/// Configuration for the score store.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScoreStoreConfig {
    pub data_dir: PathBuf,
}

impl Default for ScoreStoreConfig {
    fn default() -> Self {
        ScoreStoreConfig {
            data_dir: PathBuf::from("."),
        }
    }
}

/// Reads and writes the score record as `<data_dir>/tictactoe-score.json`.
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(config: &ScoreStoreConfig) -> Self {
        ScoreStore {
            path: config.data_dir.join(format!("{SCORE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored record. A missing file is `Ok(None)`.
    pub fn try_load(&self) -> Result<Option<Score>, ScoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ScoreError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        let score = serde_json::from_str(&json).map_err(|e| ScoreError::Malformed {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(Some(score))
    }

    /// Read the stored record, falling back to all zeros when it is missing
    /// or unreadable.
    pub fn load(&self) -> Score {
        match self.try_load() {
            Ok(Some(score)) => {
                debug!(path = %self.path.display(), %score, "score loaded");
                score
            }
            Ok(None) => Score::default(),
            Err(e) => {
                warn!(error = %e, "discarding stored score");
                Score::default()
            }
        }
    }

    /// Write the record via a temp file and rename.
    pub fn save(&self, score: &Score) -> Result<(), ScoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string(score)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), %score, "score saved");
        Ok(())
    }
}
