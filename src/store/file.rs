use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use super::HighScoreStore;

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Stores the high score as `{"high_score": N}` in a JSON file
///
/// A missing, unreadable or malformed file reads as 0.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonFileStore {
    fn get(&self) -> u32 {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = ?self.path, %err, "failed to read high score");
                }
                return 0;
            }
        };

        match serde_json::from_str::<HighScoreRecord>(&json) {
            Ok(record) => record.high_score,
            Err(err) => {
                warn!(path = ?self.path, %err, "ignoring malformed high score file");
                0
            }
        }
    }

    fn set(&mut self, score: u32) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json = serde_json::to_string(&HighScoreRecord { high_score: score })
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        info!(score, path = ?self.path, "high score saved");
        Ok(())
    }
}
