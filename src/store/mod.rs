//! High score persistence
//!
//! The high score outlives game sessions. It is read once when a session is
//! created and written only when a game ends above it.

pub mod file;

pub use file::JsonFileStore;

use anyhow::Result;

pub trait HighScoreStore {
    /// Stored high score, 0 when nothing usable is stored
    fn get(&self) -> u32;

    /// Persist a new high score
    fn set(&mut self, score: u32) -> Result<()>;
}

/// Keeps the high score for the lifetime of the process only
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    high_score: u32,
    writes: u32,
}

impl MemoryStore {
    pub fn new(high_score: u32) -> Self {
        Self {
            high_score,
            writes: 0,
        }
    }

    /// Number of times [`HighScoreStore::set`] was called
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self) -> u32 {
        self.high_score
    }

    fn set(&mut self, score: u32) -> Result<()> {
        self.high_score = score;
        self.writes += 1;
        Ok(())
    }
}
