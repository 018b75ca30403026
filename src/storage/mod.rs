//! High score persistence
//!
//! The engine only needs to read one integer at startup and write it back
//! whenever it grows. Stores implement [`HighScoreStore`]; the engine never
//! fails because a store does.

use std::path::PathBuf;

use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

const APP_DIR: &str = "retro-snake";
const HIGH_SCORE_FILE: &str = "high_score.json";
const LOG_FILE: &str = "retro-snake.log";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed high score in {path}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Somewhere to keep the best score between sessions
pub trait HighScoreStore {
    /// Read the saved high score; an absent value reads as 0
    fn load(&self) -> Result<u32, StorageError>;

    /// Replace the saved high score
    fn save(&mut self, score: u32) -> Result<(), StorageError>;
}

pub fn data_dir() -> Option<PathBuf> {
    let data = dirs::data_dir()?;
    Some(data.join(APP_DIR))
}

/// Default location of the high score file
pub fn default_high_score_path() -> Option<PathBuf> {
    Some(data_dir()?.join(HIGH_SCORE_FILE))
}

/// Default location of the log file
pub fn default_log_path() -> Option<PathBuf> {
    Some(data_dir()?.join(LOG_FILE))
}
