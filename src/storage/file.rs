use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{HighScoreStore, StorageError};

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    high_score: u32,
}

/// Keeps the high score as a small JSON document on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<u32, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error(e)),
        };

        let record: Record =
            serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(record.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let record = Record { high_score: score };
        let json = serde_json::to_string(&record).map_err(|source| StorageError::Malformed {
            path: self.path.display().to_string(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}
