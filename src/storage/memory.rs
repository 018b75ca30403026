use std::cell::Cell;
use std::rc::Rc;

use super::{HighScoreStore, StorageError};

/// Keeps the high score for the lifetime of the process only.
///
/// Clones share the same value, so a caller can keep a handle and observe
/// what the engine saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<Cell<u32>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        let store = Self::default();
        store.value.set(score);
        store
    }

    pub fn value(&self) -> u32 {
        self.value.get()
    }

    /// Number of times `save` was called
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, StorageError> {
        Ok(self.value.get())
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        self.value.set(score);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
