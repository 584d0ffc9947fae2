use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use checknote_core::models::answer::AnswerSet;

use crate::error::StorageError;
use crate::state::{self, ACTIVE_INDEX_KEY, ANSWERS_KEY, LoadedSession, SessionStore};

/// In-memory key-value store. Clones share the same entries, so a caller
/// can hand one clone to a session and inspect another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of an entry, as a backend would hold it.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    /// Set a raw entry directly, bypassing encoding.
    pub fn set(&self, key: &str, value: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.into());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().map(|e| e.is_empty()).unwrap_or(true)
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<LoadedSession, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(state::decode(
            entries.get(ANSWERS_KEY).map(String::as_str),
            entries.get(ACTIVE_INDEX_KEY).map(String::as_str),
        ))
    }

    fn save(&mut self, answers: &AnswerSet, active_index: usize) -> Result<(), StorageError> {
        let (answers, active_index) = state::encode(answers, active_index)?;
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(ANSWERS_KEY.to_string(), answers);
        entries.insert(ACTIVE_INDEX_KEY.to_string(), active_index);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(ANSWERS_KEY);
        entries.remove(ACTIVE_INDEX_KEY);
        Ok(())
    }
}
