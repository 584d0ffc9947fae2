use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use checknote_core::models::answer::AnswerSet;

use crate::error::StorageError;
use crate::state::{self, ACTIVE_INDEX_KEY, ANSWERS_KEY, LoadedSession, SessionStore};

/// Session state on local disk: one file per entry inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn answers_path(&self) -> PathBuf {
        self.dir.join(format!("{ANSWERS_KEY}.json"))
    }

    pub fn active_index_path(&self) -> PathBuf {
        self.dir.join(ACTIVE_INDEX_KEY)
    }

    fn read_entry(path: &Path) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    /// Write to a temp file then rename for atomicity.
    fn write_entry(path: &Path, contents: &str) -> Result<(), StorageError> {
        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, contents.as_bytes()).map_err(|e| StorageError::io(&tmp_path, e))?;
        std::fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))?;
        Ok(())
    }

    fn remove_entry(path: &Path) -> Result<(), StorageError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<LoadedSession, StorageError> {
        let answers = Self::read_entry(&self.answers_path())?;
        let active_index = Self::read_entry(&self.active_index_path())?;
        let loaded = state::decode(answers.as_deref(), active_index.as_deref());
        tracing::debug!(
            dir = %self.dir.display(),
            has_answers = loaded.answers.is_some(),
            active_index = loaded.active_index,
            "session state loaded"
        );
        Ok(loaded)
    }

    fn save(&mut self, answers: &AnswerSet, active_index: usize) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        let (answers, active_index) = state::encode(answers, active_index)?;
        Self::write_entry(&self.answers_path(), &answers)?;
        Self::write_entry(&self.active_index_path(), &active_index)?;
        tracing::trace!(dir = %self.dir.display(), "session state saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        Self::remove_entry(&self.answers_path())?;
        Self::remove_entry(&self.active_index_path())?;
        tracing::info!(dir = %self.dir.display(), "session state cleared");
        Ok(())
    }
}
