use checknote_core::models::answer::AnswerSet;

use crate::error::StorageError;

/// Key of the JSON-encoded answer set.
pub const ANSWERS_KEY: &str = "answers";

/// Key of the string-encoded active question index.
pub const ACTIVE_INDEX_KEY: &str = "active_index";

/// What a store found on load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSession {
    /// `None` when nothing was saved or the saved value was unreadable.
    pub answers: Option<AnswerSet>,
    /// 0 when nothing was saved or the saved value was unreadable.
    pub active_index: usize,
}

/// Persistence port for session state.
///
/// Implementations hold exactly two entries, [`ANSWERS_KEY`] and
/// [`ACTIVE_INDEX_KEY`].
pub trait SessionStore: Send {
    fn load(&self) -> Result<LoadedSession, StorageError>;

    fn save(&mut self, answers: &AnswerSet, active_index: usize) -> Result<(), StorageError>;

    /// Remove both entries.
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// Decode the raw entries of a store. Unreadable values are logged and
/// treated as absent.
pub fn decode(answers: Option<&str>, active_index: Option<&str>) -> LoadedSession {
    let answers = answers.and_then(|raw| match AnswerSet::from_json(raw) {
        Ok(answers) => Some(answers),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable saved answers");
            None
        }
    });

    let active_index = active_index
        .map(str::trim)
        .and_then(|raw| match raw.parse::<usize>() {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!(error = %e, value = raw, "discarding unreadable saved index");
                None
            }
        })
        .unwrap_or(0);

    LoadedSession {
        answers,
        active_index,
    }
}

/// Encode a snapshot into the raw `(answers, active_index)` entries.
pub fn encode(answers: &AnswerSet, active_index: usize) -> Result<(String, String), StorageError> {
    Ok((answers.to_json()?, active_index.to_string()))
}
