use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] checknote_core::error::CoreError),

    #[error("persistence failed: {0}")]
    Storage(#[from] checknote_storage::error::StorageError),
}
