use thiserror::Error;

use checknote_export::render::Note;

#[derive(Debug, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Receives the finished note. Both representations are written as one
/// multi-representation payload.
pub trait NoteClipboard {
    fn write(&mut self, note: &Note) -> Result<(), ClipboardError>;
}

/// UI collaborator that scrolls a question row into view.
pub trait Viewport {
    fn bring_into_view(&mut self, index: usize);
}

/// For front ends that always show every row.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticViewport;

impl Viewport for StaticViewport {
    fn bring_into_view(&mut self, _index: usize) {}
}

/// Transient notification after a clipboard write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Copied,
    CopyFailed(String),
}

impl Toast {
    pub fn message(&self) -> String {
        match self {
            Toast::Copied => "Copied!".to_string(),
            Toast::CopyFailed(reason) => format!("Copy failed: {reason}"),
        }
    }
}
