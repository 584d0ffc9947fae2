use checknote_export::render::Note;
use checknote_session::ports::{ClipboardError, NoteClipboard};

/// System clipboard via `arboard`.
///
/// The handle is opened on first use and kept: on X11 the clipboard
/// contents are served by this process for as long as the handle lives.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError("clipboard unavailable".to_string()))
    }
}

impl NoteClipboard for SystemClipboard {
    fn write(&mut self, note: &Note) -> Result<(), ClipboardError> {
        let clipboard = self.handle()?;
        clipboard
            .set_html(note.html.as_str(), Some(note.plain.as_str()))
            .map_err(|e| ClipboardError(e.to_string()))
    }
}
