use serde::{Deserialize, Serialize};

/// Keys the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Enter,
    Escape,
    Backspace,
}

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Keys are shortcuts (letters jump, digits select).
    #[default]
    Row,
    /// Keys edit the active question's free text.
    FreeText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Push(char),
    Backspace,
}

/// What the session has to do after a key was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Ignored,
    /// Focus was set to this question. It may be the one already active.
    Moved(usize),
    Toggle { question_id: usize, choice_id: usize },
    FreeTextFocused,
    FreeTextBlurred,
    EditFreeText { question_id: usize, edit: TextEdit },
    /// Advance was requested on the last question.
    Finalize,
}

/// Outcome of [`NavigationController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(usize),
    PastEnd,
}

/// Tracks the focused question and turns keys into actions.
#[derive(Debug, Clone)]
pub struct NavigationController {
    active_index: usize,
    len: usize,
    focus: Focus,
}

impl NavigationController {
    /// `len` is the number of questions; `active_index` is clamped to it.
    pub fn new(len: usize, active_index: usize) -> Self {
        Self {
            active_index: active_index.min(len.saturating_sub(1)),
            len,
            focus: Focus::Row,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_last(&self) -> bool {
        self.active_index + 1 >= self.len
    }

    pub fn advance(&mut self) -> Advance {
        if self.is_last() {
            Advance::PastEnd
        } else {
            self.active_index += 1;
            Advance::Moved(self.active_index)
        }
    }

    /// Move up one question. `None` at the top.
    pub fn retreat(&mut self) -> Option<usize> {
        if self.active_index == 0 {
            return None;
        }
        self.active_index -= 1;
        Some(self.active_index)
    }

    /// Focus a question directly, as a row click does. Returns `false` if
    /// `index` is out of range.
    pub fn focus_row(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.active_index = index;
        self.focus = Focus::Row;
        true
    }

    pub fn reset(&mut self) {
        self.active_index = 0;
        self.focus = Focus::Row;
    }

    /// Interpret a key. `choice_count` is the number of choices of the
    /// active question.
    pub fn handle_key(&mut self, key: Key, choice_count: usize) -> NavAction {
        match self.focus {
            Focus::Row => self.handle_row_key(key, choice_count),
            Focus::FreeText => self.handle_text_key(key),
        }
    }

    fn handle_row_key(&mut self, key: Key, choice_count: usize) -> NavAction {
        match key {
            Key::Char(c) if c.is_ascii_alphabetic() => {
                let index = usize::from(c.to_ascii_lowercase() as u8 - b'a');
                if self.focus_row(index) {
                    NavAction::Moved(index)
                } else {
                    NavAction::Ignored
                }
            }
            Key::Char('0') => {
                self.focus = Focus::FreeText;
                NavAction::FreeTextFocused
            }
            Key::Char(c @ '1'..='9') => {
                let choice_id = usize::from(c as u8 - b'1');
                if choice_id < choice_count {
                    NavAction::Toggle {
                        question_id: self.active_index,
                        choice_id,
                    }
                } else {
                    NavAction::Ignored
                }
            }
            Key::Down | Key::Enter => self.advance_action(),
            Key::Up => self.retreat().map_or(NavAction::Ignored, NavAction::Moved),
            Key::Char(_) | Key::Escape | Key::Backspace => NavAction::Ignored,
        }
    }

    fn handle_text_key(&mut self, key: Key) -> NavAction {
        match key {
            Key::Enter => {
                self.focus = Focus::Row;
                self.advance_action()
            }
            Key::Escape => {
                self.focus = Focus::Row;
                NavAction::FreeTextBlurred
            }
            Key::Char(c) => NavAction::EditFreeText {
                question_id: self.active_index,
                edit: TextEdit::Push(c),
            },
            Key::Backspace => NavAction::EditFreeText {
                question_id: self.active_index,
                edit: TextEdit::Backspace,
            },
            Key::Up | Key::Down => NavAction::Ignored,
        }
    }

    fn advance_action(&mut self) -> NavAction {
        match self.advance() {
            Advance::Moved(index) => NavAction::Moved(index),
            Advance::PastEnd => NavAction::Finalize,
        }
    }
}
