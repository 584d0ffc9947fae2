//! Terminal front end: key mapping, drawing, and the input reader thread.

use std::io::{self, Stdout, Write};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, Stylize};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{cursor, execute, queue};

use checknote_core::models::answer::Answer;
use checknote_core::models::question::Question;
use checknote_session::input::{InputEvent, InputPublisher};
use checknote_session::navigation::{Focus, Key};
use checknote_session::ports::Viewport;
use checknote_session::session::Session;

/// Lines above the question rows: title, toast, blank separator.
const HEADER_ROWS: u16 = 3;

const HELP: &str = "a-z jump | 1-9 select | 0 note | Up/Down/Enter move | ^Y copy | ^R reset | ^Q quit";

/// Map a terminal key event to a session input event.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'q') => Some(InputEvent::Quit),
            KeyCode::Char('y') => Some(InputEvent::CopyNote),
            KeyCode::Char('r') => Some(InputEvent::Reset),
            _ => None,
        };
    }

    let key = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        _ => return None,
    };
    Some(InputEvent::Key(key))
}

/// Read terminal events on a plain thread and publish them until the
/// subscription is revoked.
pub fn spawn_input_reader(publisher: InputPublisher) -> JoinHandle<io::Result<()>> {
    std::thread::spawn(move || {
        while !publisher.is_revoked() {
            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if let Some(input) = map_key(key)
                && !publisher.publish_blocking(input)
            {
                break;
            }
        }
        tracing::debug!("input reader stopped");
        Ok(())
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Scroll {
    offset: usize,
    height: usize,
}

/// Keeps the active row on screen. Shared between the session (which
/// calls [`Viewport::bring_into_view`]) and the drawing code.
#[derive(Debug, Clone, Default)]
pub struct ScrollViewport {
    state: Arc<Mutex<Scroll>>,
}

impl ScrollViewport {
    pub fn offset(&self) -> usize {
        self.state.lock().map(|s| s.offset).unwrap_or(0)
    }

    pub fn set_height(&self, height: usize) {
        if let Ok(mut state) = self.state.lock() {
            state.height = height;
        }
    }
}

impl Viewport for ScrollViewport {
    fn bring_into_view(&mut self, index: usize) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let height = state.height.max(1);
        if index < state.offset || index >= state.offset + height {
            // Center the row, like a smooth scroll would.
            state.offset = index.saturating_sub(height / 2);
        }
    }
}

/// Raw mode plus alternate screen for as long as it lives.
pub struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { out })
    }

    pub fn draw(&mut self, session: &Session, viewport: &ScrollViewport) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let width = usize::from(width);
        let rows = usize::from(height.saturating_sub(HEADER_ROWS));
        viewport.set_height(rows);

        queue!(self.out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        queue!(self.out, Print(truncate(&format!("Checknote  {HELP}"), width).bold()))?;

        if let Some(toast) = session.toast() {
            queue!(self.out, cursor::MoveTo(0, 1), Print(truncate(&toast.message(), width).reverse()))?;
        }

        let questions = session.catalog().questions();
        let first = viewport.offset().min(questions.len());
        for (row, question) in questions.iter().enumerate().skip(first).take(rows) {
            let y = HEADER_ROWS.saturating_add(u16::try_from(row - first).unwrap_or(u16::MAX));
            queue!(self.out, cursor::MoveTo(0, y))?;
            let active = row == session.active_index();
            let editing = active && session.focus() == Focus::FreeText;
            let segments = row_segments(question, session.answers().get(question.id), active, editing);
            self.print_segments(&segments, width)?;
        }

        self.out.flush()
    }

    fn print_segments(&mut self, segments: &[Segment], width: usize) -> io::Result<()> {
        let mut remaining = width;
        for segment in segments {
            if remaining == 0 {
                break;
            }
            let text = truncate(&segment.text, remaining);
            remaining -= text.chars().count();
            match segment.style {
                SegmentStyle::Normal => queue!(self.out, Print(text))?,
                SegmentStyle::Selected => queue!(self.out, Print(text.reverse()))?,
                SegmentStyle::Active => queue!(self.out, Print(text.bold()))?,
            }
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentStyle {
    Normal,
    Selected,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    text: String,
    style: SegmentStyle,
}

impl Segment {
    fn new(text: impl Into<String>, style: SegmentStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

fn row_segments(question: &Question, answer: Option<&Answer>, active: bool, editing: bool) -> Vec<Segment> {
    let marker = if active { '>' } else { ' ' };
    let letter = question
        .shortcut()
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or(' ');
    let label_style = if active {
        SegmentStyle::Active
    } else {
        SegmentStyle::Normal
    };

    let mut segments = vec![Segment::new(
        format!("{marker}{letter} {}: ", question.label),
        label_style,
    )];

    for choice in &question.choices {
        let number = (choice.id + 1).to_string();
        // "1" under "Sleep (hours)" already reads as its own shortcut.
        let text = if choice.text.starts_with(&number) {
            choice.text.clone()
        } else {
            format!("{number} {}", choice.text)
        };
        let selected = answer.is_some_and(|a| a.is_selected(choice.id));
        let style = if selected {
            SegmentStyle::Selected
        } else {
            SegmentStyle::Normal
        };
        segments.push(Segment::new(format!("[{text}]"), style));
        segments.push(Segment::new(" ", SegmentStyle::Normal));
    }

    let free_text = answer.map(|a| a.free_text.as_str()).unwrap_or_default();
    let cursor = if editing { "_" } else { "" };
    segments.push(Segment::new(
        format!("0:{free_text}{cursor}"),
        if editing {
            SegmentStyle::Active
        } else {
            SegmentStyle::Normal
        },
    ));
    segments
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
