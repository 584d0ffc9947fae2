use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use checknote_core::catalog::QuestionCatalog;
use checknote_core::models::answer::AnswerSet;
use checknote_export::render::{Note, NoteRenderer};
use checknote_storage::state::SessionStore;

use crate::error::SessionError;
use crate::input::{InputEvent, InputSubscription};
use crate::navigation::{Advance, Focus, Key, NavAction, NavigationController, TextEdit};
use crate::ports::{NoteClipboard, Toast, Viewport};
use crate::store::{AnswerStore, ToggleOutcome};
use crate::timer::{Timer, TimerFired, TimerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Delay between a committing selection and the focus advance, so the
    /// selection is drawn before focus moves.
    pub advance_delay: Duration,
    pub toast_duration: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            advance_delay: Duration::from_millis(100),
            toast_duration: Duration::from_secs(2),
        }
    }
}

/// External collaborators of a session.
pub struct SessionPorts {
    pub store: Box<dyn SessionStore>,
    pub clipboard: Box<dyn NoteClipboard>,
    pub viewport: Box<dyn Viewport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Wake {
    Input(Option<InputEvent>),
    Timer(TimerFired),
}

/// One data-entry session: answers, focus, timers and ports.
///
/// All mutations happen on the caller's task, one event at a time.
pub struct Session {
    answers: AnswerStore,
    nav: NavigationController,
    renderer: NoteRenderer,
    ports: SessionPorts,
    config: SessionConfig,
    advance: Timer,
    toast_timer: Timer,
    toast: Option<Toast>,
    timer_rx: mpsc::UnboundedReceiver<TimerFired>,
}

impl Session {
    /// Start a session from whatever the store holds. Missing or
    /// unreadable state falls back to the catalog defaults.
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        renderer: NoteRenderer,
        mut ports: SessionPorts,
        config: SessionConfig,
    ) -> Self {
        let loaded = match ports.store.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load session state, starting fresh");
                Default::default()
            }
        };

        let answers = match loaded.answers {
            Some(saved) => AnswerStore::with_answers(Arc::clone(&catalog), saved),
            None => AnswerStore::new(Arc::clone(&catalog)),
        };
        let nav = NavigationController::new(catalog.len(), loaded.active_index);
        ports.viewport.bring_into_view(nav.active_index());

        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        tracing::info!(
            questions = catalog.len(),
            active_index = nav.active_index(),
            "session started"
        );

        Self {
            answers,
            nav,
            renderer,
            ports,
            config,
            advance: Timer::new(TimerKind::Advance, timer_tx.clone()),
            toast_timer: Timer::new(TimerKind::Toast, timer_tx),
            toast: None,
            timer_rx,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        self.answers.catalog()
    }

    pub fn answers(&self) -> &AnswerSet {
        self.answers.answers()
    }

    pub fn active_index(&self) -> usize {
        self.nav.active_index()
    }

    pub fn focus(&self) -> Focus {
        self.nav.focus()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn is_advance_pending(&self) -> bool {
        self.advance.is_pending()
    }

    pub fn note(&self) -> Note {
        self.renderer.render_note(self.catalog(), self.answers())
    }

    /// Process input until `Quit` or until every publisher is gone.
    /// `on_change` runs before each wait so the front end can redraw.
    pub async fn run<F>(&mut self, mut input: InputSubscription, mut on_change: F) -> Result<(), SessionError>
    where
        F: FnMut(&Session),
    {
        loop {
            on_change(self);

            let wake = tokio::select! {
                event = input.recv() => Wake::Input(event),
                Some(fired) = self.timer_rx.recv() => Wake::Timer(fired),
            };

            match wake {
                Wake::Input(None) => break,
                Wake::Input(Some(event)) => match self.handle(event) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => tracing::warn!(error = %e, "input event rejected"),
                },
                Wake::Timer(fired) => self.on_timer(fired),
            }
        }

        input.revoke();
        self.advance.cancel();
        self.toast_timer.cancel();
        self.save_now()?;
        tracing::info!("session ended");
        Ok(())
    }

    pub fn handle(&mut self, event: InputEvent) -> Result<Flow, SessionError> {
        match event {
            InputEvent::Key(key) => self.handle_key(key)?,
            InputEvent::ClickRow(index) => {
                let previous = self.nav.active_index();
                if self.nav.focus_row(index) {
                    self.focus_changed(previous);
                }
            }
            InputEvent::ClickChoice {
                question_id,
                choice_id,
            } => self.toggle(question_id, choice_id)?,
            InputEvent::CopyNote => {
                self.advance.cancel();
                self.finalize();
            }
            InputEvent::Reset => self.reset(),
            InputEvent::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn handle_key(&mut self, key: Key) -> Result<(), SessionError> {
        let previous = self.nav.active_index();
        let choice_count = self
            .catalog()
            .get(previous)
            .map_or(0, |question| question.choices.len());

        match self.nav.handle_key(key, choice_count) {
            NavAction::Ignored | NavAction::FreeTextBlurred => {}
            // Typing targets the active row, so it must not move under the field.
            NavAction::FreeTextFocused => self.advance.cancel(),
            NavAction::Moved(_) => self.focus_changed(previous),
            NavAction::Toggle {
                question_id,
                choice_id,
            } => self.toggle(question_id, choice_id)?,
            NavAction::EditFreeText { question_id, edit } => {
                let mut text = self.answers().free_text(question_id).to_string();
                match edit {
                    TextEdit::Push(c) => text.push(c),
                    TextEdit::Backspace => {
                        text.pop();
                    }
                }
                self.answers.set_free_text(question_id, text)?;
                self.persist();
            }
            NavAction::Finalize => {
                self.advance.cancel();
                self.finalize();
            }
        }
        Ok(())
    }

    /// Apply a selection. A commit schedules the deferred advance,
    /// replacing any advance still pending.
    pub fn toggle(&mut self, question_id: usize, choice_id: usize) -> Result<(), SessionError> {
        let outcome = self.answers.toggle_choice(question_id, choice_id)?;
        self.persist();
        if outcome == ToggleOutcome::Committed {
            self.advance.schedule(self.config.advance_delay);
        }
        Ok(())
    }

    pub fn set_free_text(&mut self, question_id: usize, text: impl Into<String>) -> Result<(), SessionError> {
        self.answers.set_free_text(question_id, text)?;
        self.persist();
        Ok(())
    }

    pub fn on_timer(&mut self, fired: TimerFired) {
        match fired.kind {
            TimerKind::Advance => {
                if !self.advance.accept(&fired) {
                    tracing::trace!(generation = fired.generation, "stale advance ignored");
                    return;
                }
                let previous = self.nav.active_index();
                match self.nav.advance() {
                    Advance::Moved(_) => self.focus_changed(previous),
                    Advance::PastEnd => self.finalize(),
                }
            }
            TimerKind::Toast => {
                if self.toast_timer.accept(&fired) {
                    self.toast = None;
                }
            }
        }
    }

    /// Apply every timer message already delivered, without waiting.
    pub fn drain_timers(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(fired) = self.timer_rx.try_recv() {
            self.on_timer(fired);
            applied += 1;
        }
        applied
    }

    /// Render the note and hand it to the clipboard.
    pub fn finalize(&mut self) {
        let note = self.note();
        let toast = match self.ports.clipboard.write(&note) {
            Ok(()) => {
                tracing::info!(bytes = note.plain.len(), "note copied to clipboard");
                Toast::Copied
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to copy note to clipboard");
                Toast::CopyFailed(e.0)
            }
        };
        self.toast = Some(toast);
        self.toast_timer.schedule(self.config.toast_duration);
    }

    /// Restore defaults in memory and clear the persisted entries.
    pub fn reset(&mut self) {
        self.advance.cancel();
        self.toast_timer.cancel();
        self.toast = None;
        self.answers.reset();
        self.nav.reset();
        self.ports.viewport.bring_into_view(0);
        if let Err(e) = self.ports.store.clear() {
            tracing::warn!(error = %e, "failed to clear saved session state");
        }
        tracing::info!("session reset");
    }

    /// Save the current snapshot and report failure.
    pub fn save_now(&mut self) -> Result<(), SessionError> {
        self.ports
            .store
            .save(self.answers.answers(), self.nav.active_index())?;
        Ok(())
    }

    /// Every focus-setting event lands here: any pending advance is stale.
    fn focus_changed(&mut self, previous: usize) {
        self.advance.cancel();
        let current = self.nav.active_index();
        if current != previous {
            self.ports.viewport.bring_into_view(current);
            tracing::debug!(from = previous, to = current, "focus moved");
        }
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.save_now() {
            tracing::warn!(error = %e, "failed to save session state");
        }
    }
}
