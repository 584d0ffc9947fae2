use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Deferred focus advance after a committing selection.
    Advance,
    /// Hides the clipboard notification.
    Toast,
}

/// Message sent when a timer elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub kind: TimerKind,
    pub generation: u64,
}

/// One-shot cancellable timer backed by a tokio task.
///
/// At most one firing is pending: scheduling again cancels the previous
/// one. Every cancel bumps the generation, so a message that was already
/// queued before the cancel is rejected by [`Timer::accept`].
#[derive(Debug)]
pub struct Timer {
    kind: TimerKind,
    tx: mpsc::UnboundedSender<TimerFired>,
    generation: u64,
    handle: Option<AbortHandle>,
}

impl Timer {
    pub fn new(kind: TimerKind, tx: mpsc::UnboundedSender<TimerFired>) -> Self {
        Self {
            kind,
            tx,
            generation: 0,
            handle: None,
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn is_pending(&self) -> bool {
        self.handle.is_some()
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, delay: Duration) {
        self.cancel();
        let fired = TimerFired {
            kind: self.kind,
            generation: self.generation,
        };
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session is shutting down.
            let _ = tx.send(fired);
        });
        self.handle = Some(task.abort_handle());
        tracing::trace!(kind = ?self.kind, generation = self.generation, ?delay, "timer scheduled");
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::trace!(kind = ?self.kind, generation = self.generation, "timer cancelled");
        }
        self.generation += 1;
    }

    /// Whether `fired` is the current pending firing of this timer. An
    /// accepted firing clears the pending state.
    pub fn accept(&mut self, fired: &TimerFired) -> bool {
        if fired.kind != self.kind || fired.generation != self.generation || self.handle.is_none() {
            return false;
        }
        self.handle = None;
        true
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
