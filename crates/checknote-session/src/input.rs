//! Input-event port.
//!
//! A session holds the [`InputSubscription`] for as long as it runs.
//! Dropping it revokes the subscription: publishers observe
//! [`InputPublisher::is_revoked`] and stop producing.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::navigation::Key;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Key(Key),
    /// A question row was clicked.
    ClickRow(usize),
    /// A choice button was clicked. Does not move focus by itself.
    ClickChoice { question_id: usize, choice_id: usize },
    CopyNote,
    Reset,
    Quit,
}

pub fn subscribe(capacity: usize) -> (InputPublisher, InputSubscription) {
    let (tx, rx) = mpsc::channel(capacity);
    (InputPublisher { tx }, InputSubscription { rx })
}

#[derive(Debug, Clone)]
pub struct InputPublisher {
    tx: mpsc::Sender<InputEvent>,
}

impl InputPublisher {
    /// Returns `false` once the subscription is gone.
    pub async fn publish(&self, event: InputEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }

    /// For producers on plain threads. Must not be called from async code.
    pub fn publish_blocking(&self, event: InputEvent) -> bool {
        self.tx.blocking_send(event).is_ok()
    }

    pub fn is_revoked(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
pub struct InputSubscription {
    rx: mpsc::Receiver<InputEvent>,
}

impl InputSubscription {
    /// `None` once every publisher has been dropped.
    pub async fn recv(&mut self) -> Option<InputEvent> {
        self.rx.recv().await
    }

    pub fn revoke(mut self) {
        self.rx.close();
    }
}
