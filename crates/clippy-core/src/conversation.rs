//! The ordered, observable message list and its latest-reply invariant.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::{
    events::ConversationEvent,
    message::{Message, MessageId},
};

const EVENT_CAPACITY: usize = 256;

/// Ordered conversation shared between the dispatcher and the UI.
///
/// Cloning is cheap and every clone sees the same messages. The lock is only
/// held for the duration of a single mutation, never across an await.
#[derive(Clone)]
pub struct Conversation {
    messages: Arc<Mutex<Vec<Message>>>,
    event_tx: broadcast::Sender<ConversationEvent>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            event_tx,
        }
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.event_tx.subscribe()
    }

    /// Append a message at the end.
    ///
    /// Every earlier assistant reply loses its latest flag first, so at most the
    /// newest assistant message can carry it.
    pub fn append(&self, message: Message) -> MessageId {
        let id = message.id();
        self.push_locked(&mut self.messages.lock(), message);
        id
    }

    /// Append like [`append`](Self::append) and return the messages as they
    /// stand right after it, without letting another append in between.
    pub fn append_snapshot(&self, message: Message) -> Vec<Message> {
        let mut messages = self.messages.lock();
        self.push_locked(&mut messages, message);
        messages.clone()
    }

    fn push_locked(&self, messages: &mut Vec<Message>, message: Message) {
        for existing in messages.iter_mut() {
            if existing.clear_latest() {
                let _ = self.event_tx.send(ConversationEvent::Updated {
                    message: existing.clone(),
                });
            }
        }

        messages.push(message.clone());
        let _ = self.event_tx.send(ConversationEvent::Appended { message });
    }

    /// Overwrite the text of an assistant reply, optionally clearing its latest flag.
    ///
    /// The flag is never raised here. Returns the updated message, or `None` if
    /// `id` is unknown or not an assistant reply.
    pub fn update_reply(
        &self,
        id: MessageId,
        text: impl Into<String>,
        clear_latest: bool,
    ) -> Option<Message> {
        let mut messages = self.messages.lock();
        let Some(message) = messages.iter_mut().find(|m| m.id() == id) else {
            tracing::warn!(%id, "Reply update for unknown message ignored");
            return None;
        };

        if !message.set_reply_text(text.into()) {
            tracing::warn!(%id, "Reply update for non-assistant message ignored");
            return None;
        }
        if clear_latest {
            message.clear_latest();
        }

        let updated = message.clone();
        let _ = self.event_tx.send(ConversationEvent::Updated {
            message: updated.clone(),
        });
        Some(updated)
    }

    /// Remove every message
    pub fn clear(&self) {
        let mut messages = self.messages.lock();
        messages.clear();
        let _ = self.event_tx.send(ConversationEvent::Cleared);
    }

    /// Copy of all messages in order
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    /// Look up a message by id
    pub fn get(&self, id: MessageId) -> Option<Message> {
        self.messages.lock().iter().find(|m| m.id() == id).cloned()
    }

    /// The assistant reply currently marked latest, if any
    pub fn latest_editable(&self) -> Option<Message> {
        self.messages.lock().iter().find(|m| m.is_latest()).cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}
