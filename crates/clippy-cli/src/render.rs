//! Text rendering of conversation messages and change events

use std::collections::HashMap;

use clippy_core::{ConversationEvent, Message, MessageId};

/// Render one message as a terminal line
pub fn render_message(message: &Message) -> String {
    match message {
        Message::User { text, .. } => format!("you> {}", text),
        Message::Assistant { text, .. } if text.is_empty() => "clippy> ...".to_string(),
        Message::Assistant { text, .. } => format!("clippy> {}", text),
        Message::Announcement { text, .. } => format!("[notice] {}", text),
    }
}

/// Turns conversation events into lines, skipping ones with nothing new to show.
///
/// User turns are not echoed, empty placeholders are not shown, and flag-only
/// updates of an already printed reply are dropped.
#[derive(Default)]
pub struct EventRenderer {
    shown: HashMap<MessageId, String>,
}

impl EventRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, event: &ConversationEvent) -> Option<String> {
        let message = match event {
            ConversationEvent::Cleared => {
                self.shown.clear();
                return Some("[conversation reset]".to_string());
            }
            ConversationEvent::Appended { message } | ConversationEvent::Updated { message } => {
                message
            }
        };

        if matches!(message, Message::User { .. }) || message.text().is_empty() {
            return None;
        }
        if self.shown.get(&message.id()).map(String::as_str) == Some(message.text()) {
            return None;
        }

        self.shown.insert(message.id(), message.text().to_string());
        Some(render_message(message))
    }
}
