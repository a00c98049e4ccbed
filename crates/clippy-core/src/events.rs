//! Conversation change notifications

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Emitted by the conversation store after every mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// A message was added at the end
    Appended { message: Message },

    /// An existing message changed (reply text or latest flag)
    Updated { message: Message },

    /// All messages were removed
    Cleared,
}

impl ConversationEvent {
    /// The message this event carries, if any
    pub fn message(&self) -> Option<&Message> {
        match self {
            ConversationEvent::Appended { message } | ConversationEvent::Updated { message } => {
                Some(message)
            }
            ConversationEvent::Cleared => None,
        }
    }
}
