//! Conversation entries: user turns, assistant replies and announcements

use std::fmt;

use clippy_ai::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a message within a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A conversation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Message {
    /// Authored by the human; never changes after it is sent
    User {
        id: MessageId,
        text: String,
        timestamp: i64,
    },
    /// Clippy's reply. `is_latest` marks the one reply the UI may edit or regenerate.
    Assistant {
        id: MessageId,
        text: String,
        is_latest: bool,
        timestamp: i64,
    },
    /// System notice shown in the UI only; never sent to the model
    Announcement {
        id: MessageId,
        text: String,
        timestamp: i64,
    },
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::User {
            id: MessageId::new(),
            text: text.into(),
            timestamp: now_millis(),
        }
    }

    /// Create an assistant reply
    pub fn assistant(text: impl Into<String>, is_latest: bool) -> Self {
        Self::Assistant {
            id: MessageId::new(),
            text: text.into(),
            is_latest,
            timestamp: now_millis(),
        }
    }

    /// Create the empty, latest-flagged reply shown while a request is pending
    pub fn placeholder() -> Self {
        Self::assistant(String::new(), true)
    }

    /// Create an announcement
    pub fn announcement(text: impl Into<String>) -> Self {
        Self::Announcement {
            id: MessageId::new(),
            text: text.into(),
            timestamp: now_millis(),
        }
    }

    pub fn id(&self) -> MessageId {
        match self {
            Self::User { id, .. } | Self::Assistant { id, .. } | Self::Announcement { id, .. } => {
                *id
            }
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::User { text, .. }
            | Self::Assistant { text, .. }
            | Self::Announcement { text, .. } => text,
        }
    }

    /// Transcript role, or `None` for UI-only entries
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::User { .. } => Some(Role::User),
            Self::Assistant { .. } => Some(Role::Assistant),
            Self::Announcement { .. } => None,
        }
    }

    /// Whether this is the latest editable reply. Always false for non-assistant kinds.
    pub fn is_latest(&self) -> bool {
        matches!(self, Self::Assistant { is_latest: true, .. })
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant { .. })
    }

    /// Clear the latest flag. Returns true if it was set.
    pub(crate) fn clear_latest(&mut self) -> bool {
        match self {
            Self::Assistant { is_latest, .. } if *is_latest => {
                *is_latest = false;
                true
            }
            _ => false,
        }
    }

    /// Replace the text of an assistant reply. Other kinds are immutable.
    pub(crate) fn set_reply_text(&mut self, new_text: String) -> bool {
        match self {
            Self::Assistant { text, .. } => {
                *text = new_text;
                true
            }
            _ => false,
        }
    }
}
