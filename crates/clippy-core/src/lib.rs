//! clippy-core: conversation runtime for the Clippy assistant
//!
//! Holds the ordered message list, checks credentials, builds the request
//! transcript, and reconciles the remote reply back into the conversation.

pub mod conversation;
pub mod credentials;
pub mod error;
pub mod events;
pub mod message;
pub mod service;
pub mod transcript;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use conversation::Conversation;
pub use credentials::{Authorization, CredentialGate, KeyService, SettingsService};
pub use error::KeyError;
pub use events::ConversationEvent;
pub use message::{Message, MessageId};
pub use service::{ChatService, SendOutcome};
pub use transport::{HttpTransport, Transport};
