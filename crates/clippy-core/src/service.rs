//! Chat dispatch: gate, enqueue, placeholder, transmit, reconcile.

use std::sync::Arc;

use clippy_ai::ChatResponse;
use tokio::{sync::broadcast, task::JoinHandle};

use crate::{
    conversation::Conversation,
    credentials::{CredentialGate, KeyService, SettingsService},
    events::ConversationEvent,
    message::Message,
    transcript,
    transport::Transport,
};

/// Greeting seeded into a fresh conversation when credentials are available
pub const GREETING_TEXT: &str =
    "Hi! I'm Clippy, your Windows assistant. Would you like to get some assistance?";

/// Reply text when the endpoint answered without any choice
pub const NO_RESPONSE_TEXT: &str = "No response received from the API.";

/// Terminal state of one `send`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Gate failed; an announcement was appended and nothing was sent
    MissingCredentials,
    /// Placeholder holds the first choice's text and stays latest
    Fulfilled,
    /// Response had no choices
    EmptyResult,
    /// Endpoint returned a non-success status
    ApiError,
    /// Network, timeout or decoding failure
    TransportError,
}

impl SendOutcome {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, SendOutcome::Fulfilled)
    }
}

/// Owns the conversation and runs each send against the remote model
pub struct ChatService {
    conversation: Conversation,
    settings: Arc<dyn SettingsService>,
    gate: CredentialGate,
    transport: Arc<dyn Transport>,
}

impl ChatService {
    /// Create the service and seed the conversation like [`reset`](Self::reset)
    pub fn new(
        settings: Arc<dyn SettingsService>,
        keys: Arc<dyn KeyService>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let service = Self {
            conversation: Conversation::new(),
            gate: CredentialGate::new(Arc::clone(&settings), keys),
            settings,
            transport,
        };
        service.seed();
        service
    }

    /// The shared conversation (cheap to clone for UI bindings)
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Subscribe to conversation changes
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.conversation.subscribe()
    }

    /// Copy of all messages in order
    pub fn messages(&self) -> Vec<Message> {
        self.conversation.snapshot()
    }

    /// Clear the conversation and re-seed the greeting when credentials are present
    pub fn reset(&self) {
        self.conversation.clear();
        self.seed();
    }

    fn seed(&self) {
        if self.gate.check_ready(&self.conversation) || self.settings.has_key() {
            self.conversation
                .append(Message::assistant(GREETING_TEXT, true));
        }
    }

    /// Send a user message and reconcile the reply into the conversation.
    ///
    /// Failures are reported as reply text, never as errors. The only await
    /// point is the transport call.
    pub async fn send(&self, text: impl Into<String>) -> SendOutcome {
        let Some(auth) = self.gate.authorize(&self.conversation) else {
            tracing::warn!("Send skipped: API key or endpoint not configured");
            return SendOutcome::MissingCredentials;
        };

        let user_message = Message::user(text);
        let history = self.conversation.append_snapshot(user_message.clone());
        let request = transcript::build_request(&history, &user_message, self.settings.tokens());

        let reply_id = self.conversation.append(Message::placeholder());
        tracing::debug!(%reply_id, turns = request.messages.len(), "Dispatching chat request");

        let result = self.transport.complete(&auth, &request).await;
        let (outcome, reply_text) = reconcile(result);

        if !outcome.is_fulfilled() {
            tracing::warn!(%reply_id, ?outcome, "Chat request did not produce a reply: {}", reply_text);
        }
        self.conversation
            .update_reply(reply_id, reply_text, !outcome.is_fulfilled());

        tracing::debug!(%reply_id, ?outcome, "Chat request finished");
        outcome
    }

    /// Run [`send`](Self::send) on a background task
    pub fn spawn_send(self: &Arc<Self>, text: impl Into<String>) -> JoinHandle<SendOutcome> {
        let service = Arc::clone(self);
        let text = text.into();
        tokio::spawn(async move { service.send(text).await })
    }
}

/// Map a transport result to its terminal state and the reply text to show.
fn reconcile(result: clippy_ai::Result<ChatResponse>) -> (SendOutcome, String) {
    match result {
        Ok(response) => match response.first_content() {
            Some(content) => (SendOutcome::Fulfilled, content.to_string()),
            None => (SendOutcome::EmptyResult, NO_RESPONSE_TEXT.to_string()),
        },
        Err(e @ clippy_ai::Error::Api { .. }) => (SendOutcome::ApiError, e.to_string()),
        Err(e) => (SendOutcome::TransportError, format!("An error occurred: {}", e)),
    }
}
