//! Settings/key collaborators and the gate that blocks dispatch without them

use std::sync::Arc;

use crate::{conversation::Conversation, error::KeyError, message::Message};

/// Shown when the API key or endpoint is missing
pub const MISSING_CREDENTIALS_TEXT: &str = "Hello there! To use this app, you need a valid API key and endpoint. Please provide them in the app settings.";

/// Persisted application settings
pub trait SettingsService: Send + Sync {
    /// Whether a key has been saved
    fn has_key(&self) -> bool;

    /// Chat-completions URL
    fn api_endpoint(&self) -> Option<String>;

    /// Token budget sent as `max_tokens`
    fn tokens(&self) -> u32;
}

/// Secret storage for the API key
pub trait KeyService: Send + Sync {
    fn get_key(&self) -> Result<Option<String>, KeyError>;
}

/// Outbound auth state produced by a successful gate check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    pub endpoint: String,
    pub api_key: String,
}

/// Checks that a key and endpoint are configured before any network activity
#[derive(Clone)]
pub struct CredentialGate {
    settings: Arc<dyn SettingsService>,
    keys: Arc<dyn KeyService>,
}

impl CredentialGate {
    pub fn new(settings: Arc<dyn SettingsService>, keys: Arc<dyn KeyService>) -> Self {
        Self { settings, keys }
    }

    /// Resolve credentials, or append the "please configure" announcement.
    pub fn authorize(&self, conversation: &Conversation) -> Option<Authorization> {
        match self.resolve() {
            Some(auth) => Some(auth),
            None => {
                conversation.append(Message::announcement(MISSING_CREDENTIALS_TEXT));
                None
            }
        }
    }

    /// Same check as [`authorize`](Self::authorize), reporting only readiness
    pub fn check_ready(&self, conversation: &Conversation) -> bool {
        self.authorize(conversation).is_some()
    }

    fn resolve(&self) -> Option<Authorization> {
        let api_key = match self.keys.get_key() {
            Ok(key) => non_blank(key),
            Err(e) => {
                tracing::warn!("API key lookup failed: {}", e);
                None
            }
        };
        let endpoint = non_blank(self.settings.api_endpoint());

        match (api_key, endpoint) {
            (Some(api_key), Some(endpoint)) => Some(Authorization { endpoint, api_key }),
            (key, endpoint) => {
                tracing::debug!(
                    has_key = key.is_some(),
                    has_endpoint = endpoint.is_some(),
                    "Credentials incomplete"
                );
                None
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
