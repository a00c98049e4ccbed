//! Test doubles for the settings, key and transport collaborators

use std::{collections::VecDeque, time::Duration};

use async_trait::async_trait;
use clippy_ai::{ChatRequest, ChatResponse};
use parking_lot::Mutex;

use crate::{
    credentials::{Authorization, KeyService, SettingsService},
    error::KeyError,
    transport::Transport,
};

/// Settings with fixed values
#[derive(Debug, Clone)]
pub struct FixedSettings {
    pub has_key: bool,
    pub endpoint: Option<String>,
    pub tokens: u32,
}

impl FixedSettings {
    pub const ENDPOINT: &'static str = "https://api.example.test/v1/chat/completions";

    pub fn configured() -> Self {
        Self {
            has_key: true,
            endpoint: Some(Self::ENDPOINT.to_string()),
            tokens: 150,
        }
    }

    pub fn without_endpoint() -> Self {
        Self {
            endpoint: None,
            ..Self::configured()
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            has_key: false,
            endpoint: None,
            tokens: 150,
        }
    }
}

impl SettingsService for FixedSettings {
    fn has_key(&self) -> bool {
        self.has_key
    }

    fn api_endpoint(&self) -> Option<String> {
        self.endpoint.clone()
    }

    fn tokens(&self) -> u32 {
        self.tokens
    }
}

/// Key store that returns a fixed key, nothing, or an error
#[derive(Debug, Clone)]
pub enum FixedKey {
    Present(String),
    Absent,
    Failing,
}

impl FixedKey {
    pub fn present(key: &str) -> Self {
        Self::Present(key.to_string())
    }

    pub fn absent() -> Self {
        Self::Absent
    }

    pub fn failing() -> Self {
        Self::Failing
    }
}

impl KeyService for FixedKey {
    fn get_key(&self) -> Result<Option<String>, KeyError> {
        match self {
            FixedKey::Present(key) => Ok(Some(key.clone())),
            FixedKey::Absent => Ok(None),
            FixedKey::Failing => Err(KeyError::Unavailable("vault locked".into())),
        }
    }
}

/// Scripted result for one transport call
#[derive(Debug, Clone)]
pub enum Reply {
    /// Well-formed response body (JSON text)
    Body(&'static str),
    /// Non-success status with a reason phrase
    Status(u16, &'static str),
    /// Body that fails to decode
    Malformed,
}

/// Transport that replays queued replies and records every request
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<(Reply, Duration)>>,
    pub requests: Mutex<Vec<(Authorization, ChatRequest)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Self {
        let transport = Self::new();
        for reply in replies {
            transport.queue(reply);
        }
        transport
    }

    /// Queue a reply returned immediately
    pub fn queue(&self, reply: Reply) {
        self.queue_delayed(reply, Duration::ZERO);
    }

    /// Queue a reply returned after `delay`
    pub fn queue_delayed(&self, reply: Reply, delay: Duration) {
        self.replies.lock().push_back((reply, delay));
    }

    pub fn recorded_requests(&self) -> Vec<(Authorization, ChatRequest)> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn complete(
        &self,
        auth: &Authorization,
        request: &ChatRequest,
    ) -> clippy_ai::Result<ChatResponse> {
        self.requests.lock().push((auth.clone(), request.clone()));
        let next = self.replies.lock().pop_front();
        let (reply, delay) = next.unwrap_or((Reply::Malformed, Duration::ZERO));

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Reply::Body(body) => {
                let parsed: Option<ChatResponse> = serde_json::from_str(body)?;
                Ok(parsed.unwrap_or_default())
            }
            Reply::Status(status, reason) => Err(clippy_ai::Error::api(status, reason)),
            Reply::Malformed => {
                let parsed: ChatResponse = serde_json::from_str("<html>")?;
                Ok(parsed)
            }
        }
    }
}
