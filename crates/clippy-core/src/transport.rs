//! Transport abstraction for dispatching completion requests

use async_trait::async_trait;
use clippy_ai::{ChatClient, ChatRequest, ChatResponse, Result};

use crate::credentials::Authorization;

/// Performs one completion call. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn complete(&self, auth: &Authorization, request: &ChatRequest) -> Result<ChatResponse>;
}

/// Transport that POSTs to the configured endpoint over HTTP
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: ChatClient,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn complete(&self, auth: &Authorization, request: &ChatRequest) -> Result<ChatResponse> {
        self.client
            .complete(&auth.endpoint, &auth.api_key, request)
            .await
    }
}
