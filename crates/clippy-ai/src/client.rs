//! HTTP client for chat-completions endpoints

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::{
    error::{Error, Result},
    types::{ChatRequest, ChatResponse},
};

/// Non-streaming chat-completions client.
///
/// Timeouts are whatever the underlying `reqwest::Client` is configured with.
#[derive(Debug, Clone, Default)]
pub struct ChatClient {
    client: reqwest::Client,
}

impl ChatClient {
    /// Create a client with reqwest's default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing `reqwest::Client` (custom timeouts, proxies)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// POST `request` to `endpoint` with a bearer key and decode the reply.
    ///
    /// A JSON `null` body decodes as a response with no choices.
    pub async fn complete(
        &self,
        endpoint: &str,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse> {
        let headers = build_headers(api_key)?;
        let body = serde_json::to_vec(request)?;

        tracing::debug!(
            endpoint,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(endpoint)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = match reason_phrase(&response) {
                Some(reason) => Error::api(status.as_u16(), reason),
                None => Error::from_status(status),
            };
            tracing::debug!(status = status.as_u16(), "Chat completion returned error status: {}", error);
            return Err(error);
        }

        let text = response.text().await?;
        let parsed: Option<ChatResponse> = serde_json::from_str(&text)?;
        Ok(parsed.unwrap_or_default())
    }
}

/// Reason phrase from the status line, when the server sent a non-canonical one.
///
/// hyper only records the phrase in the response extensions if it differs from
/// the standard phrase for the status code.
fn reason_phrase(response: &reqwest::Response) -> Option<String> {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .map(str::to_string)
}

fn build_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|e| Error::InvalidConfig(format!("API key is not a valid header value: {}", e)))?;
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    Ok(headers)
}
