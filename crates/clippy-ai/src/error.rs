//! Error types for clippy-ai

use thiserror::Error;

/// Result type alias using clippy-ai Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when calling a chat-completions endpoint
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint answered with a non-success status
    #[error("API error: {reason}")]
    Api { status: u16, reason: String },

    /// Invalid configuration (endpoint, credentials)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create an API error from a status code and reason phrase
    pub fn api(status: u16, reason: impl Into<String>) -> Self {
        Self::Api {
            status,
            reason: reason.into(),
        }
    }

    /// Create an API error from an HTTP status, using its canonical reason phrase.
    ///
    /// Statuses without a registered phrase fall back to the numeric code.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        let reason = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string());
        Self::api(status.as_u16(), reason)
    }

    /// Whether the endpoint was reached and answered with an error status
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api { .. })
    }
}
