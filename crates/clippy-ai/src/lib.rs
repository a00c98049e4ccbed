//! clippy-ai: chat-completion wire layer
//!
//! Request/response types for an OpenAI-style chat-completions endpoint and a
//! small HTTP client that performs a single, non-streaming completion call.

pub mod client;
pub mod error;
pub mod types;

pub use client::ChatClient;
pub use error::{Error, Result};
pub use types::*;
