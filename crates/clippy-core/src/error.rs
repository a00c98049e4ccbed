//! Error types for clippy-core

use thiserror::Error;

/// Failure to look up the API key.
///
/// The credential gate treats any of these as "not ready"; they never reach
/// the caller of `ChatService::send`.
#[derive(Error, Debug)]
pub enum KeyError {
    /// The backing secret store could not be reached
    #[error("Key store unavailable: {0}")]
    Unavailable(String),

    /// Reading the stored key failed
    #[error("Key store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
