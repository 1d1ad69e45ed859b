//! Error types for the chat responder.

use thiserror::Error;

/// Errors from the remote chat endpoint and the session machinery.
///
/// Remote failures are never fatal: the session converts them into either a
/// fallback reply or an apologetic error message in the transcript.
#[derive(Debug, Error)]
pub enum ChatError {
    /// HTTP request failed (network error or timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("chat endpoint returned status {0}")]
    Status(u16),

    /// The endpoint answered 2xx but the body was not the expected shape.
    #[error("malformed endpoint response: {0}")]
    Malformed(String),

    /// A request is already outstanding for this session.
    #[error("a chat request is already in flight")]
    RequestInFlight,

    /// The session is not active (consent has not been granted).
    #[error("chat session is not active")]
    NotActive,

    /// Failed to build the HTTP client.
    #[error("failed to build chat client: {0}")]
    Build(String),
}
