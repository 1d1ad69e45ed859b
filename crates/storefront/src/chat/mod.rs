//! Chat session responder.
//!
//! A session-scoped conversational client over a remote chat endpoint, with
//! a deterministic local fallback responder used when the remote service is
//! unavailable (or no endpoint is configured at all).
//!
//! # Session lifecycle
//!
//! Consent gates the panel: `Idle -> AwaitingConsent -> Active`. The consent
//! flag is durable and global; declining is not remembered, so the prompt
//! recurs on the next open. The transcript is append-only and persisted per
//! session; `restart` resets it to the single welcome message without
//! touching consent or the session id.

mod client;
mod error;
mod fallback;
mod session;
mod types;

pub use client::ChatClient;
pub use error::ChatError;
pub use fallback::{FallbackReply, fallback_response};
pub use session::{ChatResponder, ConsentState, Feedback};
pub use types::{ChatEndpointRequest, ChatEndpointResponse, WELCOME_MESSAGE};
