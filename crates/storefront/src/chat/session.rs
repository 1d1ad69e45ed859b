//! Chat session state machine and transcript ownership.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use walknex_core::ChatMessage;

use crate::catalog::Catalog;
use crate::store::{KeyedStore, Persistence, StoreKey, StoreScope};

use super::client::ChatClient;
use super::error::ChatError;
use super::fallback::fallback_response;
use super::types::WELCOME_MESSAGE;

/// Fixed apology appended when the remote endpoint fails and no fallback is
/// available.
const APOLOGY: &str = "Sorry, I'm having trouble connecting right now. \
                       Please try again later or contact our support team.";

/// Consent gate for the chat panel.
///
/// `Idle -> AwaitingConsent` on first open without a durable consent flag;
/// `AwaitingConsent -> Active` on accept. Decline is not remembered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    Idle,
    AwaitingConsent,
    Active,
}

/// Per-message feedback annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Helpful,
    NotHelpful,
}

/// One chat session: consent gate, append-only transcript, and the
/// single-outstanding-request guard.
///
/// The transcript is persisted session-scoped after every append; the
/// consent flag is global and durable.
pub struct ChatResponder {
    store: Arc<dyn KeyedStore>,
    catalog: Arc<Catalog>,
    client: Option<ChatClient>,
    fallback_enabled: bool,
    session_id: String,
    created_at: DateTime<Utc>,
    messages: Vec<ChatMessage>,
    consent: ConsentState,
    in_flight: bool,
    feedback: HashMap<usize, Feedback>,
    durable: bool,
}

impl ChatResponder {
    /// Start a fresh session with a new opaque session id.
    ///
    /// `client` is the remote endpoint, if one is configured;
    /// `fallback_enabled` selects the local responder over the fixed apology
    /// on remote failure.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyedStore>,
        catalog: Arc<Catalog>,
        client: Option<ChatClient>,
        fallback_enabled: bool,
    ) -> Self {
        let session_id = format!("session_{}", Uuid::new_v4());
        Self {
            store,
            catalog,
            client,
            fallback_enabled,
            session_id,
            created_at: Utc::now(),
            messages: vec![ChatMessage::bot(WELCOME_MESSAGE, Vec::new())],
            consent: ConsentState::Idle,
            in_flight: false,
            feedback: HashMap::new(),
            durable: true,
        }
    }

    /// Resume a prior session from its persisted transcript.
    ///
    /// A missing or unreadable transcript yields a fresh welcome transcript
    /// under the same session id.
    #[must_use]
    pub fn resume(
        store: Arc<dyn KeyedStore>,
        catalog: Arc<Catalog>,
        client: Option<ChatClient>,
        fallback_enabled: bool,
        session_id: impl Into<String>,
    ) -> Self {
        let mut responder = Self::new(store, catalog, client, fallback_enabled);
        responder.session_id = session_id.into();
        let scope = StoreScope::Session(responder.session_id.clone());
        match responder.store.get(&scope, StoreKey::ChatTranscript) {
            Ok(Some(blob)) => match serde_json::from_slice::<Vec<ChatMessage>>(&blob) {
                Ok(messages) if !messages.is_empty() => responder.messages = messages,
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, session = %responder.session_id, "corrupt transcript; starting fresh");
                }
            },
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, session = %responder.session_id, "transcript read failed; starting fresh");
            }
        }
        responder
    }

    /// Opaque session id, stable for the session's lifetime.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// When the session object was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The transcript, oldest first. Index 0 is always the welcome message.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The current consent state.
    #[must_use]
    pub const fn consent_state(&self) -> ConsentState {
        self.consent
    }

    /// Whether a remote request is currently outstanding.
    #[must_use]
    pub const fn is_awaiting_response(&self) -> bool {
        self.in_flight
    }

    /// Open the chat panel.
    ///
    /// Enters `Active` directly when the durable consent flag exists,
    /// otherwise transitions to `AwaitingConsent`.
    pub fn open(&mut self) -> ConsentState {
        if self.consent == ConsentState::Active {
            return self.consent;
        }
        self.consent = if self.consent_flag_set() {
            ConsentState::Active
        } else {
            ConsentState::AwaitingConsent
        };
        self.consent
    }

    /// Accept the consent prompt: persists the flag permanently and
    /// activates the session.
    pub fn accept_consent(&mut self) -> Persistence {
        self.consent = ConsentState::Active;
        match self
            .store
            .set(&StoreScope::Global, StoreKey::ChatConsent, b"true")
        {
            Ok(()) => Persistence::Durable,
            Err(err) => {
                warn!(error = %err, "consent flag write failed; consent holds for this session only");
                Persistence::MemoryOnly
            }
        }
    }

    /// Decline the consent prompt. Not remembered: the prompt recurs on the
    /// next open.
    pub const fn decline_consent(&mut self) {
        self.consent = ConsentState::AwaitingConsent;
    }

    /// Send one user message and append the bot reply.
    ///
    /// Appends the user message, invokes the remote endpoint (when
    /// configured), and appends the bot reply. On remote failure the local
    /// fallback responder answers when enabled; otherwise a fixed apology is
    /// appended with the error flag set. Whitespace-only input is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::NotActive`] before consent and
    /// [`ChatError::RequestInFlight`] while a request is outstanding. Remote
    /// failures are absorbed into the transcript, never returned.
    pub async fn send_message(&mut self, text: &str) -> Result<(), ChatError> {
        if self.consent != ConsentState::Active {
            return Err(ChatError::NotActive);
        }
        if self.in_flight {
            return Err(ChatError::RequestInFlight);
        }
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        self.messages.push(ChatMessage::user(text));
        self.persist_transcript();

        // Clone the Arc-backed handle so the in-flight flag can flip while
        // the request is outstanding.
        let client = self.client.clone();
        let reply = match client {
            Some(client) => {
                let outcome = {
                    // The guard clears the flag even when this future is
                    // dropped at the await point.
                    let _guard = InFlightGuard::arm(&mut self.in_flight);
                    client.respond(text, &self.session_id).await
                };
                match outcome {
                    Ok(response) => ChatMessage::bot(response.message, response.recommendations),
                    Err(err) => {
                        warn!(error = %err, session = %self.session_id, "remote chat call failed");
                        self.degraded_reply(text)
                    }
                }
            }
            None => self.degraded_reply(text),
        };
        debug_assert!(!self.in_flight);

        self.messages.push(reply);
        self.persist_transcript();
        Ok(())
    }

    /// Annotate a bot message with feedback. Index 0 (the welcome message)
    /// and user messages are not annotatable.
    pub fn set_feedback(&mut self, index: usize, feedback: Feedback) {
        let annotatable = index > 0
            && self
                .messages
                .get(index)
                .is_some_and(|m| m.sender == walknex_core::Sender::Bot && !m.is_error);
        if annotatable {
            self.feedback.insert(index, feedback);
        }
    }

    /// Feedback recorded for a message, if any.
    #[must_use]
    pub fn feedback(&self, index: usize) -> Option<Feedback> {
        self.feedback.get(&index).copied()
    }

    /// Reset the transcript to the single welcome message and clear all
    /// feedback annotations. Consent and the session id are untouched.
    pub fn restart(&mut self) {
        self.messages = vec![ChatMessage::bot(WELCOME_MESSAGE, Vec::new())];
        self.feedback.clear();
        self.persist_transcript();
    }

    fn degraded_reply(&self, text: &str) -> ChatMessage {
        if self.fallback_enabled {
            let reply = fallback_response(&self.catalog, text);
            ChatMessage::bot(reply.message, reply.recommendations)
        } else {
            ChatMessage::bot_error(APOLOGY)
        }
    }

    fn consent_flag_set(&self) -> bool {
        match self.store.get(&StoreScope::Global, StoreKey::ChatConsent) {
            Ok(flag) => flag.as_deref() == Some(b"true"),
            Err(err) => {
                warn!(error = %err, "consent flag read failed; treating as absent");
                false
            }
        }
    }

    fn persist_transcript(&mut self) {
        if !self.durable {
            return;
        }
        let blob = match serde_json::to_vec(&self.messages) {
            Ok(blob) => blob,
            Err(err) => {
                warn!(error = %err, "failed to serialize transcript; continuing in memory");
                self.durable = false;
                return;
            }
        };
        let scope = StoreScope::Session(self.session_id.clone());
        if let Err(err) = self.store.set(&scope, StoreKey::ChatTranscript, &blob) {
            warn!(error = %err, session = %self.session_id, "transcript write failed; continuing in memory");
            self.durable = false;
        }
    }
}

/// Holds the in-flight flag for the lifetime of one remote request.
///
/// Dropping the guard clears the flag, including when the enclosing send
/// future is cancelled mid-request.
struct InFlightGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> InFlightGuard<'a> {
    fn arm(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}
