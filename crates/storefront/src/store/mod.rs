//! Persistent keyed store: the durable key-value substrate.
//!
//! The browser analog is local/session storage; here the substrate is a
//! pluggable [`KeyedStore`] implementation. Values are opaque bytes
//! (components serialize their own JSON blobs).
//!
//! # Namespaces
//!
//! Every record lives under a `(scope, key)` pair so concurrent sessions for
//! different owners never collide:
//!
//! - `Owner(Guest) / Cart` - guest cart ledger blob
//! - `Owner(User) / Cart` - per-user cart ledger blob
//! - `Owner(User) / Wishlist` - per-user wishlist set blob
//! - `Global / ChatConsent` - one-time durable consent flag
//! - `Session / ChatTranscript` - chat transcript for one session
//!
//! # Failure mode
//!
//! A rejected read or write surfaces as [`StoreError::Unavailable`]. Callers
//! degrade to in-memory-only operation for the session rather than crash;
//! storage failures are silent to the user but logged for diagnostics.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Namespace distinguishing guest vs. a specific authenticated identity for
/// persisted collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnerScope {
    /// Unauthenticated browser session.
    Guest,
    /// Authenticated user, keyed by the identity service's opaque user id.
    User(String),
}

impl OwnerScope {
    /// Stable namespace segment for this owner.
    #[must_use]
    pub fn namespace(&self) -> String {
        match self {
            Self::Guest => "guest".to_string(),
            Self::User(id) => format!("user-{id}"),
        }
    }
}

/// Full storage namespace: owner-scoped, global, or chat-session-scoped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreScope {
    /// Owned by a guest or authenticated user (cart, wishlist).
    Owner(OwnerScope),
    /// Shared across all owners and sessions (consent flag).
    Global,
    /// Scoped to one chat session (transcript).
    Session(String),
}

impl StoreScope {
    /// Stable namespace segment for this scope.
    #[must_use]
    pub fn namespace(&self) -> String {
        match self {
            Self::Owner(owner) => owner.namespace(),
            Self::Global => "global".to_string(),
            Self::Session(id) => format!("session-{id}"),
        }
    }
}

/// The reserved key set. No other keys are ever written by this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Cart,
    Wishlist,
    ChatConsent,
    ChatTranscript,
}

impl StoreKey {
    /// Stable key segment.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
            Self::ChatConsent => "chat-consent",
            Self::ChatTranscript => "chat-transcript",
        }
    }
}

/// Errors from the storage substrate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying medium rejected the operation (quota exceeded,
    /// disabled, I/O failure). Non-fatal: callers degrade to memory-only.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a mutating operation's persistence side effect.
///
/// A persistence failure never blocks the in-memory mutation; it downgrades
/// the outcome to [`Persistence::MemoryOnly`] so the caller can surface a
/// non-fatal warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// The new snapshot reached the durable substrate.
    Durable,
    /// The mutation applied in memory only; the substrate is unavailable.
    MemoryOnly,
}

/// Durable key-value substrate, namespaced by `(scope, key)`.
///
/// Operations are synchronous relative to the triggering event and must
/// never block unboundedly; a slow or unavailable substrate fails fast with
/// [`StoreError::Unavailable`].
pub trait KeyedStore: Send + Sync {
    /// Read the value under `(scope, key)`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the substrate rejects the read.
    fn get(&self, scope: &StoreScope, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write the value under `(scope, key)`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the substrate rejects the write.
    fn set(&self, scope: &StoreScope, key: StoreKey, value: &[u8]) -> Result<(), StoreError>;

    /// Remove the value under `(scope, key)`. Absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the substrate rejects the
    /// operation.
    fn remove(&self, scope: &StoreScope, key: StoreKey) -> Result<(), StoreError>;
}
