//! Unified error handling for the storefront engine.
//!
//! Component errors aggregate into [`StorefrontError`]; public operations
//! never let anything escape unclassified. Persistence and network failures
//! are caught at component boundaries and converted into degraded-but-
//! functional states (see [`crate::store::Persistence`]) or soft error
//! messages, so most of these variants surface only at the outermost API.

use thiserror::Error;

use crate::cart::CartError;
use crate::chat::ChatError;
use crate::config::ConfigError;
use crate::pricing::PricingError;
use crate::store::StoreError;

/// Application-level error type for the storefront engine.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Coupon or pricing operation failed.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// The storage substrate rejected an operation. Non-fatal: components
    /// degrade to memory-only operation.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// The remote chat call failed. Never fatal: the session falls back or
    /// shows a soft error message.
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
