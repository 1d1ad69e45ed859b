//! Integration tests for Walknex.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p walknex-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart ledger durability and owner-scope isolation
//! - `order_pricing` - Coupon and order summary flows
//! - `chat_session` - Consent, transcript, and fallback responder flows
//!
//! This crate also provides test doubles shared across the suites.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use walknex_storefront::store::{KeyedStore, StoreError, StoreKey, StoreScope};

/// A store whose substrate always rejects operations, for exercising the
/// degraded memory-only paths.
#[derive(Debug, Default)]
pub struct FailingStore;

impl KeyedStore for FailingStore {
    fn get(&self, _scope: &StoreScope, _key: StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        Err(StoreError::Unavailable("substrate disabled".to_string()))
    }

    fn set(&self, _scope: &StoreScope, _key: StoreKey, _value: &[u8]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("substrate disabled".to_string()))
    }

    fn remove(&self, _scope: &StoreScope, _key: StoreKey) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("substrate disabled".to_string()))
    }
}

/// A unique temp directory for one test's file-backed store.
///
/// Callers remove it when done; leaking it on panic is acceptable for tests.
#[must_use]
pub fn temp_data_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("walknex-{label}-{}", uuid::Uuid::new_v4()))
}
