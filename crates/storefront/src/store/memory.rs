//! In-memory store: the no-substrate fallback.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyedStore, StoreError, StoreKey, StoreScope};

/// In-memory [`KeyedStore`].
///
/// Used when no durable substrate is configured, and as the degraded mode
/// components fall into when the durable substrate rejects a write. Contents
/// last for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(String, StoreKey), Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut HashMap<(String, StoreKey), Vec<u8>>) -> T,
    ) -> Result<T, StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("poisoned store lock".to_string()))?;
        Ok(f(&mut entries))
    }
}

impl KeyedStore for MemoryStore {
    fn get(&self, scope: &StoreScope, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        self.with_entries(|entries| entries.get(&(scope.namespace(), key)).cloned())
    }

    fn set(&self, scope: &StoreScope, key: StoreKey, value: &[u8]) -> Result<(), StoreError> {
        self.with_entries(|entries| {
            entries.insert((scope.namespace(), key), value.to_vec());
        })
    }

    fn remove(&self, scope: &StoreScope, key: StoreKey) -> Result<(), StoreError> {
        self.with_entries(|entries| {
            entries.remove(&(scope.namespace(), key));
        })
    }
}
