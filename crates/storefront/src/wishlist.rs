//! Wishlist set: deduplicated product ids, owner-scoped.
//!
//! Wishlist semantics assume an identified owner: authenticated scopes
//! persist through the keyed store, the guest scope is ephemeral and is
//! discarded on any scope change. On scope change the active set is fully
//! reloaded for the new scope, never merged with the previous one.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use walknex_core::ProductId;

use crate::store::{KeyedStore, OwnerScope, Persistence, StoreKey, StoreScope};

/// A deduplicated set of product ids, insertion-ordered for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    items: Vec<ProductId>,
}

impl Wishlist {
    /// An empty wishlist.
    #[must_use]
    pub const fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// The product ids, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    /// Number of wished products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a product id. Idempotent: adding a present id changes nothing.
    #[must_use]
    pub fn add(&self, product_id: ProductId) -> Self {
        if self.contains(product_id) {
            return self.clone();
        }
        let mut items = self.items.clone();
        items.push(product_id);
        Self { items }
    }

    /// Remove a product id. No-op when absent.
    #[must_use]
    pub fn remove(&self, product_id: ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .copied()
                .filter(|id| *id != product_id)
                .collect(),
        }
    }

    /// Whether the set contains `product_id`.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.contains(&product_id)
    }

    /// The empty successor of this set.
    #[must_use]
    pub const fn clear(&self) -> Self {
        Self::empty()
    }
}

/// The active wishlist for one owner scope.
pub struct WishlistService {
    store: Arc<dyn KeyedStore>,
    scope: OwnerScope,
    set: Wishlist,
    durable: bool,
}

impl WishlistService {
    /// Load the persisted wishlist for `scope`, or start empty.
    ///
    /// The guest scope never has a persisted set.
    #[must_use]
    pub fn load(store: Arc<dyn KeyedStore>, scope: OwnerScope) -> Self {
        let set = read_set(store.as_ref(), &scope);
        Self {
            store,
            scope,
            set,
            durable: true,
        }
    }

    /// The current set.
    #[must_use]
    pub fn set(&self) -> &Wishlist {
        &self.set
    }

    /// The active owner scope.
    #[must_use]
    pub fn scope(&self) -> &OwnerScope {
        &self.scope
    }

    /// Whether the set contains `product_id`.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.set.contains(product_id)
    }

    /// Add a product (idempotent) and persist.
    pub fn add(&mut self, product_id: ProductId) -> Persistence {
        self.set = self.set.add(product_id);
        self.persist()
    }

    /// Remove a product and persist.
    pub fn remove(&mut self, product_id: ProductId) -> Persistence {
        self.set = self.set.remove(product_id);
        self.persist()
    }

    /// Empty the set and persist.
    pub fn clear(&mut self) -> Persistence {
        self.set = self.set.clear();
        self.persist()
    }

    /// Swap to `scope`, fully reloading the set persisted for the new scope.
    ///
    /// The outgoing in-memory set is dropped; switching to guest always
    /// yields an empty ephemeral set.
    pub fn switch_scope(&mut self, scope: OwnerScope) {
        self.set = read_set(self.store.as_ref(), &scope);
        self.scope = scope;
        self.durable = true;
    }

    fn persist(&mut self) -> Persistence {
        // Guest sets never reach the store.
        if self.scope == OwnerScope::Guest {
            return Persistence::MemoryOnly;
        }
        if !self.durable {
            return Persistence::MemoryOnly;
        }
        let blob = match serde_json::to_vec(&self.set) {
            Ok(blob) => blob,
            Err(err) => {
                warn!(error = %err, "failed to serialize wishlist; continuing in memory");
                self.durable = false;
                return Persistence::MemoryOnly;
            }
        };
        let scope = StoreScope::Owner(self.scope.clone());
        match self.store.set(&scope, StoreKey::Wishlist, &blob) {
            Ok(()) => Persistence::Durable,
            Err(err) => {
                warn!(error = %err, scope = %scope.namespace(), "wishlist write failed; continuing in memory");
                self.durable = false;
                Persistence::MemoryOnly
            }
        }
    }
}

fn read_set(store: &dyn KeyedStore, scope: &OwnerScope) -> Wishlist {
    if *scope == OwnerScope::Guest {
        return Wishlist::empty();
    }
    let store_scope = StoreScope::Owner(scope.clone());
    match store.get(&store_scope, StoreKey::Wishlist) {
        Ok(Some(blob)) => serde_json::from_slice(&blob).unwrap_or_else(|err| {
            warn!(error = %err, scope = %store_scope.namespace(), "corrupt wishlist blob; starting empty");
            Wishlist::empty()
        }),
        Ok(None) => Wishlist::empty(),
        Err(err) => {
            warn!(error = %err, scope = %store_scope.namespace(), "wishlist read failed; starting empty");
            Wishlist::empty()
        }
    }
}
