//! Storefront context: the explicit state object replacing global singletons.
//!
//! One context exists per app session. It owns the catalog, the shared keyed
//! store handle, and the per-owner-scope components (cart ledger, wishlist,
//! chat responder). Owner-scope changes flow through [`StorefrontContext::switch_scope`],
//! the single point where collections are swapped and reloaded.
//!
//! The identity service stays an opaque collaborator: callers resolve
//! authentication elsewhere and hand this context the resulting scope.

use std::sync::Arc;

use crate::cart::CartLedger;
use crate::catalog::Catalog;
use crate::chat::{ChatClient, ChatResponder};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::store::{FileStore, KeyedStore, MemoryStore, OwnerScope};
use crate::wishlist::WishlistService;

/// Session-lifetime state for the storefront engine.
pub struct StorefrontContext {
    catalog: Arc<Catalog>,
    store: Arc<dyn KeyedStore>,
    scope: OwnerScope,
    cart: CartLedger,
    wishlist: WishlistService,
    chat: ChatResponder,
}

impl StorefrontContext {
    /// Build a context from configuration, starting in the guest scope.
    ///
    /// Uses the file-backed store when `data_dir` is configured, the
    /// in-memory store otherwise; builds the remote chat client when an
    /// endpoint is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the chat HTTP client cannot be constructed.
    pub fn new(config: &StorefrontConfig, catalog: Catalog) -> Result<Self> {
        let store: Arc<dyn KeyedStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileStore::new(dir.clone())),
            None => Arc::new(MemoryStore::new()),
        };

        let client = match &config.chat_endpoint {
            Some(endpoint) => Some(ChatClient::new(endpoint.clone(), config.chat_timeout)?),
            None => None,
        };

        Ok(Self::with_store(store, catalog, client, config.chat_fallback))
    }

    /// Build a context over an explicit store, starting in the guest scope.
    #[must_use]
    pub fn with_store(
        store: Arc<dyn KeyedStore>,
        catalog: Catalog,
        client: Option<ChatClient>,
        chat_fallback: bool,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let scope = OwnerScope::Guest;
        let cart = CartLedger::load(store.clone(), scope.clone());
        let wishlist = WishlistService::load(store.clone(), scope.clone());
        let chat = ChatResponder::new(store.clone(), catalog.clone(), client, chat_fallback);

        Self {
            catalog,
            store,
            scope,
            cart,
            wishlist,
            chat,
        }
    }

    /// The product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The shared store handle.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyedStore> {
        &self.store
    }

    /// The active owner scope.
    #[must_use]
    pub const fn scope(&self) -> &OwnerScope {
        &self.scope
    }

    /// The cart ledger for the active scope.
    #[must_use]
    pub const fn cart(&self) -> &CartLedger {
        &self.cart
    }

    /// Mutable cart ledger for the active scope.
    pub const fn cart_mut(&mut self) -> &mut CartLedger {
        &mut self.cart
    }

    /// The wishlist for the active scope.
    #[must_use]
    pub const fn wishlist(&self) -> &WishlistService {
        &self.wishlist
    }

    /// Mutable wishlist for the active scope.
    pub const fn wishlist_mut(&mut self) -> &mut WishlistService {
        &mut self.wishlist
    }

    /// The chat responder for this session.
    #[must_use]
    pub const fn chat(&self) -> &ChatResponder {
        &self.chat
    }

    /// Mutable chat responder for this session.
    pub const fn chat_mut(&mut self) -> &mut ChatResponder {
        &mut self.chat
    }

    /// Switch to a new owner scope (login or logout).
    ///
    /// Swaps the cart and wishlist by reloading each collection from the
    /// store under the new scope; in-memory state from the outgoing scope is
    /// dropped, never merged. The chat session is scope-independent and is
    /// untouched.
    pub fn switch_scope(&mut self, scope: OwnerScope) {
        if scope == self.scope {
            return;
        }
        self.cart.switch_scope(scope.clone());
        self.wishlist.switch_scope(scope.clone());
        self.scope = scope;
    }
}
