//! Cart ledger: line items keyed by `(product, variant)` with derived totals.
//!
//! [`Cart`] is a pure immutable snapshot; every operation returns a new
//! snapshot. [`CartLedger`] owns the active snapshot for one owner scope and
//! persists each mutation through the keyed store, degrading to memory-only
//! operation when the substrate fails.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use walknex_core::{Price, Product, ProductId, Size};

use crate::store::{KeyedStore, OwnerScope, Persistence, StoreKey, StoreScope};

/// Cart operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity must be a positive integer.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),
}

/// One `(product, variant, quantity)` entry in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    /// Selected size, if the product was added with one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Size>,
    pub quantity: u32,
    pub unit_price: Price,
    pub name: String,
    pub image: String,
}

impl CartLine {
    /// Price contribution of this line: `quantity x unit_price`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    fn matches(&self, product_id: ProductId, variant: Option<Size>) -> bool {
        self.product_id == product_id && self.variant == variant
    }
}

/// Derived cart totals. Recomputed on every read, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    pub total_items: u32,
    pub total_price: Price,
}

/// An immutable cart snapshot.
///
/// Ordered by insertion for display; order is not semantically significant.
/// Invariant: at most one line per `(product_id, variant)` pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of `product` (optionally in a specific size).
    ///
    /// Merges by summing quantity when a line for `(product.id, variant)`
    /// already exists; otherwise appends a new line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is zero.
    pub fn add_item(
        &self,
        product: &Product,
        quantity: u32,
        variant: Option<Size>,
    ) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let mut lines = self.lines.clone();
        if let Some(line) = lines.iter_mut().find(|l| l.matches(product.id, variant)) {
            line.quantity += quantity;
        } else {
            lines.push(CartLine {
                product_id: product.id,
                variant,
                quantity,
                unit_price: product.price,
                name: product.name.clone(),
                image: product.image.clone(),
            });
        }
        Ok(Self { lines })
    }

    /// Remove the line matching `(product_id, variant)`. No-op when absent.
    #[must_use]
    pub fn remove_item(&self, product_id: ProductId, variant: Option<Size>) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .filter(|l| !l.matches(product_id, variant))
                .cloned()
                .collect(),
        }
    }

    /// Replace the quantity of the matching line.
    ///
    /// A `new_quantity` below 1 behaves as [`Cart::remove_item`]. No-op when
    /// the line is absent.
    #[must_use]
    pub fn set_quantity(
        &self,
        product_id: ProductId,
        new_quantity: u32,
        variant: Option<Size>,
    ) -> Self {
        if new_quantity < 1 {
            return self.remove_item(product_id, variant);
        }
        let mut lines = self.lines.clone();
        if let Some(line) = lines.iter_mut().find(|l| l.matches(product_id, variant)) {
            line.quantity = new_quantity;
        }
        Self { lines }
    }

    /// An empty cart (the cleared successor of this one).
    #[must_use]
    pub const fn clear(&self) -> Self {
        Self::empty()
    }

    /// Derive `{total_items, total_price}` from the line items.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            total_items: self.lines.iter().map(|l| l.quantity).sum(),
            total_price: self
                .lines
                .iter()
                .fold(Price::zero(), |acc, l| acc.plus(&l.line_total())),
        }
    }
}

/// The active cart for one owner scope, persisted through the keyed store.
///
/// Switching owner scope swaps the entire snapshot by reloading from the
/// store for the new scope; carts are never merged across scopes.
pub struct CartLedger {
    store: Arc<dyn KeyedStore>,
    scope: OwnerScope,
    cart: Cart,
    durable: bool,
}

impl CartLedger {
    /// Load the persisted cart for `scope`, or start empty.
    ///
    /// A missing or unreadable blob yields an empty cart; unreadable blobs
    /// are logged, not surfaced.
    #[must_use]
    pub fn load(store: Arc<dyn KeyedStore>, scope: OwnerScope) -> Self {
        let cart = read_snapshot(store.as_ref(), &scope);
        Self {
            store,
            scope,
            cart,
            durable: true,
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The active owner scope.
    #[must_use]
    pub fn scope(&self) -> &OwnerScope {
        &self.scope
    }

    /// Whether mutations are still reaching the durable substrate.
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        self.durable
    }

    /// Derived totals of the current snapshot.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Add an item and persist the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is zero; the
    /// snapshot is unchanged in that case.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
        variant: Option<Size>,
    ) -> Result<Persistence, CartError> {
        self.cart = self.cart.add_item(product, quantity, variant)?;
        Ok(self.persist())
    }

    /// Remove an item and persist the new snapshot.
    pub fn remove_item(&mut self, product_id: ProductId, variant: Option<Size>) -> Persistence {
        self.cart = self.cart.remove_item(product_id, variant);
        self.persist()
    }

    /// Set a line's quantity and persist the new snapshot.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        new_quantity: u32,
        variant: Option<Size>,
    ) -> Persistence {
        self.cart = self.cart.set_quantity(product_id, new_quantity, variant);
        self.persist()
    }

    /// Empty the cart and persist the new snapshot.
    pub fn clear(&mut self) -> Persistence {
        self.cart = self.cart.clear();
        self.persist()
    }

    /// Swap to `scope`, replacing the snapshot with the one persisted for
    /// the new scope. The outgoing in-memory cart is dropped, never merged.
    pub fn switch_scope(&mut self, scope: OwnerScope) {
        self.cart = read_snapshot(self.store.as_ref(), &scope);
        self.scope = scope;
        self.durable = true;
    }

    fn persist(&mut self) -> Persistence {
        if !self.durable {
            return Persistence::MemoryOnly;
        }
        let blob = match serde_json::to_vec(&self.cart) {
            Ok(blob) => blob,
            Err(err) => {
                warn!(error = %err, "failed to serialize cart; continuing in memory");
                self.durable = false;
                return Persistence::MemoryOnly;
            }
        };
        let scope = StoreScope::Owner(self.scope.clone());
        match self.store.set(&scope, StoreKey::Cart, &blob) {
            Ok(()) => Persistence::Durable,
            Err(err) => {
                warn!(error = %err, scope = %scope.namespace(), "cart write failed; continuing in memory");
                self.durable = false;
                Persistence::MemoryOnly
            }
        }
    }
}

fn read_snapshot(store: &dyn KeyedStore, scope: &OwnerScope) -> Cart {
    let store_scope = StoreScope::Owner(scope.clone());
    match store.get(&store_scope, StoreKey::Cart) {
        Ok(Some(blob)) => serde_json::from_slice(&blob).unwrap_or_else(|err| {
            warn!(error = %err, scope = %store_scope.namespace(), "corrupt cart blob; starting empty");
            Cart::empty()
        }),
        Ok(None) => Cart::empty(),
        Err(err) => {
            warn!(error = %err, scope = %store_scope.namespace(), "cart read failed; starting empty");
            Cart::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use walknex_core::{Category, CurrencyCode, Gender};

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Shoe {id}"),
            price: Price::from_cents(cents),
            category: Category::Running,
            gender: Gender::Men,
            image: "https://example.com/shoe.jpeg".to_string(),
            sizes: vec![Size::whole(8), Size::half(8)],
            rating: 4.5,
            reviews: 10,
            in_stock: true,
            description: "A shoe".to_string(),
        }
    }

    // =========================================================================
    // Cart snapshot tests
    // =========================================================================

    #[test]
    fn test_add_item_merges_same_product_and_variant() {
        let shoe = product(1, 1000);
        let cart = Cart::empty()
            .add_item(&shoe, 1, Some(Size::whole(8)))
            .expect("add")
            .add_item(&shoe, 2, Some(Size::whole(8)))
            .expect("add");

        assert_eq!(cart.lines().len(), 1, "exactly one line per (product, variant)");
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_add_item_distinct_variants_get_distinct_lines() {
        let shoe = product(1, 1000);
        let cart = Cart::empty()
            .add_item(&shoe, 1, Some(Size::whole(8)))
            .expect("add")
            .add_item(&shoe, 1, Some(Size::half(8)))
            .expect("add")
            .add_item(&shoe, 1, None)
            .expect("add");

        assert_eq!(cart.lines().len(), 3);
    }

    #[test]
    fn test_add_item_rejects_zero_quantity() {
        let shoe = product(1, 1000);
        assert_eq!(
            Cart::empty().add_item(&shoe, 0, None),
            Err(CartError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_remove_item_is_noop_when_absent() {
        let shoe = product(1, 1000);
        let cart = Cart::empty().add_item(&shoe, 1, None).expect("add");
        let after = cart.remove_item(ProductId::new(99), None);
        assert_eq!(after, cart);
    }

    #[test]
    fn test_remove_item_matches_exact_variant() {
        let shoe = product(1, 1000);
        let cart = Cart::empty()
            .add_item(&shoe, 1, Some(Size::whole(8)))
            .expect("add")
            .add_item(&shoe, 1, Some(Size::half(8)))
            .expect("add");

        let after = cart.remove_item(ProductId::new(1), Some(Size::whole(8)));
        assert_eq!(after.lines().len(), 1);
        assert_eq!(after.lines()[0].variant, Some(Size::half(8)));
    }

    #[test]
    fn test_set_quantity_below_one_removes_the_line() {
        let shoe = product(1, 1000);
        let cart = Cart::empty().add_item(&shoe, 3, None).expect("add");
        let after = cart.set_quantity(ProductId::new(1), 0, None);
        assert!(after.is_empty());
    }

    #[test]
    fn test_set_quantity_replaces_not_adds() {
        let shoe = product(1, 1000);
        let cart = Cart::empty().add_item(&shoe, 3, None).expect("add");
        let after = cart.set_quantity(ProductId::new(1), 5, None);
        assert_eq!(after.lines()[0].quantity, 5);
    }

    #[test]
    fn test_totals_derive_from_lines() {
        let a = product(1, 12999);
        let b = product(2, 7999);
        let cart = Cart::empty()
            .add_item(&a, 2, None)
            .expect("add")
            .add_item(&b, 1, None)
            .expect("add");

        let totals = cart.totals();
        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.total_price, Price::from_cents(33997));
    }

    #[test]
    fn test_totals_never_negative_after_removals() {
        let shoe = product(1, 1000);
        let cart = Cart::empty()
            .add_item(&shoe, 1, None)
            .expect("add")
            .remove_item(ProductId::new(1), None)
            .remove_item(ProductId::new(1), None);

        let totals = cart.totals();
        assert_eq!(totals.total_items, 0);
        assert_eq!(totals.total_price, Price::zero());
        assert_eq!(totals.total_price.currency_code, CurrencyCode::GBP);
    }

    // =========================================================================
    // CartLedger tests
    // =========================================================================

    #[test]
    fn test_ledger_persists_and_reloads() {
        let store = Arc::new(MemoryStore::new());
        let shoe = product(1, 1000);

        let mut ledger = CartLedger::load(store.clone(), OwnerScope::Guest);
        let outcome = ledger.add_item(&shoe, 2, None).expect("add");
        assert_eq!(outcome, Persistence::Durable);

        let reloaded = CartLedger::load(store, OwnerScope::Guest);
        assert_eq!(reloaded.totals().total_items, 2);
    }

    #[test]
    fn test_ledger_scope_switch_swaps_not_merges() {
        let store = Arc::new(MemoryStore::new());
        let shoe = product(1, 1000);

        let mut ledger = CartLedger::load(store.clone(), OwnerScope::Guest);
        ledger.add_item(&shoe, 2, None).expect("add");

        ledger.switch_scope(OwnerScope::User("alice".to_string()));
        assert!(ledger.cart().is_empty(), "alice has no persisted cart yet");

        let other = product(2, 500);
        ledger.add_item(&other, 1, None).expect("add");

        ledger.switch_scope(OwnerScope::Guest);
        assert_eq!(ledger.cart().lines().len(), 1);
        assert_eq!(ledger.cart().lines()[0].product_id, ProductId::new(1));
    }

    #[test]
    fn test_ledger_tolerates_corrupt_blob() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                &StoreScope::Owner(OwnerScope::Guest),
                StoreKey::Cart,
                b"not json",
            )
            .expect("seed corrupt blob");

        let ledger = CartLedger::load(store, OwnerScope::Guest);
        assert!(ledger.cart().is_empty());
    }
}
