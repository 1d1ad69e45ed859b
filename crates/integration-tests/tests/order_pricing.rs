//! Integration tests for coupon application and order pricing.

use std::sync::Arc;

use walknex_core::Price;
use walknex_storefront::catalog::Catalog;
use walknex_storefront::pricing::{PricingError, apply_coupon, price_order};
use walknex_storefront::state::StorefrontContext;
use walknex_storefront::store::MemoryStore;

fn context() -> StorefrontContext {
    StorefrontContext::with_store(
        Arc::new(MemoryStore::new()),
        Catalog::walknex_demo(),
        None,
        true,
    )
}

#[test]
fn test_checkout_flow_with_welcome10() {
    let mut ctx = context();

    // Air Cloud Runner at 129.99: subtotal over the free-shipping threshold.
    let shoe = ctx.catalog().products()[0].clone();
    ctx.cart_mut().add_item(&shoe, 1, None).expect("add");

    let rule = apply_coupon("welcome10").expect("valid code");
    let summary = price_order(ctx.cart().cart(), Some(&rule));

    assert_eq!(summary.subtotal, Price::from_cents(12999));
    assert_eq!(summary.shipping_cost, Price::zero());
    // 10% of 129.99 is exactly 12.999; display rounds half-up to 13.00.
    assert_eq!(summary.discount_amount.display(), "£13.00");
    assert_eq!(summary.total.display(), "£116.99");
}

#[test]
fn test_checkout_flow_below_free_shipping() {
    let mut ctx = context();

    // Classic Canvas at 69.99 clears the threshold; an emptied cart does not.
    let shoe = ctx.catalog().products()[4].clone();
    ctx.cart_mut().add_item(&shoe, 1, None).expect("add");
    let summary = price_order(ctx.cart().cart(), None);
    assert_eq!(summary.shipping_cost, Price::zero(), "69.99 ships free");

    ctx.cart_mut().clear();
    let summary = price_order(ctx.cart().cart(), None);
    assert_eq!(summary.shipping_cost, Price::from_cents(499));
    assert_eq!(summary.total, Price::from_cents(499));
}

#[test]
fn test_invalid_coupon_leaves_summary_unchanged() {
    let mut ctx = context();
    let shoe = ctx.catalog().products()[1].clone();
    ctx.cart_mut().add_item(&shoe, 1, None).expect("add");

    let before = price_order(ctx.cart().cart(), None);

    let err = apply_coupon("NOTACODE").expect_err("invalid code");
    assert_eq!(err, PricingError::InvalidCoupon("NOTACODE".to_string()));

    // No rule was produced, so the order summary is untouched.
    let after = price_order(ctx.cart().cart(), None);
    assert_eq!(before, after);
}

#[test]
fn test_pricing_tracks_cart_mutations() {
    let mut ctx = context();
    let shoe = ctx.catalog().products()[0].clone();
    let boot = ctx.catalog().products()[5].clone();

    ctx.cart_mut().add_item(&shoe, 1, None).expect("add");
    ctx.cart_mut().add_item(&boot, 1, None).expect("add");
    let summary = price_order(ctx.cart().cart(), None);
    assert_eq!(summary.subtotal, Price::from_cents(32998));

    // Totals are derived fresh on every read: removing a line is reflected
    // immediately in the next pricing pass.
    ctx.cart_mut().remove_item(boot.id, None);
    let summary = price_order(ctx.cart().cart(), None);
    assert_eq!(summary.subtotal, Price::from_cents(12999));
}
