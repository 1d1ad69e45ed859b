//! Coupon lookup and order pricing.
//!
//! [`price_order`] is a pure function over a cart snapshot and an optional
//! applied coupon; it holds no state and is idempotent for the same input.
//! Discounts apply to the subtotal only, so the total can never dip below
//! the shipping cost.

use rust_decimal::Decimal;
use thiserror::Error;

use walknex_core::Price;

use crate::cart::Cart;

/// Subtotals strictly above this ship free.
const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 5000;
/// Flat shipping rate below the free-shipping threshold.
const FLAT_SHIPPING_CENTS: i64 = 499;

/// The static coupon table.
const COUPONS: &[CouponRule] = &[
    CouponRule {
        code: "WELCOME10",
        discount_percent: 10,
    },
    CouponRule {
        code: "SUMMER20",
        discount_percent: 20,
    },
];

/// Pricing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The coupon code is not in the table.
    #[error("invalid coupon code: {0}")]
    InvalidCoupon(String),
}

/// A coupon rule: a code and the percentage it takes off the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouponRule {
    pub code: &'static str,
    /// Percent off the subtotal, 0..=100. Values above 100 are treated as
    /// 100 when pricing.
    pub discount_percent: u8,
}

/// A priced order summary. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping_cost: Price,
    pub discount_amount: Price,
    pub total: Price,
}

/// Look up a coupon code, case-insensitively.
///
/// # Errors
///
/// Returns [`PricingError::InvalidCoupon`] for codes not in the table.
pub fn apply_coupon(code: &str) -> Result<CouponRule, PricingError> {
    let normalized = code.trim().to_uppercase();
    COUPONS
        .iter()
        .find(|rule| rule.code == normalized)
        .copied()
        .ok_or(PricingError::InvalidCoupon(normalized))
}

/// Price a cart snapshot with an optional applied coupon.
///
/// ```text
/// subtotal = totals(cart).total_price
/// shipping = subtotal > 50.00 ? 0 : 4.99
/// discount = rule ? subtotal * rule.discount_percent / 100 : 0
/// total    = subtotal + shipping - discount
/// ```
///
/// All arithmetic is exact decimal; rounding happens only when the summary
/// is displayed.
#[must_use]
pub fn price_order(cart: &Cart, rule: Option<&CouponRule>) -> OrderSummary {
    let subtotal = cart.totals().total_price;

    let shipping_cost = if subtotal.amount > Decimal::new(FREE_SHIPPING_THRESHOLD_CENTS, 2) {
        Price::zero()
    } else {
        Price::from_cents(FLAT_SHIPPING_CENTS)
    };

    // Cap at 100% so the discount can never exceed the subtotal.
    let discount_amount =
        rule.map_or_else(Price::zero, |r| subtotal.percent(r.discount_percent.min(100)));

    let total = subtotal.plus(&shipping_cost).minus(&discount_amount);

    OrderSummary {
        subtotal,
        shipping_cost,
        discount_amount,
        total,
    }
}
