//! Type-safe price representation using decimal arithmetic.
//!
//! All monetary arithmetic in the workspace flows through [`Price`], which
//! wraps an exact [`Decimal`] amount. Rounding to two decimal places happens
//! only at the presentation boundary ([`Price::rounded`] / [`Price::display`])
//! using round-half-up, so intermediate arithmetic never drifts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., pounds, not pence).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from minor units (pence/cents) in the store currency.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self::new(Decimal::new(cents, 2), CurrencyCode::default())
    }

    /// Zero in the store currency.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_cents(0)
    }

    /// Add another price. Both operands must share a currency.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        debug_assert_eq!(self.currency_code, other.currency_code);
        Self::new(self.amount + other.amount, self.currency_code)
    }

    /// Subtract another price. Both operands must share a currency.
    #[must_use]
    pub fn minus(&self, other: &Self) -> Self {
        debug_assert_eq!(self.currency_code, other.currency_code);
        Self::new(self.amount - other.amount, self.currency_code)
    }

    /// Multiply by a line-item quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Take a percentage of this price (e.g., a discount of `percent`%).
    #[must_use]
    pub fn percent(&self, percent: u8) -> Self {
        Self::new(
            self.amount * Decimal::from(percent) / Decimal::ONE_HUNDRED,
            self.currency_code,
        )
    }

    /// Amount rounded to two decimal places, round-half-up.
    ///
    /// This is the presentation-boundary rounding; exact amounts are kept
    /// internally.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "£19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.rounded())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    USD,
    EUR,
    #[default]
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// ISO 4217 code string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_is_exact() {
        let price = Price::from_cents(12999);
        assert_eq!(price.amount, Decimal::new(12999, 2));
        assert_eq!(price.currency_code, CurrencyCode::GBP);
    }

    #[test]
    fn test_arithmetic_is_exact() {
        // 0.10 + 0.20 must be exactly 0.30, not 0.30000000000000004
        let sum = Price::from_cents(10).plus(&Price::from_cents(20));
        assert_eq!(sum, Price::from_cents(30));

        let tripled = Price::from_cents(3333).times(3);
        assert_eq!(tripled, Price::from_cents(9999));
    }

    #[test]
    fn test_percent_keeps_exact_intermediate() {
        // 20% of 40.00 is exactly 8.00
        let discount = Price::from_cents(4000).percent(20);
        assert_eq!(discount, Price::from_cents(800));
    }

    #[test]
    fn test_rounding_is_half_up() {
        // 10.005 rounds up to 10.01 at the boundary
        let price = Price::new(Decimal::new(10_005, 3), CurrencyCode::GBP);
        assert_eq!(price.rounded(), Decimal::new(1001, 2));
    }

    #[test]
    fn test_display_uses_symbol() {
        assert_eq!(Price::from_cents(12999).display(), "£129.99");
        assert_eq!(
            Price::new(Decimal::new(500, 2), CurrencyCode::USD).display(),
            "$5.00"
        );
    }
}
