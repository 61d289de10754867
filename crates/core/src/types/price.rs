//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// An amount of zero means "unknown/unpriced" - web-resolved products whose
/// price could not be determined carry a zero amount and render as
/// `Price N/A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
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

    /// Create a USD price.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// The zero (unknown) price in USD.
    #[must_use]
    pub const fn zero() -> Self {
        Self::usd(Decimal::ZERO)
    }

    /// Whether this price is the "unknown" sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.amount.is_zero()
    }

    /// Format for display (e.g., `$19.99`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }

    /// Format for display, rendering an unknown price as `Price N/A`.
    #[must_use]
    pub fn display_or_na(&self) -> String {
        if self.is_unknown() {
            String::from("Price N/A")
        } else {
            self.display()
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// The display symbol for this currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        let price = Price::usd(Decimal::new(2499, 2));
        assert_eq!(price.display(), "$24.99");
    }

    #[test]
    fn test_price_display_pads_cents() {
        let price = Price::usd(Decimal::new(5, 0));
        assert_eq!(price.display(), "$5.00");
    }

    #[test]
    fn test_zero_price_is_unknown() {
        assert!(Price::zero().is_unknown());
        assert_eq!(Price::zero().display_or_na(), "Price N/A");
    }

    #[test]
    fn test_known_price_display_or_na() {
        let price = Price::usd(Decimal::new(1050, 2));
        assert_eq!(price.display_or_na(), "$10.50");
    }
}
