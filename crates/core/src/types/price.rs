//! Type-safe price representation using decimal arithmetic.
//!
//! Razorpay settles in paise (the smallest INR unit), the backend API
//! returns decimal strings, and templates want "₹499.00". This type owns
//! all three representations so handlers never do float math on money.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
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

    /// Create a price from an amount in the smallest currency unit
    /// (paise for INR, cents for USD).
    #[must_use]
    pub fn from_minor_units(minor: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(minor, 2),
            currency_code,
        }
    }

    /// Amount in the smallest currency unit, as Razorpay expects it.
    ///
    /// Truncates sub-paise precision; the backend never produces any.
    #[must_use]
    pub fn as_minor_units(&self) -> i64 {
        (self.amount * Decimal::ONE_HUNDRED)
            .trunc()
            .to_i64()
            .unwrap_or(0)
    }

    /// Format for display (e.g., "₹499.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
///
/// INR is the default; the marketplace settles in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "\u{20b9}",
            Self::USD => "$",
            Self::EUR => "\u{20ac}",
        }
    }

    /// ISO 4217 code as a string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_units() {
        let price = Price::from_minor_units(49_900, CurrencyCode::INR);
        assert_eq!(price.amount, Decimal::new(49_900, 2));
        assert_eq!(price.as_minor_units(), 49_900);
    }

    #[test]
    fn test_as_minor_units_truncates() {
        // 499.999 rupees -> 49999 paise, no rounding up
        let price = Price::new(Decimal::new(499_999, 3), CurrencyCode::INR);
        assert_eq!(price.as_minor_units(), 49_999);
    }

    #[test]
    fn test_display_inr() {
        let price = Price::from_minor_units(49_900, CurrencyCode::INR);
        assert_eq!(price.display(), "\u{20b9}499.00");
    }

    #[test]
    fn test_currency_code() {
        assert_eq!(CurrencyCode::INR.code(), "INR");
        assert_eq!(CurrencyCode::default(), CurrencyCode::INR);
    }
}
