//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative unit price in the store currency.
///
/// Serializes as a decimal string (`"299.90"`) so persisted carts never lose
/// precision to floating point. Deserialization rejects negative amounts, which
/// lets a tampered cart snapshot fail validation at the storage boundary.
///
/// ```
/// use rust_decimal::Decimal;
/// use vitrine_core::Price;
///
/// let price = Price::new(Decimal::new(29990, 2)).unwrap();
/// assert_eq!(price.to_string(), "R$ 299,90");
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a line quantity, or `None` if the result does not fit in a
    /// `Decimal`.
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Add two prices, or `None` if the sum does not fit in a `Decimal`.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Format for display using the store currency (e.g. `R$ 1.299,90`).
    #[must_use]
    pub fn display(&self) -> String {
        CurrencyCode::BRL.format(self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Currency symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// Format an amount with two decimal places using the currency's
    /// conventional separators.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp(2);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let fixed = format!("{:.2}", rounded.abs());
        let (units, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let (group_sep, decimal_sep) = match self {
            Self::BRL | Self::EUR => ('.', ','),
            Self::USD => (',', '.'),
        };

        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, ch) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(group_sep);
            }
            grouped.push(ch);
        }

        let sign = if negative { "-" } else { "" };
        match self {
            Self::BRL => format!("{sign}{} {grouped}{decimal_sep}{cents}", self.symbol()),
            Self::USD | Self::EUR => format!("{sign}{}{grouped}{decimal_sep}{cents}", self.symbol()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        assert_eq!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative(Decimal::new(-1, 2)))
        );
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_brl_formatting() {
        assert_eq!(Price::new(Decimal::new(29990, 2)).unwrap().display(), "R$ 299,90");
        assert_eq!(Price::new(Decimal::new(129_990, 2)).unwrap().display(), "R$ 1.299,90");
        assert_eq!(Price::ZERO.display(), "R$ 0,00");
        assert_eq!(
            Price::new(Decimal::new(1_234_567_891, 2)).unwrap().display(),
            "R$ 12.345.678,91"
        );
    }

    #[test]
    fn test_usd_formatting() {
        assert_eq!(CurrencyCode::USD.format(Decimal::new(129_990, 2)), "$1,299.90");
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Price::new(Decimal::new(10, 0)).unwrap();
        let total = price
            .checked_times(2)
            .and_then(|line| line.checked_add(price))
            .unwrap();
        assert_eq!(total.amount(), Decimal::new(30, 0));
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        let max = Price::new(Decimal::MAX).unwrap();
        assert_eq!(max.checked_times(1), Some(max));
        assert_eq!(max.checked_times(2), None);
        assert_eq!(max.checked_add(Price::ZERO), Some(max));
        assert_eq!(max.checked_add(max), None);
    }

    #[test]
    fn test_serde_string_roundtrip_and_validation() {
        let price = Price::new(Decimal::new(29990, 2)).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"299.90\"");

        let negative: Result<Price, _> = serde_json::from_str("\"-5\"");
        assert!(negative.is_err());
    }
}
