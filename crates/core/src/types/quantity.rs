//! Line-item quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Zero or negative quantities are not representable.
    #[error("quantity must be at least 1, got {0}")]
    BelowMinimum(i64),

    /// The value does not fit in a quantity.
    #[error("quantity is too large: {0}")]
    TooLarge(i64),

    /// The input is not a whole number.
    #[error("quantity must be a whole number, got '{0}'")]
    Invalid(String),
}

/// A cart-line quantity, always at least 1.
///
/// Zero or negative input is rejected at construction rather than being
/// interpreted as "remove the line"; removal is a separate cart operation.
///
/// ```
/// use vitrine_core::Quantity;
///
/// assert_eq!(Quantity::new(3).unwrap().get(), 3);
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::new(-2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// The smallest quantity.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Largest quantity selectable with the product page stepper.
    pub const MAX_SELECTABLE: u32 = 10;

    /// Create a quantity from a signed value.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::BelowMinimum`] for values below 1 and
    /// [`QuantityError::TooLarge`] for values above `u32::MAX`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::BelowMinimum(value));
        }
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(QuantityError::TooLarge(value))
    }

    /// Returns the quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Quantity plus `other`, or `None` past `u32::MAX`.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0.get()) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }

    /// Quantity plus one, or `None` past `u32::MAX`.
    #[must_use]
    pub const fn incremented(self) -> Option<Self> {
        self.checked_add(Self::ONE)
    }

    /// Quantity minus one, never going below 1.
    #[must_use]
    pub fn decremented(self) -> Self {
        NonZeroU32::new(self.0.get() - 1).map_or(Self::ONE, Self)
    }

    /// Apply a stepper change, keeping the result within
    /// `1..=MAX_SELECTABLE`. Out-of-range results leave the quantity unchanged.
    #[must_use]
    pub fn stepped(self, change: i64) -> Self {
        let next = i64::from(self.get()).saturating_add(change);
        if (1..=i64::from(Self::MAX_SELECTABLE)).contains(&next) {
            Self::new(next).unwrap_or(self)
        } else {
            self
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| QuantityError::Invalid(s.to_string()))?;
        Self::new(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn q(n: i64) -> Quantity {
        Quantity::new(n).unwrap()
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert_eq!(Quantity::new(0), Err(QuantityError::BelowMinimum(0)));
        assert_eq!(Quantity::new(-3), Err(QuantityError::BelowMinimum(-3)));
    }

    #[test]
    fn test_rejects_too_large() {
        assert_eq!(
            Quantity::new(5_000_000_000),
            Err(QuantityError::TooLarge(5_000_000_000))
        );
        assert_eq!(Quantity::new(i64::from(u32::MAX)).map(Quantity::get), Ok(u32::MAX));
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(q(2).checked_add(q(3)), Some(q(5)));
        assert_eq!(q(4).incremented(), Some(q(5)));

        let max = Quantity::new(i64::from(u32::MAX)).unwrap();
        assert_eq!(max.checked_add(Quantity::ONE), None);
        assert_eq!(max.incremented(), None);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        assert_eq!(q(2).decremented(), q(1));
        assert_eq!(q(1).decremented(), q(1));
    }

    #[test]
    fn test_stepper_stays_in_range() {
        assert_eq!(q(1).stepped(-1), q(1));
        assert_eq!(q(1).stepped(1), q(2));
        assert_eq!(q(10).stepped(1), q(10));
        assert_eq!(q(9).stepped(1), q(10));
    }

    #[test]
    fn test_serde_validates() {
        assert_eq!(serde_json::from_str::<Quantity>("4").unwrap(), q(4));
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-1").is_err());
        assert_eq!(serde_json::to_string(&q(7)).unwrap(), "7");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("3".parse::<Quantity>(), Ok(q(3)));
        assert_eq!(" 3 ".parse::<Quantity>(), Ok(q(3)));
        assert_eq!(
            "abc".parse::<Quantity>(),
            Err(QuantityError::Invalid("abc".to_string()))
        );
        assert_eq!("0".parse::<Quantity>(), Err(QuantityError::BelowMinimum(0)));
    }
}
