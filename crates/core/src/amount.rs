//! Amount and Balance - Decimal wrappers for monetary values
//!
//! Monetary values never touch binary floating point. Both types are enforced
//! at construction and on deserialization:
//! - `Amount` is strictly positive (a transfer of zero is not a transfer)
//! - `Balance` is non-negative

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, InputError> {
    Decimal::from_str(raw.trim()).map_err(|_| InputError::malformed(field, raw))
}

/// A strictly positive decimal amount for a transfer.
///
/// # Invariant
/// The inner value is always > 0. This is enforced by the constructor.
///
/// # Example
/// ```
/// use finguard_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::new(Decimal::new(100, 0)).unwrap();
/// assert_eq!(amount.value(), Decimal::new(100, 0));
///
/// // Zero, negative and non-numeric amounts are rejected
/// assert!(Amount::new(Decimal::ZERO).is_err());
/// assert!(Amount::parse("-5").is_err());
/// assert!(Amount::parse("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Create a new Amount from a Decimal.
    ///
    /// Returns an error if the value is zero or negative.
    pub fn new(value: Decimal) -> Result<Self, InputError> {
        if value <= Decimal::ZERO {
            Err(InputError::NonPositiveAmount(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Parse an Amount from its decimal string form.
    ///
    /// Surrounding whitespace is ignored. `NaN`, empty strings and anything
    /// that is not a plain decimal number are rejected.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        Self::new(parse_decimal("amount", raw)?)
    }

    /// Get the inner Decimal value
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = InputError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// A non-negative account balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Balance(Decimal);

impl Balance {
    /// Zero balance constant
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new Balance, rejecting negative values
    pub fn new(value: Decimal) -> Result<Self, InputError> {
        if value < Decimal::ZERO {
            Err(InputError::NegativeBalance(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Parse a Balance from its decimal string form
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        Self::new(parse_decimal("balance", raw)?)
    }

    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Balance {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Balance {
    type Error = InputError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Balance> for Decimal {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_positive() {
        let amount = Amount::new(dec!(100)).unwrap();
        assert_eq!(amount.value(), dec!(100));
    }

    #[test]
    fn test_amount_zero_rejected() {
        let result = Amount::new(Decimal::ZERO);
        assert!(matches!(result, Err(InputError::NonPositiveAmount(_))));
    }

    #[test]
    fn test_amount_negative_rejected() {
        let result = Amount::parse("-5");
        assert_eq!(result, Err(InputError::NonPositiveAmount(dec!(-5))));
    }

    #[test]
    fn test_amount_non_numeric_rejected() {
        for raw in ["abc", "", "NaN", "1.2.3", "12abc"] {
            let result = Amount::parse(raw);
            assert!(
                matches!(result, Err(InputError::Malformed { field: "amount", .. })),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_amount_parse_trims_whitespace() {
        let amount: Amount = " 12.5 ".parse().unwrap();
        assert_eq!(amount.value(), dec!(12.5));
    }

    #[test]
    fn test_balance_zero_allowed() {
        let balance = Balance::parse("0").unwrap();
        assert!(balance.is_zero());
    }

    #[test]
    fn test_balance_negative_rejected() {
        let result = Balance::new(dec!(-0.0000001));
        assert!(matches!(result, Err(InputError::NegativeBalance(_))));
    }

    #[test]
    fn test_balance_malformed_names_field() {
        let result = Balance::parse("lots");
        assert_eq!(result, Err(InputError::malformed("balance", "lots")));
    }

    #[test]
    fn test_serde_validates_on_deserialize() {
        let amount: Amount = serde_json::from_str("\"123.45\"").unwrap();
        assert_eq!(amount.value(), dec!(123.45));

        assert!(serde_json::from_str::<Amount>("\"0\"").is_err());
        assert!(serde_json::from_str::<Amount>("\"abc\"").is_err());
        assert!(serde_json::from_str::<Balance>("\"-1\"").is_err());
    }
}
