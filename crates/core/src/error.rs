//! Input validation errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when caller-supplied values fail validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Amount must be greater than zero: {0}")]
    NonPositiveAmount(Decimal),

    #[error("Balance cannot be negative: {0}")]
    NegativeBalance(Decimal),

    #[error("Malformed {field}: {value:?} is not a decimal number")]
    Malformed { field: &'static str, value: String },
}

impl InputError {
    /// Create a malformed-value error
    pub fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        InputError::Malformed {
            field,
            value: value.into(),
        }
    }
}
