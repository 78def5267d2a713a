//! Risk engine errors

use finguard_core::InputError;
use thiserror::Error;

/// Errors from risk evaluation
///
/// The engine performs no I/O, so malformed input is the only way an
/// evaluation can fail. Callers must treat it as a rejection, never as low risk.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiskError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

/// Errors from loading or validating a [`crate::RiskConfig`] or building a
/// [`crate::RuleSet`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ConfigError::Invalid(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_invalid_input_from_input_error() {
        let err: RiskError = InputError::NonPositiveAmount(dec!(-5)).into();
        assert!(matches!(err, RiskError::InvalidInput(_)));
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn test_config_invalid_message() {
        let err = ConfigError::invalid("warn_fraction must not be negative");
        assert_eq!(
            err.to_string(),
            "Invalid config: warn_fraction must not be negative"
        );
    }
}
