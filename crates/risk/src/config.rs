//! Risk configuration with overridable thresholds
//!
//! Every threshold of the default rule set is a named field here rather than a
//! literal in rule code. Missing fields fall back to the reference defaults, so
//! a partial JSON file only needs to name what it changes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::ConfigError;

/// Configuration for the default rule set and the optional rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskConfig {
    // === Balance fractions ===
    /// Fraction of the balance above which a transfer is a warning (medium)
    #[serde(default = "default_warn_fraction")]
    pub warn_fraction: Decimal,

    /// Fraction of the balance above which a transfer is blocked (high)
    #[serde(default = "default_block_fraction")]
    pub block_fraction: Decimal,

    // === Velocity ===
    /// Number of recent sends that triggers the velocity warning
    #[serde(default = "default_velocity_threshold")]
    pub velocity_threshold: u32,

    /// Look-back window for the velocity rule (in hours)
    #[serde(default = "default_velocity_window_hours")]
    pub velocity_window_hours: u32,

    // === Recipients ===
    /// How recipient identifiers are compared against history and denylist
    #[serde(default)]
    pub recipient_match: RecipientMatch,

    /// Recipients that are always blocked (high). Empty disables the rule.
    #[serde(default)]
    pub denylist: Vec<String>,

    // === Optional rules ===
    /// Absolute amount that triggers a warning regardless of balance
    #[serde(default)]
    pub large_amount_threshold: Option<Decimal>,

    /// Block transfers larger than the whole balance
    #[serde(default)]
    pub block_on_insufficient_balance: bool,
}

/// Recipient comparison policy
///
/// Identifiers are compared exactly by default. Normalization is the
/// caller's choice, since some address formats are case-sensitive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, Default,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RecipientMatch {
    /// Byte-for-byte equality
    #[default]
    Exact,
    /// Equal after Unicode lowercasing
    CaseInsensitive,
    /// Equal after trimming surrounding whitespace
    Trimmed,
    /// Trimmed and case-insensitive
    Normalized,
}

impl RecipientMatch {
    /// Compare two recipient identifiers under this policy
    pub fn matches(&self, a: &str, b: &str) -> bool {
        match self {
            RecipientMatch::Exact => a == b,
            RecipientMatch::CaseInsensitive => a.to_lowercase() == b.to_lowercase(),
            RecipientMatch::Trimmed => a.trim() == b.trim(),
            RecipientMatch::Normalized => a.trim().to_lowercase() == b.trim().to_lowercase(),
        }
    }
}

// Default value functions for serde
fn default_warn_fraction() -> Decimal {
    Decimal::new(5, 1)
}

fn default_block_fraction() -> Decimal {
    Decimal::new(8, 1)
}

fn default_velocity_threshold() -> u32 {
    3
}

fn default_velocity_window_hours() -> u32 {
    24
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            warn_fraction: default_warn_fraction(),
            block_fraction: default_block_fraction(),
            velocity_threshold: default_velocity_threshold(),
            velocity_window_hours: default_velocity_window_hours(),
            recipient_match: RecipientMatch::default(),
            denylist: Vec::new(),
            large_amount_threshold: None,
            block_on_insufficient_balance: false,
        }
    }
}

impl RiskConfig {
    /// Load configuration from a JSON file and validate it
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds are coherent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.warn_fraction < Decimal::ZERO || self.block_fraction < Decimal::ZERO {
            return Err(ConfigError::invalid("balance fractions must not be negative"));
        }
        if self.warn_fraction > self.block_fraction {
            return Err(ConfigError::invalid(format!(
                "warn_fraction {} exceeds block_fraction {}",
                self.warn_fraction, self.block_fraction
            )));
        }
        if self.velocity_threshold == 0 {
            return Err(ConfigError::invalid("velocity_threshold must be at least 1"));
        }
        if self.velocity_window_hours == 0 {
            return Err(ConfigError::invalid("velocity_window_hours must be at least 1"));
        }
        if let Some(threshold) = self.large_amount_threshold {
            if threshold <= Decimal::ZERO {
                return Err(ConfigError::invalid(
                    "large_amount_threshold must be greater than zero",
                ));
            }
        }
        Ok(())
    }

    /// Get the velocity window as chrono Duration
    pub fn velocity_window(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.velocity_window_hours))
    }
}
