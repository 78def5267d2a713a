//! Risk levels with a total order
//!
//! `Low < Medium < High`. Combining the severities of several fired rules is
//! `max()`, so the outcome does not depend on rule order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum_macros::{Display, EnumString};

/// Risk classification of a proposed transfer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, Default,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Nothing suspicious (floor when no rule fires)
    #[default]
    Low = 1,
    /// Warn the user before proceeding
    Medium = 2,
    /// Block unless explicitly overridden
    High = 3,
}

impl RiskLevel {
    /// Combine severities: the most severe wins, `Low` when empty
    pub fn combine(levels: impl IntoIterator<Item = RiskLevel>) -> RiskLevel {
        levels.into_iter().max().unwrap_or_default()
    }

    pub fn is_elevated(&self) -> bool {
        *self > RiskLevel::Low
    }
}

impl PartialOrd for RiskLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RiskLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}
