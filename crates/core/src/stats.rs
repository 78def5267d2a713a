//! Wallet statistics derived from an account history

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::{Direction, Transaction};

/// Totals and activity summary over a transaction history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletStats {
    pub total_sent: Decimal,
    pub total_received: Decimal,
    /// Latest timestamp in the history, whatever its position
    pub last_activity: Option<DateTime<Utc>>,
    pub transaction_count: usize,
}

impl WalletStats {
    /// Compute statistics over `history` (any order)
    pub fn from_history(history: &[Transaction]) -> Self {
        history.iter().fold(Self::default(), |mut stats, tx| {
            match tx.direction {
                Direction::Sent => stats.total_sent += tx.amount.value(),
                Direction::Received => stats.total_received += tx.amount.value(),
            }
            stats.last_activity = stats.last_activity.max(Some(tx.timestamp));
            stats.transaction_count += 1;
            stats
        })
    }
}
