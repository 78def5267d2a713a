//! Account snapshot and transaction records
//!
//! These are supplied by the caller from whatever storage it uses. The history
//! is nominally most-recent-first, but timestamps come from client clocks and
//! may be out of order, so nothing here assumes sorted input.
//!
//! `Account::balance` and `ProposedTransaction::amount` hold the caller's raw
//! decimals; the risk engine validates them (see [`Balance`] and [`Amount`])
//! before any rule runs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::amount::{Amount, Balance};
use crate::error::InputError;

/// Direction of a historical transfer, from the account holder's view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Funds left the account
    Sent,
    /// Funds arrived in the account
    Received,
}

/// A historical transaction record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(alias = "type")]
    pub direction: Direction,

    pub amount: Amount,

    /// Opaque address or account reference of the other party
    #[serde(alias = "to", alias = "from")]
    pub counterparty: String,

    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl Transaction {
    /// Create a new transaction record
    pub fn new(
        direction: Direction,
        amount: Amount,
        counterparty: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            direction,
            amount,
            counterparty: counterparty.into(),
            timestamp,
            memo: None,
        }
    }

    /// Record of funds sent to `to`
    pub fn sent(amount: Amount, to: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(Direction::Sent, amount, to, timestamp)
    }

    /// Record of funds received from `from`
    pub fn received(amount: Amount, from: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(Direction::Received, amount, from, timestamp)
    }

    /// Attach a memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn is_sent(&self) -> bool {
        self.direction == Direction::Sent
    }
}

/// Read-only account snapshot: current balance plus history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Must be non-negative; checked at evaluation time
    pub balance: Decimal,

    /// Most-recent-first by convention; not guaranteed
    #[serde(default)]
    pub history: Vec<Transaction>,
}

impl Account {
    /// Create an account with an empty history
    pub fn new(balance: Decimal) -> Self {
        Self {
            balance,
            history: Vec::new(),
        }
    }

    /// Parse the balance from a decimal string
    pub fn parse(balance: &str) -> Result<Self, InputError> {
        Ok(Self::new(Balance::parse(balance)?.value()))
    }

    /// Set the transaction history
    pub fn with_history(mut self, history: Vec<Transaction>) -> Self {
        self.history = history;
        self
    }

    /// Iterate over outgoing transfers
    pub fn sent(&self) -> impl Iterator<Item = &Transaction> {
        self.history.iter().filter(|tx| tx.is_sent())
    }
}

/// A transfer the account holder is about to make
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedTransaction {
    /// Must be greater than zero; checked at evaluation time
    pub amount: Decimal,

    pub recipient: String,

    /// Not scored; carried through for audit logging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl ProposedTransaction {
    pub fn new(amount: Decimal, recipient: impl Into<String>) -> Self {
        Self {
            amount,
            recipient: recipient.into(),
            memo: None,
        }
    }

    /// Build from a raw amount string, failing on anything that is not a
    /// positive decimal
    pub fn parse(amount: &str, recipient: impl Into<String>) -> Result<Self, InputError> {
        Ok(Self::new(Amount::parse(amount)?.value(), recipient))
    }

    /// Attach a memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }
}
