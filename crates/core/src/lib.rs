//! FinGuard Core - Domain types
//!
//! This crate contains the value types shared by the risk engine and its callers:
//! - `Amount`: Strictly positive decimal for transfer amounts
//! - `Balance`: Non-negative decimal for account balances
//! - `Account` / `Transaction`: Read-only account snapshot with history
//! - `ProposedTransaction`: The transfer being scored
//! - `WalletStats`: Aggregates over an account history

pub mod account;
pub mod amount;
pub mod error;
pub mod stats;

pub use account::{Account, Direction, ProposedTransaction, Transaction};
pub use amount::{Amount, Balance};
pub use error::InputError;
pub use stats::WalletStats;
