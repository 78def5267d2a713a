//! Rule trait - the predicate contract every risk rule implements

use chrono::{DateTime, Utc};
use finguard_core::{Account, Amount, Balance, ProposedTransaction};

use crate::level::RiskLevel;

/// Inputs visible to a rule
///
/// `amount` and `balance` are the validated forms of `tx.amount` and
/// `account.balance`; rules never see invalid values.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub account: &'a Account,
    pub tx: &'a ProposedTransaction,
    pub amount: Amount,
    pub balance: Balance,
    /// Evaluation instant, supplied by the caller
    pub now: DateTime<Utc>,
}

/// What a rule emits when it fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub severity: RiskLevel,
    pub reason: String,
}

impl RuleHit {
    pub fn new(severity: RiskLevel, reason: impl Into<String>) -> Self {
        Self {
            severity,
            reason: reason.into(),
        }
    }
}

/// A self-contained risk rule
///
/// Rules are pure: the same context must always produce the same result, and
/// a rule must not read clocks, randomness, or shared mutable state. New
/// policies are added by implementing this trait and registering the rule in
/// a [`crate::RuleSet`]; the evaluation loop never changes.
pub trait Rule: Send + Sync {
    /// Stable identifier, reported in `RiskAssessment::rules_triggered`
    fn id(&self) -> &str;

    /// Return `Some` when the rule fires
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit>;
}
