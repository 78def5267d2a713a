//! Risk engine implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use finguard_core::{Account, Amount, Balance, ProposedTransaction};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::assessment::RiskAssessment;
use crate::error::RiskError;
use crate::rule::RuleContext;
use crate::ruleset::RuleSet;

/// Score `tx` against `account` under `rules`
///
/// Validates the balance (non-negative) and amount (positive) first; invalid
/// input yields `RiskError::InvalidInput` and no assessment. Every rule then
/// runs once, in order, with no short-circuit. The level is the maximum
/// severity among fired rules, `Low` if none fired.
pub fn evaluate(
    account: &Account,
    tx: &ProposedTransaction,
    rules: &RuleSet,
    now: DateTime<Utc>,
) -> Result<RiskAssessment, RiskError> {
    let (amount, balance) = validate(account, tx).inspect_err(|e| {
        tracing::warn!(recipient = %tx.recipient, error = %e, "Rejected risk evaluation input");
    })?;

    let ctx = RuleContext {
        account,
        tx,
        amount,
        balance,
        now,
    };

    let mut assessment = RiskAssessment::low();
    for rule in rules.iter() {
        if let Some(hit) = rule.evaluate(&ctx) {
            tracing::debug!(
                rule = rule.id(),
                severity = %hit.severity,
                "Risk rule fired"
            );
            assessment.record(rule.id(), hit);
        }
    }

    tracing::debug!(
        rule_set = rules.name(),
        recipient = %tx.recipient,
        amount = %amount,
        memo = tx.memo.as_deref().unwrap_or_default(),
        level = %assessment.level(),
        fired = assessment.reasons().len(),
        "Risk evaluation completed"
    );
    if assessment.should_block() {
        tracing::warn!(
            recipient = %tx.recipient,
            rules = ?assessment.rules_triggered(),
            "Transfer should be blocked"
        );
    }

    Ok(assessment)
}

fn validate(account: &Account, tx: &ProposedTransaction) -> Result<(Amount, Balance), RiskError> {
    let balance = Balance::new(account.balance)?;
    let amount = Amount::new(tx.amount)?;
    Ok((amount, balance))
}

/// Score independent proposals against one account snapshot
///
/// Results keep the order of `txs`. Each proposal is evaluated on its own;
/// an invalid one does not affect the others.
pub fn evaluate_batch(
    account: &Account,
    txs: &[ProposedTransaction],
    rules: &RuleSet,
    now: DateTime<Utc>,
) -> Vec<Result<RiskAssessment, RiskError>> {
    #[cfg(feature = "parallel")]
    let txs = txs.par_iter();
    #[cfg(not(feature = "parallel"))]
    let txs = txs.iter();

    txs.map(|tx| evaluate(account, tx, rules, now)).collect()
}

/// Risk Engine - Pre-transfer gatekeeper
///
/// Owns a shared, immutable [`RuleSet`]. Cloning is cheap and every clone can
/// evaluate concurrently without coordination.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    rules: Arc<RuleSet>,
}

impl RiskEngine {
    /// Create an engine over `rules`
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Get reference to the rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// See [`evaluate`]
    pub fn evaluate(
        &self,
        account: &Account,
        tx: &ProposedTransaction,
        now: DateTime<Utc>,
    ) -> Result<RiskAssessment, RiskError> {
        evaluate(account, tx, &self.rules, now)
    }

    /// Evaluate a transfer whose amount is still in caller text form
    ///
    /// Non-numeric text fails with `InvalidInput` just like a non-positive
    /// amount.
    pub fn evaluate_raw(
        &self,
        account: &Account,
        amount: &str,
        recipient: &str,
        memo: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<RiskAssessment, RiskError> {
        let mut tx = ProposedTransaction::parse(amount, recipient)?;
        tx.memo = memo.map(str::to_string);
        self.evaluate(account, &tx, now)
    }

    /// See [`evaluate_batch`]
    pub fn evaluate_batch(
        &self,
        account: &Account,
        txs: &[ProposedTransaction],
        now: DateTime<Utc>,
    ) -> Vec<Result<RiskAssessment, RiskError>> {
        evaluate_batch(account, txs, &self.rules, now)
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(RuleSet::default_rules())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::RiskLevel;
    use crate::rule::{Rule, RuleHit};
    use crate::rules::{LARGE_FRACTION, UNKNOWN_RECIPIENT, VERY_LARGE_FRACTION};
    use chrono::TimeZone;
    use finguard_core::{InputError, Transaction};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn known_account(balance: Decimal) -> Account {
        Account::new(balance).with_history(vec![Transaction::sent(
            Amount::new(dec!(1)).unwrap(),
            "GBOB",
            now() - chrono::Duration::days(30),
        )])
    }

    #[test]
    fn test_low_risk_transfer() {
        let engine = RiskEngine::default();
        let tx = ProposedTransaction::new(dec!(40), "GBOB");

        let assessment = engine.evaluate(&known_account(dec!(100)), &tx, now()).unwrap();
        assert_eq!(assessment.level(), RiskLevel::Low);
        assert!(assessment.reasons().is_empty());
    }

    #[test]
    fn test_reasons_in_rule_order() {
        let engine = RiskEngine::default();
        let tx = ProposedTransaction::new(dec!(90), "GNEW");

        let assessment = engine.evaluate(&known_account(dec!(100)), &tx, now()).unwrap();
        assert_eq!(assessment.level(), RiskLevel::High);
        assert_eq!(
            assessment.rules_triggered(),
            &[LARGE_FRACTION, VERY_LARGE_FRACTION, UNKNOWN_RECIPIENT].map(String::from)
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        let engine = RiskEngine::default();
        let tx = ProposedTransaction::new(dec!(-5), "GBOB");

        let result = engine.evaluate(&known_account(dec!(100)), &tx, now());
        assert_eq!(
            result,
            Err(RiskError::InvalidInput(InputError::NonPositiveAmount(dec!(-5))))
        );
    }

    #[test]
    fn test_zero_amount_rejected() {
        let engine = RiskEngine::default();
        let tx = ProposedTransaction::new(Decimal::ZERO, "GBOB");
        assert!(engine.evaluate(&known_account(dec!(100)), &tx, now()).is_err());
    }

    #[test]
    fn test_negative_balance_rejected() {
        let engine = RiskEngine::default();
        let tx = ProposedTransaction::new(dec!(1), "GBOB");

        let result = engine.evaluate(&known_account(dec!(-1)), &tx, now());
        assert!(matches!(
            result,
            Err(RiskError::InvalidInput(InputError::NegativeBalance(_)))
        ));
    }

    #[test]
    fn test_evaluate_raw_non_numeric() {
        let engine = RiskEngine::default();
        let result = engine.evaluate_raw(&known_account(dec!(100)), "abc", "GBOB", None, now());
        assert!(matches!(
            result,
            Err(RiskError::InvalidInput(InputError::Malformed { .. }))
        ));
    }

    #[test]
    fn test_evaluate_raw_valid() {
        let engine = RiskEngine::default();
        let assessment = engine
            .evaluate_raw(&known_account(dec!(100)), "10", "GBOB", Some("coffee"), now())
            .unwrap();
        assert_eq!(assessment.level(), RiskLevel::Low);
    }

    struct CountingRule {
        calls: Arc<AtomicUsize>,
    }

    impl Rule for CountingRule {
        fn id(&self) -> &str {
            "COUNTING"
        }

        fn evaluate(&self, _ctx: &RuleContext<'_>) -> Option<RuleHit> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    #[test]
    fn test_every_rule_runs_once_after_high() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rules = RuleSet::builder("counting")
            .extend(&RuleSet::default_rules())
            .rule(CountingRule {
                calls: Arc::clone(&calls),
            })
            .build()
            .unwrap();

        let tx = ProposedTransaction::new(dec!(95), "GBOB");
        let assessment = evaluate(&known_account(dec!(100)), &tx, &rules, now()).unwrap();

        assert!(assessment.should_block());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_input_runs_no_rules() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rules = RuleSet::builder("counting")
            .rule(CountingRule {
                calls: Arc::clone(&calls),
            })
            .build()
            .unwrap();

        let tx = ProposedTransaction::new(dec!(-1), "GBOB");
        assert!(evaluate(&known_account(dec!(100)), &tx, &rules, now()).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_rule_set_is_low() {
        let rules = RuleSet::builder("empty").build().unwrap();
        let tx = ProposedTransaction::new(dec!(1000), "GANY");

        let assessment = evaluate(&Account::new(dec!(1)), &tx, &rules, now()).unwrap();
        assert_eq!(assessment, RiskAssessment::low());
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_errors() {
        let engine = RiskEngine::default();
        let txs = vec![
            ProposedTransaction::new(dec!(10), "GBOB"),
            ProposedTransaction::new(dec!(-3), "GBOB"),
            ProposedTransaction::new(dec!(85), "GBOB"),
        ];

        let results = engine.evaluate_batch(&known_account(dec!(100)), &txs, now());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().level(), RiskLevel::Low);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().level(), RiskLevel::High);
    }

    #[test]
    fn test_engine_clone_shares_rules() {
        let engine = RiskEngine::default();
        let clone = engine.clone();
        assert_eq!(engine.rules().rule_ids(), clone.rules().rule_ids());
    }
}
