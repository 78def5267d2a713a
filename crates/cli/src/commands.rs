//! CLI commands
//!
//! Each command returns the text to print so it can be tested without
//! capturing stdout.

use chrono::{DateTime, Utc};
use finguard_core::WalletStats;
use finguard_risk::security_tips;
use serde_json::json;
use std::path::Path;

use crate::context::AppContext;

/// Score a proposed transfer against the account snapshot at `account_path`
///
/// Invalid input is an error: the caller must not treat a missing assessment
/// as low risk.
pub fn evaluate(
    ctx: &AppContext,
    account_path: &Path,
    amount: &str,
    recipient: &str,
    memo: Option<&str>,
    now: DateTime<Utc>,
) -> Result<String, anyhow::Error> {
    let account = AppContext::load_account(account_path)?;
    let assessment = ctx
        .engine
        .evaluate_raw(&account, amount, recipient, memo, now)?;

    let output = json!({
        "recipient": recipient,
        "amount": amount.trim(),
        "memo": memo,
        "evaluated_at": now,
        "action": assessment.action(),
        "assessment": assessment,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Summarise the history of the account snapshot at `account_path`
pub fn stats(account_path: &Path) -> Result<String, anyhow::Error> {
    let account = AppContext::load_account(account_path)?;
    let stats = WalletStats::from_history(&account.history);
    Ok(serde_json::to_string_pretty(&stats)?)
}

/// Numbered list of security tips
pub fn tips() -> String {
    security_tips()
        .iter()
        .enumerate()
        .map(|(i, tip)| format!("{}. {}", i + 1, tip))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The effective configuration as JSON
pub fn config(ctx: &AppContext) -> Result<String, anyhow::Error> {
    Ok(serde_json::to_string_pretty(&ctx.config)?)
}
