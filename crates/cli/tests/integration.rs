//! Integration tests for the CLI commands
//!
//! These tests write account snapshots and configs to a temp directory and
//! run the commands the binary dispatches to.

use chrono::{TimeZone, Utc};
use finguard_cli::{commands, AppContext};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ACCOUNT: &str = r#"{
    "balance": "100",
    "history": [
        { "type": "sent", "amount": "5", "to": "GBOB", "timestamp": "2024-03-10T10:00:00Z" },
        { "type": "sent", "amount": "5", "to": "GBOB", "timestamp": "2024-03-10T08:00:00Z" },
        { "type": "received", "amount": "110", "from": "GFAUCET", "timestamp": "2024-03-01T08:00:00Z" }
    ]
}"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

#[test]
fn test_evaluate_low_risk() {
    let temp_dir = TempDir::new().unwrap();
    let account = write(temp_dir.path(), "account.json", ACCOUNT);
    let ctx = AppContext::new(None).unwrap();

    let output = commands::evaluate(&ctx, &account, "10", "GBOB", Some("lunch"), now()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["action"], "proceed");
    assert_eq!(value["assessment"]["level"], "low");
    assert_eq!(value["assessment"]["should_block"], false);
    assert_eq!(value["memo"], "lunch");
}

#[test]
fn test_evaluate_blocking_transfer() {
    let temp_dir = TempDir::new().unwrap();
    let account = write(temp_dir.path(), "account.json", ACCOUNT);
    let ctx = AppContext::new(None).unwrap();

    let output = commands::evaluate(&ctx, &account, "85", "GNEW", None, now()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["action"], "block");
    assert_eq!(value["assessment"]["level"], "high");
    assert_eq!(value["assessment"]["reasons"].as_array().unwrap().len(), 3);
}

#[test]
fn test_evaluate_invalid_amount_fails_closed() {
    let temp_dir = TempDir::new().unwrap();
    let account = write(temp_dir.path(), "account.json", ACCOUNT);
    let ctx = AppContext::new(None).unwrap();

    for amount in ["abc", "-5", "0"] {
        let err = commands::evaluate(&ctx, &account, amount, "GBOB", None, now()).unwrap_err();
        assert!(err.to_string().contains("Invalid input"), "{amount}: {err}");
    }
}

#[test]
fn test_evaluate_negative_balance_fails() {
    let temp_dir = TempDir::new().unwrap();
    let account = write(temp_dir.path(), "account.json", r#"{ "balance": "-1" }"#);
    let ctx = AppContext::new(None).unwrap();

    assert!(commands::evaluate(&ctx, &account, "1", "GBOB", None, now()).is_err());
}

#[test]
fn test_config_file_changes_thresholds() {
    let temp_dir = TempDir::new().unwrap();
    let account = write(temp_dir.path(), "account.json", ACCOUNT);
    let config = write(
        temp_dir.path(),
        "risk.json",
        r#"{ "velocity_threshold": 2 }"#,
    );
    let ctx = AppContext::new(Some(&config)).unwrap();

    let output = commands::evaluate(&ctx, &account, "10", "GBOB", None, now()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["action"], "confirm");
    assert_eq!(value["assessment"]["rules_triggered"][0], "VELOCITY");
}

#[test]
fn test_invalid_config_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = write(
        temp_dir.path(),
        "risk.json",
        r#"{ "warn_fraction": "0.9", "block_fraction": "0.5" }"#,
    );

    assert!(AppContext::new(Some(&config)).is_err());
}

#[test]
fn test_stats_command() {
    let temp_dir = TempDir::new().unwrap();
    let account = write(temp_dir.path(), "account.json", ACCOUNT);

    let output = commands::stats(&account).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["total_sent"], "10");
    assert_eq!(value["total_received"], "110");
    assert_eq!(value["transaction_count"], 3);
    assert_eq!(value["last_activity"], "2024-03-10T10:00:00Z");
}

#[test]
fn test_tips_numbered() {
    let tips = commands::tips();
    assert!(tips.starts_with("1. Always double-check"));
    assert_eq!(tips.lines().count(), 8);
}

#[test]
fn test_config_command_prints_defaults() {
    let ctx = AppContext::new(None).unwrap();
    let output = commands::config(&ctx).unwrap();
    assert!(output.contains("\"block_fraction\": \"0.8\""));
}
