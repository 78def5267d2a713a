//! Application context - wires configuration and engine together

use anyhow::Context;
use finguard_core::Account;
use finguard_risk::{RiskConfig, RiskEngine, RuleSet};
use std::path::Path;

/// Application context
pub struct AppContext {
    pub config: RiskConfig,
    pub engine: RiskEngine,
}

impl AppContext {
    /// Build the engine from a config file, or from defaults when `None`
    pub fn new(config_path: Option<&Path>) -> Result<Self, anyhow::Error> {
        let config = match config_path {
            Some(path) => RiskConfig::from_file(path)
                .with_context(|| format!("loading risk config from {}", path.display()))?,
            None => RiskConfig::default(),
        };

        let rules = RuleSet::from_config(&config)?;
        tracing::debug!(rules = ?rules.rule_ids(), "Risk rules loaded");

        Ok(Self {
            config,
            engine: RiskEngine::new(rules),
        })
    }

    /// Read an account snapshot (balance + history) from a JSON file
    pub fn load_account(path: &Path) -> Result<Account, anyhow::Error> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading account snapshot {}", path.display()))?;
        let account: Account = serde_json::from_str(&content)
            .with_context(|| format!("parsing account snapshot {}", path.display()))?;
        Ok(account)
    }
}
