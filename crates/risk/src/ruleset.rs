//! RuleSet - an ordered, immutable collection of rules
//!
//! Rules run in the order they were registered. Identifiers must be unique so
//! that no rule can run twice in one evaluation.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::config::RiskConfig;
use crate::error::ConfigError;
use crate::rule::Rule;
use crate::rules::{
    BalanceFractionRule, DenylistRule, ExceedsBalanceRule, LargeAmountRule, UnknownRecipientRule,
    VelocityRule,
};

/// Ordered rule policy
///
/// Cheap to clone; the rules themselves are shared.
#[derive(Clone)]
pub struct RuleSet {
    name: String,
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleSet {
    /// Start building a named rule set
    pub fn builder(name: impl Into<String>) -> RuleSetBuilder {
        RuleSetBuilder {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// The reference policy with default thresholds
    pub fn default_rules() -> Self {
        Self::from_valid_config(&RiskConfig::default())
    }

    /// Build the default rules from `config`, plus whichever optional rules
    /// the config enables
    pub fn from_config(config: &RiskConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: &RiskConfig) -> Self {
        let mut rules: Vec<Arc<dyn Rule>> = vec![
            Arc::new(BalanceFractionRule::large_fraction(config.warn_fraction)),
            Arc::new(BalanceFractionRule::very_large_fraction(config.block_fraction)),
            Arc::new(UnknownRecipientRule::new(config.recipient_match)),
            Arc::new(VelocityRule::new(
                config.velocity_threshold,
                config.velocity_window_hours,
            )),
        ];

        if !config.denylist.is_empty() {
            rules.push(Arc::new(DenylistRule::new(
                config.denylist.iter().cloned(),
                config.recipient_match,
            )));
        }
        if let Some(threshold) = config.large_amount_threshold {
            rules.push(Arc::new(LargeAmountRule::new(threshold)));
        }
        if config.block_on_insufficient_balance {
            rules.push(Arc::new(ExceedsBalanceRule));
        }

        Self {
            name: "default".to_string(),
            rules,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.rules.iter()
    }

    /// Rule identifiers in evaluation order
    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::default_rules()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("name", &self.name)
            .field("rules", &self.rule_ids())
            .finish()
    }
}

/// Builder for custom rule sets
pub struct RuleSetBuilder {
    name: String,
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleSetBuilder {
    /// Append a rule (runs after those already added)
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Append an already shared rule
    pub fn shared_rule(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append every rule of an existing set, keeping its order
    pub fn extend(mut self, set: &RuleSet) -> Self {
        self.rules.extend(set.rules.iter().cloned());
        self
    }

    /// Finish the set, rejecting duplicate rule identifiers
    pub fn build(self) -> Result<RuleSet, ConfigError> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.id()) {
                return Err(ConfigError::invalid(format!(
                    "duplicate rule id {} in rule set {}",
                    rule.id(),
                    self.name
                )));
            }
        }

        Ok(RuleSet {
            name: self.name,
            rules: self.rules,
        })
    }
}
