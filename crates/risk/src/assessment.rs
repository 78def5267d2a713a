//! RiskAssessment - the immutable outcome of an evaluation

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::level::RiskLevel;
use crate::rule::RuleHit;

/// Outcome of scoring one proposed transfer
///
/// `should_block()` is derived from the level and cannot be set on its own, so
/// `should_block() == (level() == High)` always holds. Serialized output
/// includes `should_block` for consumers; on deserialization it is checked
/// against the level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AssessmentRecord", into = "AssessmentRecord")]
pub struct RiskAssessment {
    level: RiskLevel,
    reasons: Vec<String>,
    rules_triggered: Vec<String>,
}

/// What the caller should do with a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    /// No warnings; execute the transfer
    Proceed,
    /// Show the warnings and require the user to confirm
    Confirm,
    /// Do not execute without an explicit override
    Block,
}

impl RiskAssessment {
    /// Assessment with no fired rules
    pub fn low() -> Self {
        Self {
            level: RiskLevel::Low,
            reasons: Vec::new(),
            rules_triggered: Vec::new(),
        }
    }

    /// Record a fired rule, raising the level to its severity if higher
    pub(crate) fn record(&mut self, rule_id: &str, hit: RuleHit) {
        self.level = self.level.max(hit.severity);
        self.reasons.push(hit.reason);
        self.rules_triggered.push(rule_id.to_string());
    }

    pub fn level(&self) -> RiskLevel {
        self.level
    }

    /// Warnings in the order their rules fired
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Identifiers of the fired rules, parallel to `reasons()`
    pub fn rules_triggered(&self) -> &[String] {
        &self.rules_triggered
    }

    pub fn should_block(&self) -> bool {
        self.level == RiskLevel::High
    }

    /// Map the assessment onto the caller contract
    ///
    /// Any warning, even at low level from a custom rule, requires confirmation.
    pub fn action(&self) -> RecommendedAction {
        if self.should_block() {
            RecommendedAction::Block
        } else if self.level.is_elevated() || !self.reasons.is_empty() {
            RecommendedAction::Confirm
        } else {
            RecommendedAction::Proceed
        }
    }
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self::low()
    }
}

/// Wire form of [`RiskAssessment`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssessmentRecord {
    level: RiskLevel,
    reasons: Vec<String>,
    #[serde(default)]
    rules_triggered: Vec<String>,
    should_block: bool,
}

impl From<RiskAssessment> for AssessmentRecord {
    fn from(assessment: RiskAssessment) -> Self {
        let should_block = assessment.should_block();
        Self {
            level: assessment.level,
            reasons: assessment.reasons,
            rules_triggered: assessment.rules_triggered,
            should_block,
        }
    }
}

impl TryFrom<AssessmentRecord> for RiskAssessment {
    type Error = String;

    fn try_from(record: AssessmentRecord) -> Result<Self, Self::Error> {
        if record.should_block != (record.level == RiskLevel::High) {
            return Err(format!(
                "should_block={} is inconsistent with level {}",
                record.should_block, record.level
            ));
        }
        if record.level.is_elevated() && record.reasons.is_empty() {
            return Err(format!("level {} requires at least one reason", record.level));
        }
        if !record.rules_triggered.is_empty() && record.rules_triggered.len() != record.reasons.len()
        {
            return Err("rules_triggered must pair with reasons".to_string());
        }

        Ok(Self {
            level: record.level,
            reasons: record.reasons,
            rules_triggered: record.rules_triggered,
        })
    }
}
