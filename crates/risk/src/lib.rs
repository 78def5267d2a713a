//! FinGuard Risk Engine - Pre-transfer fraud risk scoring
//!
//! Scores a proposed transfer against the sender's balance and history and
//! returns a [`RiskAssessment`]: a [`RiskLevel`], the warnings that fired, and
//! whether the transfer must be blocked.
//!
//! ```text
//! Account + ProposedTransaction + now
//!     │
//!     ▼
//! ┌─────────────────────────────┐
//! │ INPUT VALIDATION            │ ← InvalidInput (fail closed)
//! └─────────────────────────────┘
//!     │
//!     ▼
//! ┌─────────────────────────────┐
//! │ RULESET (configured order)  │ ← every rule runs, no short-circuit
//! └─────────────────────────────┘
//!     │
//!     ▼
//!  RiskAssessment { level = max(severity), reasons, should_block }
//! ```
//!
//! The engine is stateless: a [`RuleSet`] is immutable once built and can be
//! shared across threads, and `now` is always supplied by the caller.

pub mod assessment;
pub mod config;
pub mod engine;
pub mod error;
pub mod level;
pub mod rule;
pub mod rules;
pub mod ruleset;
pub mod tips;

pub use assessment::{RecommendedAction, RiskAssessment};
pub use config::{RecipientMatch, RiskConfig};
pub use engine::{evaluate, evaluate_batch, RiskEngine};
pub use error::{ConfigError, RiskError};
pub use level::RiskLevel;
pub use rule::{Rule, RuleContext, RuleHit};
pub use ruleset::{RuleSet, RuleSetBuilder};
pub use tips::security_tips;
