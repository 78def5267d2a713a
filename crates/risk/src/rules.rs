//! Built-in rule implementations
//!
//! The default rule set:
//! - [`BalanceFractionRule`] - transfer is a large share of the balance (twice:
//!   a medium warning and a high block threshold)
//! - [`UnknownRecipientRule`] - no prior send to this recipient (medium)
//! - [`VelocityRule`] - too many sends in the recent window (medium)
//!
//! Optional rules, enabled through [`crate::RiskConfig`]:
//! - [`DenylistRule`] - recipient is denylisted (high)
//! - [`LargeAmountRule`] - absolute amount above a threshold (medium)
//! - [`ExceedsBalanceRule`] - amount larger than the whole balance (high)

use chrono::Duration;
use rust_decimal::Decimal;

use crate::config::RecipientMatch;
use crate::level::RiskLevel;
use crate::rule::{Rule, RuleContext, RuleHit};

pub const LARGE_FRACTION: &str = "LARGE_FRACTION";
pub const VERY_LARGE_FRACTION: &str = "VERY_LARGE_FRACTION";
pub const UNKNOWN_RECIPIENT: &str = "UNKNOWN_RECIPIENT";
pub const VELOCITY: &str = "VELOCITY";
pub const DENYLISTED_RECIPIENT: &str = "DENYLISTED_RECIPIENT";
pub const LARGE_AMOUNT: &str = "LARGE_AMOUNT";
pub const EXCEEDS_BALANCE: &str = "EXCEEDS_BALANCE";

// =============================================================================
// BalanceFractionRule
// =============================================================================

/// Fires when `amount > balance * fraction` (strict, so exactly the fraction
/// does not fire)
pub struct BalanceFractionRule {
    id: &'static str,
    fraction: Decimal,
    severity: RiskLevel,
}

impl BalanceFractionRule {
    /// Medium warning above `fraction` of the balance
    pub fn large_fraction(fraction: Decimal) -> Self {
        Self {
            id: LARGE_FRACTION,
            fraction,
            severity: RiskLevel::Medium,
        }
    }

    /// High (blocking) above `fraction` of the balance
    pub fn very_large_fraction(fraction: Decimal) -> Self {
        Self {
            id: VERY_LARGE_FRACTION,
            fraction,
            severity: RiskLevel::High,
        }
    }

    fn share_label(&self) -> String {
        match self.fraction.checked_mul(Decimal::ONE_HUNDRED) {
            Some(percent) => format!("{}%", percent.normalize()),
            None => format!("{}x", self.fraction),
        }
    }
}

impl Rule for BalanceFractionRule {
    fn id(&self) -> &str {
        self.id
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit> {
        // An overflowing limit is beyond any representable amount
        let limit = ctx.balance.value().checked_mul(self.fraction)?;
        (ctx.amount.value() > limit).then(|| {
            RuleHit::new(
                self.severity,
                format!(
                    "This transaction is for more than {} of your current balance.",
                    self.share_label()
                ),
            )
        })
    }
}

// =============================================================================
// UnknownRecipientRule
// =============================================================================

/// Fires when the account has never sent funds to the recipient
pub struct UnknownRecipientRule {
    matcher: RecipientMatch,
}

impl UnknownRecipientRule {
    pub fn new(matcher: RecipientMatch) -> Self {
        Self { matcher }
    }
}

impl Rule for UnknownRecipientRule {
    fn id(&self) -> &str {
        UNKNOWN_RECIPIENT
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit> {
        let known = ctx
            .account
            .sent()
            .any(|tx| self.matcher.matches(&tx.counterparty, &ctx.tx.recipient));

        (!known).then(|| {
            RuleHit::new(
                RiskLevel::Medium,
                "You have not sent funds to this recipient before.",
            )
        })
    }
}

// =============================================================================
// VelocityRule
// =============================================================================

/// Fires when the number of sends with `timestamp >= now - window` reaches
/// the threshold
///
/// History order is irrelevant: every record is inspected.
pub struct VelocityRule {
    threshold: u32,
    window_hours: u32,
}

impl VelocityRule {
    pub fn new(threshold: u32, window_hours: u32) -> Self {
        Self {
            threshold,
            window_hours,
        }
    }

    fn window_label(&self) -> String {
        match self.window_hours {
            1 => "hour".to_string(),
            n => format!("{n} hours"),
        }
    }
}

impl Rule for VelocityRule {
    fn id(&self) -> &str {
        VELOCITY
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit> {
        let window = Duration::hours(i64::from(self.window_hours));
        let since = ctx.now.checked_sub_signed(window);

        let recent = ctx
            .account
            .sent()
            .filter(|tx| since.map_or(true, |since| tx.timestamp >= since))
            .count();

        (recent >= self.threshold as usize).then(|| {
            tracing::debug!(recent, threshold = self.threshold, "Velocity threshold reached");
            RuleHit::new(
                RiskLevel::Medium,
                format!(
                    "You have made multiple transactions in the last {}.",
                    self.window_label()
                ),
            )
        })
    }
}

// =============================================================================
// DenylistRule
// =============================================================================

/// Fires when the recipient is on the denylist
pub struct DenylistRule {
    entries: Vec<String>,
    matcher: RecipientMatch,
}

impl DenylistRule {
    pub fn new(entries: impl IntoIterator<Item = impl Into<String>>, matcher: RecipientMatch) -> Self {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            matcher,
        }
    }

    pub fn contains(&self, recipient: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| self.matcher.matches(entry, recipient))
    }
}

impl Rule for DenylistRule {
    fn id(&self) -> &str {
        DENYLISTED_RECIPIENT
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit> {
        self.contains(&ctx.tx.recipient).then(|| {
            RuleHit::new(
                RiskLevel::High,
                "This recipient is on your blocked recipients list.",
            )
        })
    }
}

// =============================================================================
// LargeAmountRule
// =============================================================================

/// Fires when `amount >= threshold`, independent of the balance
pub struct LargeAmountRule {
    threshold: Decimal,
}

impl LargeAmountRule {
    pub fn new(threshold: Decimal) -> Self {
        Self { threshold }
    }
}

impl Rule for LargeAmountRule {
    fn id(&self) -> &str {
        LARGE_AMOUNT
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit> {
        (ctx.amount.value() >= self.threshold).then(|| {
            RuleHit::new(
                RiskLevel::Medium,
                format!(
                    "This transaction is at or above the large transfer threshold of {}.",
                    self.threshold
                ),
            )
        })
    }
}

// =============================================================================
// ExceedsBalanceRule
// =============================================================================

/// Fires when `amount > balance`
pub struct ExceedsBalanceRule;

impl Rule for ExceedsBalanceRule {
    fn id(&self) -> &str {
        EXCEEDS_BALANCE
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<RuleHit> {
        (ctx.amount.value() > ctx.balance.value()).then(|| {
            RuleHit::new(
                RiskLevel::High,
                format!(
                    "This transaction exceeds your current balance of {}.",
                    ctx.balance
                ),
            )
        })
    }
}
