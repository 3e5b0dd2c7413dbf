//! Deduction evaluation output models.
//!
//! This module contains the [`DeductionEvaluation`] aggregate and its
//! associated structures capturing everything a payroll run or auditor
//! needs: which rules applied, which did not and why, the triggering
//! days, and the grand total.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rule::DeductionType;

/// One day that contributed to a rule firing, with a human-readable
/// detail of what happened on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// What qualified the day (e.g. "late by 25 minutes").
    pub detail: String,
}

/// A fixed-size bundle of qualifying days constituting one deduction
/// unit under the grouped occurrence types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionGroup {
    /// The days in the group, chronologically ordered.
    pub days: Vec<NaiveDate>,
    /// The amount charged for this group.
    pub amount: Decimal,
}

/// A rule that fired, with its computed amount and audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDeduction {
    /// The id of the rule that fired.
    pub rule_id: String,
    /// The name of the rule that fired.
    pub rule_name: String,
    /// How the amount was derived.
    pub deduction_type: DeductionType,
    /// The final clamped amount, rounded to 2 decimal places.
    pub deduction_amount: Decimal,
    /// The deduction groups, for grouped occurrence types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<DeductionGroup>>,
    /// The days that triggered the rule. For grouped occurrence types
    /// this is the flattened union of complete groups only.
    pub triggered_days: Vec<TriggeredDay>,
    /// Human-readable explanation of why and how the rule applied.
    pub reason: String,
}

/// A rule that did not fire, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRule {
    /// The id of the rule.
    pub rule_id: String,
    /// The name of the rule.
    pub rule_name: String,
    /// Why the rule did not apply.
    pub reason: String,
}

/// The complete result of evaluating all active rules against one
/// person's comparison stream.
///
/// Produced fresh per evaluation; payroll persists only the final line
/// items, never this aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionEvaluation {
    /// Unique identifier for this evaluation.
    pub evaluation_id: Uuid,
    /// When the evaluation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced it.
    pub engine_version: String,
    /// Rules that fired, in evaluation order.
    pub applied: Vec<AppliedDeduction>,
    /// Rules that did not fire, with reasons, in evaluation order.
    pub not_applied: Vec<SkippedRule>,
    /// Sum of all applied amounts, rounded to 2 decimal places.
    pub total_deduction: Decimal,
}

impl DeductionEvaluation {
    /// Returns true if no rule fired.
    pub fn is_clean(&self) -> bool {
        self.applied.is_empty()
    }
}
