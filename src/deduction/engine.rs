//! Deduction evaluation orchestration.
//!
//! Runs every active rule through filter, grouper, and amount
//! calculation, aggregating applied and not-applied results with a
//! grand total. The evaluation is a pure function of the comparison
//! data, rule set, and salary inputs: identical inputs always produce
//! identical applied/not-applied results and total.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::comparison::{AttendanceComparison, Comparison, ComparisonOptions, compare_attendance};
use crate::deduction::amount::{SalaryContext, calculate_amount, derive_schedule_profile};
use crate::deduction::grouper::{DAYS_PER_GROUP, GroupingOutcome, group_occurrences};
use crate::deduction::money::round_money;
use crate::deduction::rule_filter::{FilterOutcome, QualifyingDay, filter_qualifying_days};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AppliedDeduction, DeductionEvaluation, DeductionGroup, DeductionRule, OccurrenceType,
    PersonRef, ScheduleProfile, SkippedRule, TriggeredDay,
};
use crate::sources::{AttendanceSource, ContractSource, RuleSource, ScheduleSource};

/// The engine version stamped on every evaluation.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Evaluates all rules against one person's comparison stream.
///
/// Rules are expected in priority order; evaluation order does not
/// change the result (rules are independent and additive) but keeps the
/// audit lists deterministic. Every rule lands in exactly one of
/// `applied` or `not_applied` — a failure inside one rule's computation
/// records that rule as not applied and never aborts the others.
///
/// The `evaluation_id` and `timestamp` header fields are identity
/// metadata; all computed fields are deterministic for identical inputs.
pub fn evaluate_deductions(
    days: &[Comparison],
    rules: &[DeductionRule],
    salary: &SalaryContext,
) -> DeductionEvaluation {
    let mut applied = Vec::new();
    let mut not_applied = Vec::new();

    for rule in rules.iter().filter(|r| r.is_active) {
        match evaluate_rule(days, rule, salary) {
            Ok(RuleOutcome::Applied(deduction)) => {
                debug!(
                    rule_id = %rule.id,
                    amount = %deduction.deduction_amount,
                    "rule applied"
                );
                applied.push(deduction);
            }
            Ok(RuleOutcome::NotApplied(reason)) => {
                debug!(rule_id = %rule.id, reason = %reason, "rule not applied");
                not_applied.push(SkippedRule {
                    rule_id: rule.id.clone(),
                    rule_name: rule.name.clone(),
                    reason,
                });
            }
            Err(err) => {
                warn!(rule_id = %rule.id, error = %err, "rule evaluation failed");
                not_applied.push(SkippedRule {
                    rule_id: rule.id.clone(),
                    rule_name: rule.name.clone(),
                    reason: format!("evaluation failed: {err}"),
                });
            }
        }
    }

    let total: Decimal = applied.iter().map(|a| a.deduction_amount).sum();
    let total_deduction = round_money(total);

    info!(
        applied = applied.len(),
        not_applied = not_applied.len(),
        total = %total_deduction,
        "deduction evaluation complete"
    );

    DeductionEvaluation {
        evaluation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        applied,
        not_applied,
        total_deduction,
    }
}

/// Compares and evaluates one person in a single call, resolving salary
/// and schedule data through the sources.
///
/// This is the per-person unit of a bulk payroll run: callers fan out
/// across persons and cancel at this boundary.
///
/// # Errors
///
/// - [`EngineError::MissingSalary`] when the contract source has no
///   active salary for the person; the caller must skip and log, never
///   substitute zero.
/// - [`EngineError::InvalidDateRange`] when `end` is before `start`.
pub fn evaluate_person(
    person: &PersonRef,
    start: NaiveDate,
    end: NaiveDate,
    attendance: &dyn AttendanceSource,
    schedule: &dyn ScheduleSource,
    contracts: &dyn ContractSource,
    rules: &dyn RuleSource,
    profile: Option<ScheduleProfile>,
    options: &ComparisonOptions,
) -> EngineResult<(AttendanceComparison, DeductionEvaluation)> {
    let basis = contracts
        .active_salary(person)
        .ok_or_else(|| EngineError::MissingSalary {
            person_id: person.id.clone(),
            person_type: person.person_type.to_string(),
        })?;

    let profile =
        profile.unwrap_or_else(|| derive_schedule_profile(schedule, person, &options.rest_days));
    let salary = SalaryContext::new(&basis, &profile);

    let comparison = compare_attendance(attendance, schedule, person, start, end, options)?;
    let evaluation = evaluate_deductions(&comparison.days, &rules.active_rules(), &salary);

    Ok((comparison, evaluation))
}

enum RuleOutcome {
    Applied(AppliedDeduction),
    NotApplied(String),
}

fn evaluate_rule(
    days: &[Comparison],
    rule: &DeductionRule,
    salary: &SalaryContext,
) -> EngineResult<RuleOutcome> {
    rule.validate()?;

    let (matched, excluded_by_bounds) =
        match filter_qualifying_days(days, &rule.conditions) {
            FilterOutcome::ManualOnly => {
                return Ok(RuleOutcome::NotApplied(
                    "requires manual entry: the event type cannot be derived from attendance data"
                        .to_string(),
                ));
            }
            FilterOutcome::Filtered {
                matched,
                excluded_by_bounds,
            } => (matched, excluded_by_bounds),
        };

    if matched.is_empty() {
        let reason = if excluded_by_bounds > 0 {
            format!(
                "{excluded_by_bounds} day(s) matched the event but were excluded by the \
                 configured minute bounds"
            )
        } else {
            "no qualifying days found".to_string()
        };
        return Ok(RuleOutcome::NotApplied(reason));
    }

    let occurrence_type = rule.occurrence_type();
    let (groups, triggered) =
        match group_occurrences(matched, occurrence_type, rule.occurrence_count()) {
            GroupingOutcome::Triggered { groups, triggered } => (groups, triggered),
            GroupingOutcome::BelowThreshold { found, required } => {
                return Ok(RuleOutcome::NotApplied(format!(
                    "found {found} qualifying day(s), below the occurrence threshold of {required}"
                )));
            }
            GroupingOutcome::NoCompleteGroup { found } => {
                let distribution = match occurrence_type {
                    OccurrenceType::Consecutive => "consecutive",
                    _ => "non-consecutive",
                };
                return Ok(RuleOutcome::NotApplied(format!(
                    "found {found} qualifying day(s) but no complete group of {DAYS_PER_GROUP} \
                     {distribution} days"
                )));
            }
        };

    let group_count = groups.as_ref().map(Vec::len);
    let amount = calculate_amount(rule, salary, triggered.len(), group_count)?;

    if amount.amount <= Decimal::ZERO {
        return Ok(RuleOutcome::NotApplied(
            "computed amount was zero".to_string(),
        ));
    }

    let groups = groups.map(|groups| attribute_groups(groups, amount.amount));
    let triggered_days = triggered
        .into_iter()
        .map(|day| TriggeredDay {
            date: day.date,
            detail: day.detail,
        })
        .collect();

    Ok(RuleOutcome::Applied(AppliedDeduction {
        rule_id: rule.id.clone(),
        rule_name: rule.name.clone(),
        deduction_type: rule.deduction_type,
        deduction_amount: amount.amount,
        groups,
        triggered_days,
        reason: amount.explanation,
    }))
}

/// Attributes a per-group amount for the audit trail: an even share of
/// the final clamped amount, with the last group absorbing rounding
/// drift so the group amounts always sum to the rule's amount.
fn attribute_groups(groups: Vec<Vec<QualifyingDay>>, total: Decimal) -> Vec<DeductionGroup> {
    let count = groups.len().max(1);
    let share = round_money(total / Decimal::from(count as u64));
    let last = total - share * Decimal::from(count as u64 - 1);

    let mut attributed: Vec<DeductionGroup> = groups
        .into_iter()
        .map(|group| DeductionGroup {
            days: group.into_iter().map(|day| day.date).collect(),
            amount: share,
        })
        .collect();
    if let Some(last_group) = attributed.last_mut() {
        last_group.amount = last;
    }

    attributed
}
