//! Deduction evaluation for the Attendance-Deduction Engine.
//!
//! This module contains the rule pipeline: filtering the comparison
//! stream for a rule's qualifying event, applying the rule's occurrence
//! policy, computing the monetary amount with clamping, and the engine
//! orchestration that aggregates applied and not-applied results across
//! all active rules.

mod amount;
mod engine;
mod grouper;
mod money;
mod rule_filter;

pub use amount::{AmountResult, SalaryContext, calculate_amount, derive_schedule_profile};
pub use engine::{ENGINE_VERSION, evaluate_deductions, evaluate_person};
pub use grouper::{DAYS_PER_GROUP, GroupingOutcome, group_occurrences};
pub use money::round_money;
pub use rule_filter::{FilterOutcome, QualifyingDay, filter_qualifying_days};
