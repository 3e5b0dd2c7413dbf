//! Deduction rule models.
//!
//! Rules are owned by HR configuration and read-only to the engine. Each
//! rule names the attendance event it reacts to, how qualifying days must
//! be distributed in time to trigger, and how the monetary amount is
//! derived once it does.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The attendance event a rule's condition reacts to.
///
/// Only the first four variants can be derived from attendance data.
/// The remaining categories exist in HR penalty catalogues but require a
/// manual entry to apply; the engine always reports them as not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Check-in after the expected start.
    Late,
    /// No attendance on a day with an expected schedule.
    Absent,
    /// Absence not covered by approved leave. Treated as [`EventType::Absent`]
    /// when no leave-exclusion data is available.
    AbsentWithoutPermission,
    /// Check-out before the expected end.
    EarlyLeave,
    /// Misconduct incidents; manual entry only.
    Misconduct,
    /// Policy violations; manual entry only.
    PolicyViolation,
    /// Administrative penalties; manual entry only.
    Administrative,
}

impl EventType {
    /// Whether this event can be derived from attendance data alone.
    pub fn attendance_derivable(&self) -> bool {
        matches!(
            self,
            EventType::Late
                | EventType::Absent
                | EventType::AbsentWithoutPermission
                | EventType::EarlyLeave
        )
    }
}

/// How qualifying days must be distributed in time for a rule to trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceType {
    /// The total count of qualifying days must reach `occurrence_count`.
    Total,
    /// Qualifying days must form runs of calendar-adjacent dates; every
    /// complete block of three consecutive days is one deduction unit.
    Consecutive,
    /// Qualifying days accumulate into three-day bundles that reset when
    /// a day lands calendar-adjacent to the bundle's last day.
    NonConsecutive,
}

/// How the monetary amount is derived once a rule triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionType {
    /// A flat configured amount, charged once per rule firing.
    Fixed,
    /// A percentage of one day's salary, charged per triggering day.
    Percentage,
    /// One or more days' salary, per group or per triggering day.
    DailySalary,
    /// A configured number of hours' salary, charged once per rule firing.
    HourlySalary,
}

/// The qualifying conditions attached to a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConditions {
    /// The attendance event the rule reacts to.
    pub event_type: EventType,
    /// Occurrence policy; defaults to [`OccurrenceType::Total`].
    #[serde(default)]
    pub occurrence_type: Option<OccurrenceType>,
    /// Threshold for the `total` occurrence type; defaults to 1.
    #[serde(default)]
    pub occurrence_count: Option<u32>,
    /// Free-form period label from HR configuration (e.g. "monthly").
    /// Informational only.
    #[serde(default)]
    pub time_period: Option<String>,
    /// Lower bound on `minutes_late` for late events.
    #[serde(default)]
    pub min_minutes_late: Option<i64>,
    /// Upper bound on `minutes_late` for late events.
    #[serde(default)]
    pub max_minutes_late: Option<i64>,
}

/// A configured deduction rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionRule {
    /// Unique identifier for the rule.
    pub id: String,
    /// Human-readable rule name.
    pub name: String,
    /// Reference to the penalty type this rule belongs to.
    pub penalty_type_ref: String,
    /// How the monetary amount is derived.
    pub deduction_type: DeductionType,
    /// The configured amount: a flat charge for `fixed`, a percentage for
    /// `percentage`, unused for the salary-derived types.
    pub deduction_amount: Decimal,
    /// Days of salary charged per triggering day (`daily_salary` with the
    /// `total` occurrence type only). Defaults to 1.
    #[serde(default)]
    pub deduction_days: Option<Decimal>,
    /// Hours of salary charged per firing (`hourly_salary` only).
    #[serde(default)]
    pub deduction_hours: Option<Decimal>,
    /// Lower clamp on the computed amount.
    #[serde(default)]
    pub min_deduction: Option<Decimal>,
    /// Upper clamp on the computed amount.
    #[serde(default)]
    pub max_deduction: Option<Decimal>,
    /// The qualifying conditions.
    pub conditions: RuleConditions,
    /// Evaluation order; higher priority rules are evaluated first.
    /// Ordering is cosmetic for the audit list — rules are independent
    /// and additive.
    pub priority: i32,
    /// Whether the rule participates in evaluation.
    pub is_active: bool,
}

impl DeductionRule {
    /// The effective occurrence type, defaulting to `total`.
    pub fn occurrence_type(&self) -> OccurrenceType {
        self.conditions
            .occurrence_type
            .unwrap_or(OccurrenceType::Total)
    }

    /// The effective occurrence threshold, defaulting to 1.
    pub fn occurrence_count(&self) -> u32 {
        self.conditions.occurrence_count.unwrap_or(1).max(1)
    }

    /// Validates the rule's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRule`] when amounts are negative,
    /// a percentage exceeds 100, the clamp bounds are inverted, or an
    /// explicit occurrence count is zero.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::InvalidRule {
            rule: self.id.clone(),
            message: message.to_string(),
        };

        if self.deduction_amount < Decimal::ZERO {
            return Err(invalid("deduction_amount must not be negative"));
        }
        if self.deduction_type == DeductionType::Percentage
            && self.deduction_amount > Decimal::new(100, 0)
        {
            return Err(invalid("percentage deduction_amount must not exceed 100"));
        }
        if self.deduction_days.is_some_and(|d| d < Decimal::ZERO) {
            return Err(invalid("deduction_days must not be negative"));
        }
        if self.deduction_hours.is_some_and(|h| h < Decimal::ZERO) {
            return Err(invalid("deduction_hours must not be negative"));
        }
        if let (Some(min), Some(max)) = (self.min_deduction, self.max_deduction) {
            if min > max {
                return Err(invalid("min_deduction exceeds max_deduction"));
            }
        }
        if self.conditions.occurrence_count == Some(0) {
            return Err(invalid("occurrence_count must be at least 1"));
        }
        if let (Some(min), Some(max)) = (
            self.conditions.min_minutes_late,
            self.conditions.max_minutes_late,
        ) {
            if min > max {
                return Err(invalid("min_minutes_late exceeds max_minutes_late"));
            }
        }

        Ok(())
    }
}
