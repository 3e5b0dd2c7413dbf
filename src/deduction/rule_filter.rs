//! Rule condition filtering over the comparison stream.
//!
//! Selects the days that exhibit a rule's qualifying event. Days whose
//! late minutes fall outside the rule's configured bounds are tracked
//! separately from days with no event at all — the distinction drives
//! the not-applied audit message.

use chrono::NaiveDate;

use crate::comparison::{Comparison, DayStatus};
use crate::models::{EventType, RuleConditions};

/// One day that exhibits a rule's qualifying event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifyingDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// What qualified the day (e.g. "late by 25 minutes").
    pub detail: String,
}

/// The outcome of filtering the comparison stream for one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The rule's event type cannot be derived from attendance data;
    /// the rule only applies through manual entry.
    ManualOnly,
    /// The derivable events found, if any.
    Filtered {
        /// Days exhibiting the event, chronologically ordered.
        matched: Vec<QualifyingDay>,
        /// Days that had the event but fell outside the configured
        /// minute bounds.
        excluded_by_bounds: u32,
    },
}

/// Selects the days in the comparison stream that satisfy a rule's
/// conditions.
///
/// Rest days are always excluded regardless of event type, even when
/// their status technically matches. `absent_without_permission` is
/// treated identically to `absent`: approved leave is classified
/// [`DayStatus::OnLeave`] upstream, so covered absences never reach the
/// absent filter.
pub fn filter_qualifying_days(days: &[Comparison], conditions: &RuleConditions) -> FilterOutcome {
    if !conditions.event_type.attendance_derivable() {
        return FilterOutcome::ManualOnly;
    }

    let mut matched = Vec::new();
    let mut excluded_by_bounds = 0u32;

    for day in days.iter().filter(|d| !d.is_weekend) {
        match conditions.event_type {
            EventType::Late => {
                if !day.result.is_late {
                    continue;
                }
                let minutes = day.result.minutes_late;
                let below = conditions.min_minutes_late.is_some_and(|min| minutes < min);
                let above = conditions.max_minutes_late.is_some_and(|max| minutes > max);
                if below || above {
                    excluded_by_bounds += 1;
                    continue;
                }
                matched.push(QualifyingDay {
                    date: day.date,
                    detail: format!("late by {minutes} minutes"),
                });
            }
            EventType::Absent | EventType::AbsentWithoutPermission => {
                if day.result.status == DayStatus::Absent {
                    matched.push(QualifyingDay {
                        date: day.date,
                        detail: "absent".to_string(),
                    });
                }
            }
            EventType::EarlyLeave => {
                if day.result.is_early_leave {
                    matched.push(QualifyingDay {
                        date: day.date,
                        detail: format!(
                            "left {} minutes early",
                            day.result.minutes_early_leave
                        ),
                    });
                }
            }
            // attendance_derivable() ruled these out above
            EventType::Misconduct | EventType::PolicyViolation | EventType::Administrative => {
                unreachable!("non-derivable event type reached the filter")
            }
        }
    }

    FilterOutcome::Filtered {
        matched,
        excluded_by_bounds,
    }
}
