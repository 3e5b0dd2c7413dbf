//! Day-by-day attendance comparison.
//!
//! Merges actual attendance records with resolved expected schedules
//! into an ordered [`Comparison`] sequence covering every calendar day
//! in the requested range, plus a period-level [`AttendanceSummary`].

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::comparison::resolve_expected_schedule;
use crate::deduction::round_money;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, ExpectedSchedule, PersonRef};
use crate::sources::{AttendanceSource, ScheduleSource};

/// The classified outcome of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Attended on time for the full expected window.
    Present,
    /// No attendance on a day with an expected schedule, or a record
    /// explicitly marked absent.
    Absent,
    /// Attended but checked in after the expected start.
    Late,
    /// Attended but checked out before the expected end.
    EarlyLeave,
    /// Covered by approved leave.
    OnLeave,
    /// The day was a holiday.
    Holiday,
    /// No attendance record and no expected schedule.
    NoSchedule,
}

/// Options governing comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonOptions {
    /// The two designated weekly rest days. Rest days stay in the
    /// sequence, flagged, but never count as working days and never
    /// trigger deduction rules.
    pub rest_days: [Weekday; 2],
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            rest_days: [Weekday::Sat, Weekday::Sun],
        }
    }
}

/// Quantified outcome of comparing one day's attendance against its
/// expected schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayResult {
    /// The classified status.
    pub status: DayStatus,
    /// Whether the check-in was after the expected start.
    pub is_late: bool,
    /// Whether the check-out was before the expected end.
    pub is_early_leave: bool,
    /// Minutes between the expected start and the check-in (0 when on
    /// time or not measurable).
    pub minutes_late: i64,
    /// Minutes between the check-out and the expected end (0 when the
    /// full window was worked or not measurable).
    pub minutes_early_leave: i64,
    /// Hours actually worked, from the check stamps.
    pub actual_hours: Decimal,
    /// Hours expected, from the resolved schedule window.
    pub expected_hours: Decimal,
}

/// One calendar day's actual-vs-expected attendance outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// The calendar date.
    pub date: NaiveDate,
    /// The weekday name (e.g. "Monday").
    pub day_name: String,
    /// Whether the date is a designated rest day.
    pub is_weekend: bool,
    /// The raw attendance record, if one exists.
    pub attendance: Option<AttendanceRecord>,
    /// The resolved expected schedule, if one exists.
    pub expected: Option<ExpectedSchedule>,
    /// The classified, quantified outcome.
    pub result: DayResult,
}

/// Period-level totals over a comparison sequence.
///
/// Rest days are excluded from every count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Non-rest days with an expected schedule.
    pub working_days: u32,
    /// Working days attended (present, late, or early leave). Attendance
    /// on a day without an expected window counts toward hours but never
    /// the rate.
    pub present_days: u32,
    /// Days classified absent.
    pub absent_days: u32,
    /// Days with a late check-in.
    pub late_days: u32,
    /// Days with an early check-out.
    pub early_leave_days: u32,
    /// Days covered by approved leave.
    pub on_leave_days: u32,
    /// Total hours actually worked.
    pub total_actual_hours: Decimal,
    /// Total hours expected.
    pub total_expected_hours: Decimal,
    /// `present_days / working_days × 100`, rounded to 2 decimal
    /// places; 0 when there are no working days.
    pub attendance_rate: Decimal,
}

/// A comparison sequence with its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceComparison {
    /// One entry per calendar day in the range, oldest first.
    pub days: Vec<Comparison>,
    /// Period-level totals.
    pub summary: AttendanceSummary,
}

/// Compares a person's attendance against their expected schedule for
/// every calendar day in the inclusive range.
///
/// Every day in the range appears exactly once, oldest first, rest days
/// included but flagged. Days with neither a record nor an expected
/// schedule are emitted with [`DayStatus::NoSchedule`]; days with an
/// expected schedule but no record are [`DayStatus::Absent`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateRange`] when `end` is before
/// `start`, before any comparison is built.
pub fn compare_attendance(
    attendance: &dyn AttendanceSource,
    schedule: &dyn ScheduleSource,
    person: &PersonRef,
    start: NaiveDate,
    end: NaiveDate,
    options: &ComparisonOptions,
) -> EngineResult<AttendanceComparison> {
    if end < start {
        return Err(EngineError::InvalidDateRange { start, end });
    }

    let records: HashMap<NaiveDate, AttendanceRecord> = attendance
        .list(person, start, end)
        .into_iter()
        .map(|r| (r.date, r))
        .collect();

    let mut days = Vec::new();
    let mut date = start;
    while date <= end {
        let expected = resolve_expected_schedule(schedule, person, date);
        let record = records.get(&date).cloned();
        let is_weekend = options.rest_days.contains(&date.weekday());
        let result = classify_day(record.as_ref(), expected.as_ref());

        debug!(
            date = %date,
            status = ?result.status,
            is_weekend,
            minutes_late = result.minutes_late,
            "classified day"
        );

        days.push(Comparison {
            date,
            day_name: weekday_name(date.weekday()).to_string(),
            is_weekend,
            attendance: record,
            expected,
            result,
        });

        date = date.succ_opt().ok_or_else(|| EngineError::CalculationError {
            message: format!("date overflow after {date}"),
        })?;
    }

    let summary = summarize(&days);
    Ok(AttendanceComparison { days, summary })
}

/// Classifies one day from its record and expected schedule.
fn classify_day(
    record: Option<&AttendanceRecord>,
    expected: Option<&ExpectedSchedule>,
) -> DayResult {
    let expected_hours = expected.map(ExpectedSchedule::expected_hours).unwrap_or(Decimal::ZERO);

    let Some(record) = record else {
        // No record: absent when a schedule was expected, otherwise the
        // day simply has no schedule.
        let status = if expected.is_some() {
            DayStatus::Absent
        } else {
            DayStatus::NoSchedule
        };
        return DayResult {
            status,
            is_late: false,
            is_early_leave: false,
            minutes_late: 0,
            minutes_early_leave: 0,
            actual_hours: Decimal::ZERO,
            expected_hours,
        };
    };

    let actual_hours = record.actual_hours();

    // Statuses that carry through from the record regardless of stamps.
    let carried = match record.status {
        AttendanceStatus::Absent => Some(DayStatus::Absent),
        AttendanceStatus::OnLeave => Some(DayStatus::OnLeave),
        AttendanceStatus::Holiday => Some(DayStatus::Holiday),
        _ => None,
    };
    if let Some(status) = carried {
        return DayResult {
            status,
            is_late: false,
            is_early_leave: false,
            minutes_late: 0,
            minutes_early_leave: 0,
            actual_hours,
            expected_hours,
        };
    }

    let (minutes_late, minutes_early_leave) = match expected {
        Some(window) => {
            let overnight = window.end_time < window.start_time;
            let day_minutes = Duration::days(1).num_minutes();
            // Minutes from the window start. On an overnight window a
            // stamp at or before the window end belongs to the next day.
            let offset = |stamp: NaiveTime| {
                let mut minutes = (stamp - window.start_time).num_minutes();
                if overnight && stamp <= window.end_time {
                    minutes += day_minutes;
                }
                minutes
            };
            let mut window_minutes = (window.end_time - window.start_time).num_minutes();
            if overnight {
                window_minutes += day_minutes;
            }

            let late = record
                .check_in
                .map(|check_in| offset(check_in).max(0))
                .unwrap_or(0);
            let early = record
                .check_out
                .map(|check_out| (window_minutes - offset(check_out)).max(0))
                .unwrap_or(0);
            (late, early)
        }
        None => (0, 0),
    };

    let is_late = minutes_late > 0;
    let is_early_leave = minutes_early_leave > 0;
    let status = if is_late {
        DayStatus::Late
    } else if is_early_leave {
        DayStatus::EarlyLeave
    } else {
        DayStatus::Present
    };

    DayResult {
        status,
        is_late,
        is_early_leave,
        minutes_late,
        minutes_early_leave,
        actual_hours,
        expected_hours,
    }
}

/// Builds the period summary. Rest days are excluded from every count.
fn summarize(days: &[Comparison]) -> AttendanceSummary {
    let mut summary = AttendanceSummary {
        working_days: 0,
        present_days: 0,
        absent_days: 0,
        late_days: 0,
        early_leave_days: 0,
        on_leave_days: 0,
        total_actual_hours: Decimal::ZERO,
        total_expected_hours: Decimal::ZERO,
        attendance_rate: Decimal::ZERO,
    };

    for day in days.iter().filter(|d| !d.is_weekend) {
        if day.expected.is_some() {
            summary.working_days += 1;
        }
        match day.result.status {
            // presence without an expected window is not a working day,
            // so it must not raise the rate
            DayStatus::Present | DayStatus::Late | DayStatus::EarlyLeave => {
                if day.expected.is_some() {
                    summary.present_days += 1;
                }
            }
            DayStatus::Absent => summary.absent_days += 1,
            DayStatus::OnLeave => summary.on_leave_days += 1,
            DayStatus::Holiday | DayStatus::NoSchedule => {}
        }
        if day.result.is_late {
            summary.late_days += 1;
        }
        if day.result.is_early_leave {
            summary.early_leave_days += 1;
        }
        summary.total_actual_hours += day.result.actual_hours;
        summary.total_expected_hours += day.result.expected_hours;
    }

    if summary.working_days > 0 {
        let rate = Decimal::from(summary.present_days) / Decimal::from(summary.working_days)
            * Decimal::new(100, 0);
        summary.attendance_rate = round_money(rate);
    }

    summary
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
