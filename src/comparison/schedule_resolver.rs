//! Expected-schedule resolution.
//!
//! Resolves the expected work window for one person on one calendar day:
//! timetable entries for that weekday (breaks excluded) collapsed to a
//! single window, falling back to the standing shift assignment, falling
//! back to no schedule at all.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{ExpectedSchedule, PersonRef, ScheduleOrigin};
use crate::sources::ScheduleSource;

/// Resolves the expected work window for a person on a date.
///
/// Timetable entries for the date's weekday take precedence; break
/// entries are excluded and the remaining entries collapse to one window
/// from the earliest start to the latest end. When no timetable entries
/// exist, the person's assigned shift is used, with the shift's grace
/// period added to the start so that lateness is measured against the
/// tolerated start. When neither exists the day has no schedule.
///
/// # Example
///
/// ```
/// use deduction_engine::comparison::resolve_expected_schedule;
/// use deduction_engine::models::{PersonRef, PersonType, ScheduleOrigin, TimetableEntry};
/// use deduction_engine::sources::MemorySchedule;
/// use chrono::{NaiveDate, NaiveTime, Weekday};
///
/// let person = PersonRef {
///     id: "t_001".to_string(),
///     person_type: PersonType::Teacher,
/// };
/// let schedule = MemorySchedule::default().with_timetable(
///     person.clone(),
///     vec![TimetableEntry {
///         weekday: Weekday::Mon,
///         start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///         end_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
///         is_break: false,
///     }],
/// );
///
/// // 2026-03-02 is a Monday
/// let resolved = resolve_expected_schedule(
///     &schedule,
///     &person,
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
/// );
/// assert_eq!(resolved.unwrap().origin, ScheduleOrigin::Timetable);
/// ```
pub fn resolve_expected_schedule(
    schedule: &dyn ScheduleSource,
    person: &PersonRef,
    date: NaiveDate,
) -> Option<ExpectedSchedule> {
    let entries = schedule.timetable_entries(person, date.weekday());
    let working: Vec<_> = entries.iter().filter(|e| !e.is_break).collect();

    let start = working.iter().map(|e| e.start_time).min();
    let end = working.iter().map(|e| e.end_time).max();
    if let (Some(start_time), Some(end_time)) = (start, end) {
        return Some(ExpectedSchedule {
            date,
            start_time,
            end_time,
            origin: ScheduleOrigin::Timetable,
        });
    }

    schedule.assigned_shift(person).map(|shift| ExpectedSchedule {
        date,
        start_time: shift.start_time + Duration::minutes(i64::from(shift.grace_minutes)),
        end_time: shift.end_time,
        origin: ScheduleOrigin::Shift,
    })
}
