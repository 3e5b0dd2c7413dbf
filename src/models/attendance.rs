//! Attendance and schedule input models.
//!
//! This module defines the raw attendance record produced by ingestion
//! (manual entry or fingerprint-device sync) and the schedule inputs the
//! resolver turns into an expected work window for a calendar day.

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::person::{PersonRef, PersonType};

/// The status recorded on a raw attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The person attended.
    Present,
    /// The person did not attend.
    Absent,
    /// The person attended but checked in late.
    Late,
    /// The person was on approved leave.
    OnLeave,
    /// The day was a holiday.
    Holiday,
    /// The person left before the end of the scheduled window.
    EarlyLeave,
}

/// One person's attendance for one calendar day.
///
/// There is at most one record per person per date. Records are created
/// by ingestion and are immutable once the day has passed, apart from
/// administrative correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The person this record belongs to.
    pub person_id: String,
    /// Whether the person is an employee or a teacher.
    pub person_type: PersonType,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// Check-in time, if a check-in was captured.
    pub check_in: Option<NaiveTime>,
    /// Check-out time, if a check-out was captured.
    pub check_out: Option<NaiveTime>,
    /// The recorded status for the day.
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Returns the person reference for this record.
    pub fn person(&self) -> PersonRef {
        PersonRef {
            id: self.person_id.clone(),
            person_type: self.person_type,
        }
    }

    /// Calculates the hours actually worked from the check stamps.
    ///
    /// Returns zero when either stamp is missing. A check-out earlier
    /// than the check-in is treated as an overnight attendance and gains
    /// one day.
    ///
    /// # Examples
    ///
    /// ```
    /// use deduction_engine::models::{AttendanceRecord, AttendanceStatus, PersonType};
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let record = AttendanceRecord {
    ///     person_id: "emp_001".to_string(),
    ///     person_type: PersonType::Employee,
    ///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     check_in: NaiveTime::from_hms_opt(8, 0, 0),
    ///     check_out: NaiveTime::from_hms_opt(16, 30, 0),
    ///     status: AttendanceStatus::Present,
    /// };
    /// assert_eq!(record.actual_hours(), Decimal::new(85, 1)); // 8.5
    /// ```
    pub fn actual_hours(&self) -> Decimal {
        let (check_in, check_out) = match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => (check_in, check_out),
            _ => return Decimal::ZERO,
        };

        let mut minutes = (check_out - check_in).num_minutes();
        if minutes < 0 {
            minutes += Duration::days(1).num_minutes();
        }

        Decimal::new(minutes, 0) / Decimal::new(60, 0)
    }
}

/// One timetable entry for a weekday.
///
/// Break entries are excluded when resolving the expected work window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableEntry {
    /// The weekday this entry applies to.
    pub weekday: Weekday,
    /// The start time of the entry.
    pub start_time: NaiveTime,
    /// The end time of the entry.
    pub end_time: NaiveTime,
    /// Whether the entry is a break rather than working time.
    #[serde(default)]
    pub is_break: bool,
}

/// A person's standing shift assignment, used when no timetable entry
/// exists for a weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// The shift start time.
    pub start_time: NaiveTime,
    /// The shift end time. An end earlier than the start marks an
    /// overnight shift.
    pub end_time: NaiveTime,
    /// Tolerance in minutes before a late check-in counts as late.
    /// Applied to the expected start before comparison.
    #[serde(default)]
    pub grace_minutes: u32,
}

/// Where an expected schedule window came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleOrigin {
    /// Derived from timetable entries for the weekday.
    Timetable,
    /// Derived from the person's standing shift assignment.
    Shift,
}

/// The expected work window for one calendar day.
///
/// Derived on demand by the schedule resolver; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedSchedule {
    /// The date the window applies to.
    pub date: NaiveDate,
    /// Expected start of work.
    pub start_time: NaiveTime,
    /// Expected end of work. An end earlier than the start marks an
    /// overnight window.
    pub end_time: NaiveTime,
    /// Where the window came from.
    pub origin: ScheduleOrigin,
}

impl ExpectedSchedule {
    /// Calculates the expected hours for the window.
    ///
    /// Overnight windows (end before start) gain one day on the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use deduction_engine::models::{ExpectedSchedule, ScheduleOrigin};
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let overnight = ExpectedSchedule {
    ///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    ///     origin: ScheduleOrigin::Shift,
    /// };
    /// assert_eq!(overnight.expected_hours(), Decimal::new(80, 1)); // 8.0
    /// ```
    pub fn expected_hours(&self) -> Decimal {
        let mut minutes = (self.end_time - self.start_time).num_minutes();
        if minutes < 0 {
            minutes += Duration::days(1).num_minutes();
        }

        Decimal::new(minutes, 0) / Decimal::new(60, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn record(check_in: Option<NaiveTime>, check_out: Option<NaiveTime>) -> AttendanceRecord {
        AttendanceRecord {
            person_id: "emp_001".to_string(),
            person_type: PersonType::Employee,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            check_in,
            check_out,
            status: AttendanceStatus::Present,
        }
    }

    #[test]
    fn test_actual_hours_full_day() {
        let record = record(Some(time(8, 0)), Some(time(16, 0)));
        assert_eq!(record.actual_hours(), Decimal::new(80, 1)); // 8.0
    }

    #[test]
    fn test_actual_hours_missing_check_out_is_zero() {
        let record = record(Some(time(8, 0)), None);
        assert_eq!(record.actual_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_actual_hours_missing_check_in_is_zero() {
        let record = record(None, Some(time(16, 0)));
        assert_eq!(record.actual_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_actual_hours_overnight_attendance() {
        let record = record(Some(time(22, 0)), Some(time(6, 0)));
        assert_eq!(record.actual_hours(), Decimal::new(80, 1)); // 8.0
    }

    #[test]
    fn test_expected_hours_same_day_window() {
        let schedule = ExpectedSchedule {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            start_time: time(9, 0),
            end_time: time(17, 30),
            origin: ScheduleOrigin::Timetable,
        };
        assert_eq!(schedule.expected_hours(), Decimal::new(85, 1)); // 8.5
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let record = AttendanceRecord {
            person_id: "t_004".to_string(),
            person_type: PersonType::Teacher,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            check_in: Some(time(7, 45)),
            check_out: None,
            status: AttendanceStatus::Late,
        };

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: AttendanceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::EarlyLeave).unwrap(),
            "\"early_leave\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::OnLeave).unwrap(),
            "\"on_leave\""
        );
    }

    #[test]
    fn test_timetable_entry_break_flag_defaults_to_false() {
        let json = r#"{
            "weekday": "Mon",
            "start_time": "08:00:00",
            "end_time": "12:00:00"
        }"#;

        let entry: TimetableEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.is_break);
    }
}
