//! Comprehensive integration tests for the Attendance-Deduction Engine.
//!
//! This test suite covers end-to-end scenarios through the public API:
//! - Full-month comparison with mixed attendance
//! - Rule evaluation across all four deduction types
//! - Grouped occurrence semantics over realistic months
//! - Audit reasons for every not-applied path
//! - Error cases (missing salary, invalid range)

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use std::str::FromStr;

use deduction_engine::comparison::{ComparisonOptions, DayStatus, compare_attendance};
use deduction_engine::config::RuleSetLoader;
use deduction_engine::deduction::{SalaryContext, evaluate_deductions, evaluate_person};
use deduction_engine::error::EngineError;
use deduction_engine::models::{
    AttendanceRecord, AttendanceStatus, Employee, PersonRef, PersonType, SalaryBasis,
    ScheduleProfile, TimetableEntry,
};
use deduction_engine::sources::{MemoryAttendance, MemorySchedule, StaffDirectory, StaticRules};

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn person() -> PersonRef {
    PersonRef {
        id: "emp_001".to_string(),
        person_type: PersonType::Employee,
    }
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// March 2026; the 1st is a Sunday, the 2nd a Monday.
fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

/// Monday-Friday timetable, 08:00-16:00 with an unpaid lunch break entry.
fn weekday_schedule() -> MemorySchedule {
    let mut entries = Vec::new();
    for weekday in [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ] {
        entries.push(TimetableEntry {
            weekday,
            start_time: time(8, 0),
            end_time: time(16, 0),
            is_break: false,
        });
        entries.push(TimetableEntry {
            weekday,
            start_time: time(12, 0),
            end_time: time(13, 0),
            is_break: true,
        });
    }
    MemorySchedule::default().with_timetable(person(), entries)
}

fn record(day: u32, check_in: (u32, u32), check_out: (u32, u32)) -> AttendanceRecord {
    AttendanceRecord {
        person_id: "emp_001".to_string(),
        person_type: PersonType::Employee,
        date: date(day),
        check_in: Some(time(check_in.0, check_in.1)),
        check_out: Some(time(check_out.0, check_out.1)),
        status: AttendanceStatus::Present,
    }
}

/// On-time records for every March weekday except the listed days.
fn full_month_except(missing: &[u32]) -> Vec<AttendanceRecord> {
    (1..=31)
        .filter(|day| {
            let weekday = date(*day).weekday();
            weekday != Weekday::Sat && weekday != Weekday::Sun && !missing.contains(day)
        })
        .map(|day| record(day, (8, 0), (16, 0)))
        .collect()
}

/// Salary 3000 over a 5-day, 40-hour week: daily salary 136.36.
fn salary() -> SalaryContext {
    SalaryContext::new(
        &SalaryBasis::Monthly {
            amount: dec("3000"),
        },
        &ScheduleProfile {
            working_days_per_week: 5,
            weekly_scheduled_minutes: 2400,
        },
    )
}

const RULES_YAML: &str = r#"
name: integration policy
version: "1"
rules:
  - id: late_minor
    name: Late arrival (15+ minutes)
    penalty_type_ref: attendance
    deduction_type: percentage
    deduction_amount: "10"
    conditions:
      event_type: late
      min_minutes_late: 15
    priority: 30
    is_active: true
  - id: absence_run
    name: Three consecutive absences
    penalty_type_ref: attendance
    deduction_type: daily_salary
    deduction_amount: "0"
    conditions:
      event_type: absent
      occurrence_type: consecutive
    priority: 20
    is_active: true
  - id: early_leave_flat
    name: Early leave
    penalty_type_ref: attendance
    deduction_type: fixed
    deduction_amount: "25"
    conditions:
      event_type: early_leave
      occurrence_count: 2
    priority: 10
    is_active: true
  - id: misconduct
    name: Misconduct
    penalty_type_ref: conduct
    deduction_type: fixed
    deduction_amount: "200"
    conditions:
      event_type: misconduct
    priority: 5
    is_active: true
"#;

fn loaded_rules() -> StaticRules {
    RuleSetLoader::from_yaml_str(RULES_YAML, "integration")
        .unwrap()
        .into_rule_source()
}

// =============================================================================
// Comparison scenarios
// =============================================================================

#[test]
fn test_full_month_comparison_shape() {
    let comparison = compare_attendance(
        &MemoryAttendance::new(full_month_except(&[])),
        &weekday_schedule(),
        &person(),
        date(1),
        date(31),
        &ComparisonOptions::default(),
    )
    .unwrap();

    assert_eq!(comparison.days.len(), 31);
    for window in comparison.days.windows(2) {
        assert_eq!(window[0].date.succ_opt().unwrap(), window[1].date);
    }

    // March 2026 has 22 weekdays
    assert_eq!(comparison.summary.working_days, 22);
    assert_eq!(comparison.summary.present_days, 22);
    assert_eq!(comparison.summary.attendance_rate, dec("100.00"));
}

#[test]
fn test_mixed_month_summary() {
    // Late on the 3rd and 10th, early leave on the 5th, absent 11th-13th
    let mut records = full_month_except(&[3, 5, 10, 11, 12, 13]);
    records.push(record(3, (8, 20), (16, 0)));
    records.push(record(10, (8, 45), (16, 0)));
    records.push(record(5, (8, 0), (14, 0)));

    let comparison = compare_attendance(
        &MemoryAttendance::new(records),
        &weekday_schedule(),
        &person(),
        date(1),
        date(31),
        &ComparisonOptions::default(),
    )
    .unwrap();

    let summary = &comparison.summary;
    assert_eq!(summary.working_days, 22);
    assert_eq!(summary.late_days, 2);
    assert_eq!(summary.early_leave_days, 1);
    assert_eq!(summary.absent_days, 3);
    assert_eq!(summary.present_days, 19);
    // 19 / 22 * 100 = 86.3636... -> 86.36
    assert_eq!(summary.attendance_rate, dec("86.36"));
}

#[test]
fn test_rest_days_present_but_flagged() {
    let comparison = compare_attendance(
        &MemoryAttendance::default(),
        &weekday_schedule(),
        &person(),
        date(1),
        date(8),
        &ComparisonOptions::default(),
    )
    .unwrap();

    let sunday = &comparison.days[0];
    assert!(sunday.is_weekend);
    assert_eq!(sunday.day_name, "Sunday");
    assert_eq!(sunday.result.status, DayStatus::NoSchedule);
}

#[test]
fn test_custom_rest_days() {
    // Friday/Saturday rest days
    let options = ComparisonOptions {
        rest_days: [Weekday::Fri, Weekday::Sat],
    };
    let comparison = compare_attendance(
        &MemoryAttendance::default(),
        &weekday_schedule(),
        &person(),
        date(2),
        date(8),
        &options,
    )
    .unwrap();

    let friday = comparison.days.iter().find(|d| d.date == date(6)).unwrap();
    let sunday = comparison.days.iter().find(|d| d.date == date(8)).unwrap();
    assert!(friday.is_weekend);
    assert!(!sunday.is_weekend);
}

// =============================================================================
// Deduction scenarios
// =============================================================================

#[test]
fn test_clean_month_applies_nothing() {
    let comparison = compare_attendance(
        &MemoryAttendance::new(full_month_except(&[])),
        &weekday_schedule(),
        &person(),
        date(1),
        date(31),
        &ComparisonOptions::default(),
    )
    .unwrap();

    let evaluation =
        evaluate_deductions(&comparison.days, &loaded_rules().all().to_vec(), &salary());

    assert!(evaluation.is_clean());
    assert_eq!(evaluation.total_deduction, Decimal::ZERO);
    // All four rules must be accounted for
    assert_eq!(evaluation.not_applied.len(), 4);
}

#[test]
fn test_mixed_month_evaluation() {
    // Two qualifying lates (20 and 45 min), one sub-threshold late
    // (5 min), one early leave, and a 3-day absence run.
    let mut records = full_month_except(&[3, 4, 10, 11, 12, 17, 20]);
    records.push(record(3, (8, 20), (16, 0)));
    records.push(record(4, (8, 5), (16, 0)));
    records.push(record(17, (8, 45), (16, 0)));
    records.push(record(20, (8, 0), (13, 30)));

    let comparison = compare_attendance(
        &MemoryAttendance::new(records),
        &weekday_schedule(),
        &person(),
        date(1),
        date(31),
        &ComparisonOptions::default(),
    )
    .unwrap();

    let evaluation =
        evaluate_deductions(&comparison.days, &loaded_rules().all().to_vec(), &salary());

    // late_minor: 2 qualifying days at 10% of 136.36 each -> 27.27
    let late = evaluation
        .applied
        .iter()
        .find(|a| a.rule_id == "late_minor")
        .unwrap();
    assert_eq!(late.triggered_days.len(), 2);
    assert_eq!(late.deduction_amount, dec("27.27"));

    // absence_run: 10th-12th is one complete consecutive group
    let absence = evaluation
        .applied
        .iter()
        .find(|a| a.rule_id == "absence_run")
        .unwrap();
    assert_eq!(absence.deduction_amount, dec("136.36"));
    let groups = absence.groups.as_ref().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].days, vec![date(10), date(11), date(12)]);

    // early_leave_flat needs 2 occurrences, only 1 found
    let early = evaluation
        .not_applied
        .iter()
        .find(|n| n.rule_id == "early_leave_flat")
        .unwrap();
    assert_eq!(
        early.reason,
        "found 1 qualifying day(s), below the occurrence threshold of 2"
    );

    // misconduct always requires manual entry
    let misconduct = evaluation
        .not_applied
        .iter()
        .find(|n| n.rule_id == "misconduct")
        .unwrap();
    assert!(misconduct.reason.contains("manual entry"));

    // 27.27 + 136.36
    assert_eq!(evaluation.total_deduction, dec("163.63"));
}

#[test]
fn test_absence_runs_charge_complete_groups_only() {
    // Absent Mon 9 - Fri 13 and Mon 16 - Tue 17. With weekends excluded
    // the qualifying days are 9-13 and 16-17: runs of 5 and 2, one
    // complete group.
    let records = full_month_except(&[9, 10, 11, 12, 13, 16, 17]);

    let comparison = compare_attendance(
        &MemoryAttendance::new(records),
        &weekday_schedule(),
        &person(),
        date(1),
        date(31),
        &ComparisonOptions::default(),
    )
    .unwrap();

    let evaluation =
        evaluate_deductions(&comparison.days, &loaded_rules().all().to_vec(), &salary());

    let absence = evaluation
        .applied
        .iter()
        .find(|a| a.rule_id == "absence_run")
        .unwrap();
    let groups = absence.groups.as_ref().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].days, vec![date(9), date(10), date(11)]);
    assert_eq!(absence.deduction_amount, dec("136.36"));
}

#[test]
fn test_sub_threshold_lates_explained_in_audit() {
    // Only a 5-minute late; the rule floor is 15 minutes.
    let mut records = full_month_except(&[4]);
    records.push(record(4, (8, 5), (16, 0)));

    let comparison = compare_attendance(
        &MemoryAttendance::new(records),
        &weekday_schedule(),
        &person(),
        date(1),
        date(31),
        &ComparisonOptions::default(),
    )
    .unwrap();

    let evaluation =
        evaluate_deductions(&comparison.days, &loaded_rules().all().to_vec(), &salary());

    let late = evaluation
        .not_applied
        .iter()
        .find(|n| n.rule_id == "late_minor")
        .unwrap();
    assert_eq!(
        late.reason,
        "1 day(s) matched the event but were excluded by the configured minute bounds"
    );
}

#[test]
fn test_weekend_absence_never_triggers() {
    // Schedule the full week so rest days carry an expected window, and
    // leave the whole month unattended.
    let mut entries = Vec::new();
    for weekday in [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ] {
        entries.push(TimetableEntry {
            weekday,
            start_time: time(8, 0),
            end_time: time(16, 0),
            is_break: false,
        });
    }
    let schedule = MemorySchedule::default().with_timetable(person(), entries);

    let comparison = compare_attendance(
        &MemoryAttendance::default(),
        &schedule,
        &person(),
        date(1),
        date(31),
        &ComparisonOptions::default(),
    )
    .unwrap();

    let evaluation =
        evaluate_deductions(&comparison.days, &loaded_rules().all().to_vec(), &salary());

    let absence = evaluation
        .applied
        .iter()
        .find(|a| a.rule_id == "absence_run")
        .unwrap();
    for day in &absence.triggered_days {
        let weekday = day.date.weekday();
        assert_ne!(weekday, Weekday::Sat);
        assert_ne!(weekday, Weekday::Sun);
    }
}

#[test]
fn test_evaluation_deterministic_across_calls() {
    let mut records = full_month_except(&[3, 10, 11, 12]);
    records.push(record(3, (8, 30), (16, 0)));

    let comparison = compare_attendance(
        &MemoryAttendance::new(records),
        &weekday_schedule(),
        &person(),
        date(1),
        date(31),
        &ComparisonOptions::default(),
    )
    .unwrap();

    let rules = loaded_rules().all().to_vec();
    let first = evaluate_deductions(&comparison.days, &rules, &salary());
    let second = evaluate_deductions(&comparison.days, &rules, &salary());

    assert_eq!(first.applied, second.applied);
    assert_eq!(first.not_applied, second.not_applied);
    assert_eq!(first.total_deduction, second.total_deduction);
}

// =============================================================================
// Per-person entry point
// =============================================================================

#[test]
fn test_evaluate_person_end_to_end() {
    let directory = StaffDirectory::new(vec![Box::new(Employee {
        id: "emp_001".to_string(),
        monthly_salary: Some(dec("3000")),
        working_days_per_week: 5,
        weekly_scheduled_minutes: 2400,
        department_id: Some(3),
    })]);
    let mut records = full_month_except(&[3]);
    records.push(record(3, (8, 30), (16, 0)));

    let (comparison, evaluation) = evaluate_person(
        &person(),
        date(1),
        date(31),
        &MemoryAttendance::new(records),
        &weekday_schedule(),
        &directory,
        &loaded_rules(),
        None,
        &ComparisonOptions::default(),
    )
    .unwrap();

    assert_eq!(comparison.days.len(), 31);
    assert_eq!(evaluation.applied.len(), 1);
    // 10% of 136.36 for the single qualifying late day
    assert_eq!(evaluation.total_deduction, dec("13.64"));
}

#[test]
fn test_evaluate_person_without_contract_is_skipped() {
    let result = evaluate_person(
        &person(),
        date(1),
        date(31),
        &MemoryAttendance::default(),
        &weekday_schedule(),
        &StaffDirectory::default(),
        &loaded_rules(),
        None,
        &ComparisonOptions::default(),
    );

    match result {
        Err(EngineError::MissingSalary {
            person_id,
            person_type,
        }) => {
            assert_eq!(person_id, "emp_001");
            assert_eq!(person_type, "employee");
        }
        other => panic!("expected MissingSalary, got {other:?}"),
    }
}

#[test]
fn test_invalid_range_rejected_before_comparison() {
    let result = compare_attendance(
        &MemoryAttendance::default(),
        &weekday_schedule(),
        &person(),
        date(31),
        date(1),
        &ComparisonOptions::default(),
    );

    assert!(matches!(result, Err(EngineError::InvalidDateRange { .. })));
}
