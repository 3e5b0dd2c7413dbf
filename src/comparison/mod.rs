//! Attendance comparison for the Attendance-Deduction Engine.
//!
//! This module resolves each calendar day's expected work window and
//! merges it with actual attendance records into a day-by-day comparison
//! stream plus a period summary, the input to deduction evaluation.

mod comparator;
mod schedule_resolver;

pub use comparator::{
    AttendanceComparison, AttendanceSummary, Comparison, ComparisonOptions, DayResult, DayStatus,
    compare_attendance,
};
pub use schedule_resolver::resolve_expected_schedule;
