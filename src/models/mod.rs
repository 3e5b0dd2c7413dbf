//! Core data models for the Attendance-Deduction Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod evaluation;
mod person;
mod rule;

pub use attendance::{
    AttendanceRecord, AttendanceStatus, ExpectedSchedule, ScheduleOrigin, ShiftAssignment,
    TimetableEntry,
};
pub use evaluation::{
    AppliedDeduction, DeductionEvaluation, DeductionGroup, SkippedRule, TriggeredDay,
};
pub use person::{
    Employee, PersonRef, PersonType, SalaryBasis, ScheduleProfile, StaffMember, Teacher,
    WEEKS_PER_MONTH,
};
pub use rule::{DeductionRule, DeductionType, EventType, OccurrenceType, RuleConditions};
