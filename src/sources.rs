//! Collaborator interfaces the engine consumes data through.
//!
//! The engine is a pure computation over supplied data: attendance
//! records, timetable/shift schedule data, contract salaries, and the
//! active rule set all arrive through these traits. In-memory
//! implementations are provided for tests and for callers that already
//! hold the data; production callers back them with their own store.

use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};

use crate::models::{
    AttendanceRecord, DeductionRule, PersonRef, SalaryBasis, ShiftAssignment, StaffMember,
    TimetableEntry,
};

/// Supplies raw attendance records.
pub trait AttendanceSource {
    /// Lists the person's attendance records within the inclusive date
    /// range, at most one per date.
    fn list(&self, person: &PersonRef, start: NaiveDate, end: NaiveDate) -> Vec<AttendanceRecord>;
}

/// Supplies timetable entries and shift assignments.
pub trait ScheduleSource {
    /// Returns the person's timetable entries for one weekday, including
    /// break entries.
    fn timetable_entries(&self, person: &PersonRef, weekday: Weekday) -> Vec<TimetableEntry>;

    /// Returns the person's standing shift assignment, if any.
    fn assigned_shift(&self, person: &PersonRef) -> Option<ShiftAssignment>;
}

/// Supplies the active contract salary for a person.
pub trait ContractSource {
    /// Returns the active salary basis, or `None` when the person has no
    /// active contract.
    fn active_salary(&self, person: &PersonRef) -> Option<SalaryBasis>;
}

/// Supplies the active deduction rules.
pub trait RuleSource {
    /// Returns the active rules ordered by priority descending.
    fn active_rules(&self) -> Vec<DeductionRule>;
}

/// In-memory [`AttendanceSource`] over a list of records.
#[derive(Debug, Clone, Default)]
pub struct MemoryAttendance {
    records: Vec<AttendanceRecord>,
}

impl MemoryAttendance {
    /// Creates a source over the given records.
    pub fn new(records: Vec<AttendanceRecord>) -> Self {
        Self { records }
    }
}

impl AttendanceSource for MemoryAttendance {
    fn list(&self, person: &PersonRef, start: NaiveDate, end: NaiveDate) -> Vec<AttendanceRecord> {
        self.records
            .iter()
            .filter(|r| {
                r.person_id == person.id
                    && r.person_type == person.person_type
                    && r.date >= start
                    && r.date <= end
            })
            .cloned()
            .collect()
    }
}

/// In-memory [`ScheduleSource`] over per-person timetables and shifts.
#[derive(Debug, Clone, Default)]
pub struct MemorySchedule {
    timetables: HashMap<PersonRef, Vec<TimetableEntry>>,
    shifts: HashMap<PersonRef, ShiftAssignment>,
}

impl MemorySchedule {
    /// Registers timetable entries for a person.
    pub fn with_timetable(mut self, person: PersonRef, entries: Vec<TimetableEntry>) -> Self {
        self.timetables.insert(person, entries);
        self
    }

    /// Registers a shift assignment for a person.
    pub fn with_shift(mut self, person: PersonRef, shift: ShiftAssignment) -> Self {
        self.shifts.insert(person, shift);
        self
    }
}

impl ScheduleSource for MemorySchedule {
    fn timetable_entries(&self, person: &PersonRef, weekday: Weekday) -> Vec<TimetableEntry> {
        self.timetables
            .get(person)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.weekday == weekday)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn assigned_shift(&self, person: &PersonRef) -> Option<ShiftAssignment> {
        self.shifts.get(person).cloned()
    }
}

/// In-memory [`ContractSource`] over a roster of staff members.
#[derive(Default)]
pub struct StaffDirectory {
    staff: Vec<Box<dyn StaffMember>>,
}

impl StaffDirectory {
    /// Creates a directory over the given staff.
    pub fn new(staff: Vec<Box<dyn StaffMember>>) -> Self {
        Self { staff }
    }

    /// Adds a staff member to the directory.
    pub fn add(&mut self, member: Box<dyn StaffMember>) {
        self.staff.push(member);
    }
}

impl ContractSource for StaffDirectory {
    fn active_salary(&self, person: &PersonRef) -> Option<SalaryBasis> {
        self.staff
            .iter()
            .find(|m| &m.person_ref() == person)
            .and_then(|m| m.active_salary())
    }
}

/// A fixed rule set implementing [`RuleSource`].
///
/// Rules are sorted once at construction: priority descending, ties
/// broken by rule id so evaluation order is deterministic.
#[derive(Debug, Clone, Default)]
pub struct StaticRules {
    rules: Vec<DeductionRule>,
}

impl StaticRules {
    /// Creates a rule source, sorting the rules into evaluation order.
    pub fn new(mut rules: Vec<DeductionRule>) -> Self {
        rules.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
        Self { rules }
    }

    /// Returns all rules, active or not, in evaluation order.
    pub fn all(&self) -> &[DeductionRule] {
        &self.rules
    }
}

impl RuleSource for StaticRules {
    fn active_rules(&self) -> Vec<DeductionRule> {
        self.rules.iter().filter(|r| r.is_active).cloned().collect()
    }
}
