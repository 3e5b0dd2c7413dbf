//! Person models and the staff capability trait.
//!
//! Employees and teachers differ in how their salary and weekly schedule
//! are resolved. Instead of branching on a person-type string, the engine
//! works through the [`StaffMember`] capability trait, implemented here by
//! the two concrete variants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Average number of weeks in a month, used to derive monthly figures
/// from weekly schedule data.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Whether a person is an employee or a teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonType {
    /// Administrative or support staff paid a monthly salary.
    Employee,
    /// Teaching staff, possibly paid by the hour.
    Teacher,
}

impl std::fmt::Display for PersonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonType::Employee => write!(f, "employee"),
            PersonType::Teacher => write!(f, "teacher"),
        }
    }
}

/// A lightweight reference identifying one person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonRef {
    /// The person identifier.
    pub id: String,
    /// Whether the person is an employee or a teacher.
    pub person_type: PersonType,
}

/// How a person's active contract expresses their pay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryBasis {
    /// A fixed monthly amount.
    Monthly {
        /// The monthly salary amount.
        amount: Decimal,
    },
    /// An hourly rate over contracted weekly hours.
    Hourly {
        /// The hourly rate.
        rate: Decimal,
        /// Contracted hours per week.
        weekly_hours: Decimal,
    },
}

impl SalaryBasis {
    /// Resolves the monthly salary for this basis.
    ///
    /// Hourly contracts convert as `rate × weekly_hours × 4.33`.
    ///
    /// # Examples
    ///
    /// ```
    /// use deduction_engine::models::SalaryBasis;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let hourly = SalaryBasis::Hourly {
    ///     rate: Decimal::from_str("40").unwrap(),
    ///     weekly_hours: Decimal::from_str("20").unwrap(),
    /// };
    /// assert_eq!(hourly.monthly_salary(), Decimal::from_str("3464").unwrap());
    /// ```
    pub fn monthly_salary(&self) -> Decimal {
        match self {
            SalaryBasis::Monthly { amount } => *amount,
            SalaryBasis::Hourly { rate, weekly_hours } => *rate * *weekly_hours * WEEKS_PER_MONTH,
        }
    }
}

/// A person's weekly scheduling constraints, used to derive the monthly
/// divisors for daily and hourly salary deductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleProfile {
    /// Number of distinct weekdays the person is scheduled to work.
    pub working_days_per_week: u32,
    /// Total scheduled working minutes across one week.
    pub weekly_scheduled_minutes: i64,
}

impl ScheduleProfile {
    /// Derives the number of working days in a month:
    /// `round(working_days_per_week × 4.33)`.
    pub fn working_days_per_month(&self) -> u32 {
        let days = Decimal::from(self.working_days_per_week) * WEEKS_PER_MONTH;
        days.round().try_into().unwrap_or(0)
    }

    /// Derives the number of working hours in a month:
    /// `(weekly_scheduled_minutes / 60) × 4.33`.
    pub fn working_hours_per_month(&self) -> Decimal {
        let weekly_hours = Decimal::new(self.weekly_scheduled_minutes, 0) / Decimal::new(60, 0);
        weekly_hours * WEEKS_PER_MONTH
    }
}

/// Capability interface over the two person variants.
///
/// The deduction engine needs exactly three facts about a person: who
/// they are, what their active contract pays, and what their weekly
/// schedule looks like.
pub trait StaffMember {
    /// Returns the reference identifying this person.
    fn person_ref(&self) -> PersonRef;

    /// Returns the active salary, or `None` when no active contract
    /// exists. Callers must treat `None` as a skip, never as zero pay.
    fn active_salary(&self) -> Option<SalaryBasis>;

    /// Returns the weekly scheduling constraints.
    fn schedule_profile(&self) -> ScheduleProfile;

    /// Returns the department this person belongs to, if assigned.
    fn department_id(&self) -> Option<u64>;
}

/// An administrative or support employee with a monthly salary contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Monthly salary from the active contract, if one exists.
    pub monthly_salary: Option<Decimal>,
    /// Distinct weekdays with scheduled work.
    pub working_days_per_week: u32,
    /// Scheduled working minutes per week.
    pub weekly_scheduled_minutes: i64,
    /// Department assignment.
    pub department_id: Option<u64>,
}

impl StaffMember for Employee {
    fn person_ref(&self) -> PersonRef {
        PersonRef {
            id: self.id.clone(),
            person_type: PersonType::Employee,
        }
    }

    fn active_salary(&self) -> Option<SalaryBasis> {
        self.monthly_salary
            .map(|amount| SalaryBasis::Monthly { amount })
    }

    fn schedule_profile(&self) -> ScheduleProfile {
        ScheduleProfile {
            working_days_per_week: self.working_days_per_week,
            weekly_scheduled_minutes: self.weekly_scheduled_minutes,
        }
    }

    fn department_id(&self) -> Option<u64> {
        self.department_id
    }
}

/// A teacher, paid hourly over contracted weekly hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique identifier for the teacher.
    pub id: String,
    /// Hourly rate from the active contract, if one exists.
    pub hourly_rate: Option<Decimal>,
    /// Contracted hours per week.
    pub weekly_hours: Decimal,
    /// Weekdays the teacher is required on site, from the scheduling
    /// constraint. Drives the working-days divisor.
    pub required_days: u32,
    /// Department assignment.
    pub department_id: Option<u64>,
}

impl StaffMember for Teacher {
    fn person_ref(&self) -> PersonRef {
        PersonRef {
            id: self.id.clone(),
            person_type: PersonType::Teacher,
        }
    }

    fn active_salary(&self) -> Option<SalaryBasis> {
        self.hourly_rate.map(|rate| SalaryBasis::Hourly {
            rate,
            weekly_hours: self.weekly_hours,
        })
    }

    fn schedule_profile(&self) -> ScheduleProfile {
        let weekly_minutes = (self.weekly_hours * Decimal::new(60, 0))
            .round()
            .try_into()
            .unwrap_or(0);
        ScheduleProfile {
            working_days_per_week: self.required_days,
            weekly_scheduled_minutes: weekly_minutes,
        }
    }

    fn department_id(&self) -> Option<u64> {
        self.department_id
    }
}
