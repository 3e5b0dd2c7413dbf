//! Monetary amount calculation.
//!
//! Each deduction type carries its own multiplication policy: `fixed`
//! and `hourly_salary` charge once per rule firing, `percentage` charges
//! per triggering day, `daily_salary` charges per group (grouped
//! occurrence types) or per triggering day (`total`). The asymmetry is
//! deliberate and preserved from the HR policy catalogue.

use chrono::Weekday;
use rust_decimal::Decimal;

use crate::deduction::money::round_money;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DeductionRule, DeductionType, PersonRef, SalaryBasis, ScheduleProfile,
};
use crate::sources::ScheduleSource;

/// Salary figures resolved once per person and shared across rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryContext {
    /// Monthly salary resolved from the active contract.
    pub monthly_salary: Decimal,
    /// Working days per month, `round(working_days_per_week × 4.33)`.
    pub working_days_per_month: u32,
    /// Working hours per month, `(weekly_minutes / 60) × 4.33`.
    pub working_hours_per_month: Decimal,
}

impl SalaryContext {
    /// Builds the context from a salary basis and schedule profile.
    pub fn new(basis: &SalaryBasis, profile: &ScheduleProfile) -> Self {
        Self {
            monthly_salary: basis.monthly_salary(),
            working_days_per_month: profile.working_days_per_month(),
            working_hours_per_month: profile.working_hours_per_month(),
        }
    }

    /// One working day's salary.
    ///
    /// # Errors
    ///
    /// Fails when the schedule yields zero working days per month.
    pub fn daily_salary(&self) -> EngineResult<Decimal> {
        if self.working_days_per_month == 0 {
            return Err(EngineError::CalculationError {
                message: "working days per month resolved to zero".to_string(),
            });
        }
        Ok(self.monthly_salary / Decimal::from(self.working_days_per_month))
    }

    /// One working hour's salary.
    ///
    /// # Errors
    ///
    /// Fails when the schedule yields zero working hours per month.
    pub fn hourly_salary(&self) -> EngineResult<Decimal> {
        if self.working_hours_per_month <= Decimal::ZERO {
            return Err(EngineError::CalculationError {
                message: "working hours per month resolved to zero".to_string(),
            });
        }
        Ok(self.monthly_salary / self.working_hours_per_month)
    }
}

/// The computed amount for one rule firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountResult {
    /// The final amount: clamped and rounded to 2 decimal places.
    pub amount: Decimal,
    /// The rounded amount before clamping.
    pub unclamped: Decimal,
    /// Whether a clamp bound changed the amount.
    pub clamped: bool,
    /// Human-readable derivation of the amount.
    pub explanation: String,
}

/// Computes the monetary deduction for a triggered rule.
///
/// `group_count` is `Some` for the grouped occurrence types and `None`
/// for `total`. The result is clamped to the rule's
/// `[min_deduction, max_deduction]` bounds and rounded at every money
/// boundary.
pub fn calculate_amount(
    rule: &DeductionRule,
    salary: &SalaryContext,
    triggered_days: usize,
    group_count: Option<usize>,
) -> EngineResult<AmountResult> {
    let days = Decimal::from(triggered_days as u64);

    let (raw, explanation) = match rule.deduction_type {
        DeductionType::Fixed => {
            // Flat charge per firing, independent of day or group count.
            let amount = rule.deduction_amount;
            (amount, format!("flat deduction of {}", round_money(amount)))
        }
        DeductionType::Percentage => {
            let daily = salary.daily_salary()?;
            let percent = rule.deduction_amount / Decimal::new(100, 0);
            let amount = daily * percent * days;
            (
                amount,
                format!(
                    "{}% of daily salary {} for each of {} triggering day(s)",
                    rule.deduction_amount,
                    round_money(daily),
                    triggered_days
                ),
            )
        }
        DeductionType::DailySalary => {
            let daily = salary.daily_salary()?;
            match group_count {
                Some(groups) => {
                    // One day's salary per complete group; the configured
                    // deduction_days does not apply on grouped paths.
                    let amount = daily * Decimal::from(groups as u64);
                    (
                        amount,
                        format!(
                            "one day's salary {} for each of {} group(s)",
                            round_money(daily),
                            groups
                        ),
                    )
                }
                None => {
                    let per_day = rule.deduction_days.unwrap_or(Decimal::ONE);
                    let amount = daily * per_day * days;
                    (
                        amount,
                        format!(
                            "{} day(s) of salary {} for each of {} triggering day(s)",
                            per_day,
                            round_money(daily),
                            triggered_days
                        ),
                    )
                }
            }
        }
        DeductionType::HourlySalary => {
            let hours = rule
                .deduction_hours
                .ok_or_else(|| EngineError::InvalidRule {
                    rule: rule.id.clone(),
                    message: "hourly_salary rule has no deduction_hours configured".to_string(),
                })?;
            let hourly = salary.hourly_salary()?;
            // Single flat hourly charge per firing.
            let amount = hourly * hours;
            (
                amount,
                format!(
                    "{} hour(s) at hourly salary {}",
                    hours,
                    round_money(hourly)
                ),
            )
        }
    };

    let unclamped = round_money(raw);
    let mut amount = unclamped;
    if let Some(min) = rule.min_deduction {
        amount = amount.max(min);
    }
    if let Some(max) = rule.max_deduction {
        amount = amount.min(max);
    }
    amount = round_money(amount);

    let clamped = amount != unclamped;
    let explanation = if clamped {
        format!("{explanation} (clamped to {amount})")
    } else {
        explanation
    };

    Ok(AmountResult {
        amount,
        unclamped,
        clamped,
        explanation,
    })
}

/// Derives a schedule profile from the schedule source: the count of
/// distinct weekdays with non-break timetable entries and their total
/// weekly minutes, falling back to the assigned shift applied across
/// every non-rest weekday.
pub fn derive_schedule_profile(
    schedule: &dyn ScheduleSource,
    person: &PersonRef,
    rest_days: &[Weekday; 2],
) -> ScheduleProfile {
    const WEEK: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    let mut working_days = 0u32;
    let mut weekly_minutes = 0i64;
    for weekday in WEEK {
        let minutes: i64 = schedule
            .timetable_entries(person, weekday)
            .iter()
            .filter(|e| !e.is_break)
            .map(|e| {
                let mut m = (e.end_time - e.start_time).num_minutes();
                if m < 0 {
                    m += 24 * 60;
                }
                m
            })
            .sum();
        if minutes > 0 {
            working_days += 1;
            weekly_minutes += minutes;
        }
    }

    if working_days == 0 {
        if let Some(shift) = schedule.assigned_shift(person) {
            let mut shift_minutes = (shift.end_time - shift.start_time).num_minutes();
            if shift_minutes < 0 {
                shift_minutes += 24 * 60;
            }
            let days = WEEK.iter().filter(|w| !rest_days.contains(w)).count() as u32;
            working_days = days;
            weekly_minutes = shift_minutes * i64::from(days);
        }
    }

    ScheduleProfile {
        working_days_per_week: working_days,
        weekly_scheduled_minutes: weekly_minutes,
    }
}
