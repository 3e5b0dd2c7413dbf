//! Error types for the Attendance-Deduction Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during comparison and deduction
//! evaluation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendance-Deduction Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use deduction_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rules.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Rule configuration file not found: /missing/rules.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Rule configuration file was not found at the specified path.
    #[error("Rule configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Rule configuration file could not be parsed.
    #[error("Failed to parse rule configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A deduction rule contained inconsistent or invalid data.
    #[error("Invalid deduction rule '{rule}': {message}")]
    InvalidRule {
        /// The name or id of the invalid rule.
        rule: String,
        /// A description of what made the rule invalid.
        message: String,
    },

    /// No active contract salary was found for a person.
    ///
    /// The caller (payroll) must skip this person and log the failure;
    /// it must never be converted to a zero deduction.
    #[error("No active salary found for {person_type} '{person_id}'")]
    MissingSalary {
        /// The person identifier.
        person_id: String,
        /// The person type ("employee" or "teacher").
        person_type: String,
    },

    /// A requested date range ends before it starts.
    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
