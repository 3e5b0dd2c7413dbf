//! Attendance-Deduction Engine for HR payroll runs.
//!
//! This crate compares a person's actual attendance against their expected
//! work schedule day by day, then evaluates configurable deduction rules
//! against that comparison stream to produce audited monetary deductions
//! for payroll generation.

#![warn(missing_docs)]

pub mod comparison;
pub mod config;
pub mod deduction;
pub mod error;
pub mod models;
pub mod sources;
