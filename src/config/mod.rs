//! Rule-set configuration loading for the Attendance-Deduction Engine.
//!
//! This module loads deduction rules from YAML documents maintained by
//! HR, validates them, and hands them to the engine as a rule source.
//!
//! # Example
//!
//! ```no_run
//! use deduction_engine::config::RuleSetLoader;
//!
//! let loader = RuleSetLoader::load("./config/attendance_rules.yaml").unwrap();
//! println!("Loaded rule set: {}", loader.name());
//! ```

mod loader;
mod types;

pub use loader::RuleSetLoader;
pub use types::RuleSetConfig;
