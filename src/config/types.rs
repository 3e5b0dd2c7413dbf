//! Rule-set configuration types.
//!
//! HR maintains deduction rules as a YAML document; this module defines
//! the structure that document deserializes into.

use serde::Deserialize;

use crate::models::DeductionRule;

/// A deserialized rule-set document.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSetConfig {
    /// Human-readable name for the rule set (e.g. "2026 attendance policy").
    pub name: String,
    /// Version label of the rule set.
    pub version: String,
    /// The configured deduction rules.
    pub rules: Vec<DeductionRule>,
}
