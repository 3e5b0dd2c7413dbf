//! Rule-set loading functionality.
//!
//! This module provides the [`RuleSetLoader`] type for loading deduction
//! rule sets from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::DeductionRule;
use crate::sources::StaticRules;

use super::types::RuleSetConfig;

/// Loads and provides access to a deduction rule set.
///
/// Every rule in the document is validated at load time so that a
/// misconfigured rule fails the payroll run's setup rather than one
/// person's evaluation.
///
/// # Example
///
/// ```no_run
/// use deduction_engine::config::RuleSetLoader;
///
/// let loader = RuleSetLoader::load("./config/attendance_rules.yaml")?;
/// let rules = loader.into_rule_source();
/// # Ok::<(), deduction_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RuleSetLoader {
    config: RuleSetConfig,
}

impl RuleSetLoader {
    /// Loads a rule set from a YAML file.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] when the file is missing.
    /// - [`EngineError::ConfigParseError`] when the YAML is malformed.
    /// - [`EngineError::InvalidRule`] when any rule fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses a rule set from a YAML string. `source` labels parse
    /// errors (typically the file path).
    pub fn from_yaml_str(content: &str, source: &str) -> EngineResult<Self> {
        let config: RuleSetConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        for rule in &config.rules {
            rule.validate()?;
        }

        Ok(Self { config })
    }

    /// The rule set's name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The rule set's version label.
    pub fn version(&self) -> &str {
        &self.config.version
    }

    /// The loaded rules, in document order.
    pub fn rules(&self) -> &[DeductionRule] {
        &self.config.rules
    }

    /// Converts the loaded rules into a [`StaticRules`] source sorted
    /// into evaluation order.
    pub fn into_rule_source(self) -> StaticRules {
        StaticRules::new(self.config.rules)
    }
}
