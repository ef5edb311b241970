//! YAML schema for fuzzy system definitions.
//!
//! A system file declares antecedent and consequent variables with their
//! triangular terms, plus the rule base. Only structural checks happen here;
//! label references and triangle ordering are checked when the engine is
//! built from the definition.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A `(variable, label)` reference used in rule premises and conclusions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermRef {
    pub variable: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermConfig {
    pub label: String,
    /// Triangle vertices `[a, b, c]`.
    pub points: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableConfig {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub terms: Vec<TermConfig>,
}

/// Rule premise. Written as `{is: ...}`, `{and: [...]}` or `{or: [...]}`;
/// a mapping with more than one of those keys is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExprConfig {
    Is(IsExpr),
    And(AndExpr),
    Or(OrExpr),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IsExpr {
    pub is: TermRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AndExpr {
    pub and: Vec<ExprConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrExpr {
    pub or: Vec<ExprConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub when: ExprConfig,
    pub then: Vec<TermRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemFile {
    pub antecedents: Vec<VariableConfig>,
    pub consequents: Vec<VariableConfig>,
    pub rules: Vec<RuleConfig>,
}

/// Load and validate a system definition from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_system(path: &Path) -> Result<SystemFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SystemFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_system(&content)
}

/// Parse and validate a system definition from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text cannot be parsed or fails validation.
pub fn parse_system(content: &str) -> Result<SystemFile, ConfigError> {
    let system: SystemFile =
        serde_yaml::from_str(content).map_err(ConfigError::SystemFileParse)?;

    validate_system(&system)?;

    Ok(system)
}

fn validate_system(system: &SystemFile) -> Result<(), ConfigError> {
    if system.antecedents.is_empty() {
        return Err(ConfigError::Validation(
            "system must declare at least one antecedent".to_string(),
        ));
    }
    if system.consequents.is_empty() {
        return Err(ConfigError::Validation(
            "system must declare at least one consequent".to_string(),
        ));
    }
    if system.rules.is_empty() {
        return Err(ConfigError::Validation(
            "system must declare at least one rule".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    for variable in system.antecedents.iter().chain(&system.consequents) {
        validate_variable(variable)?;
        if !seen_names.insert(variable.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate variable name: '{}'",
                variable.name
            )));
        }
    }

    for (idx, rule) in system.rules.iter().enumerate() {
        validate_expr(&rule.when, idx)?;
        if rule.then.is_empty() {
            return Err(ConfigError::Validation(format!(
                "rule #{} has no consequent",
                idx + 1
            )));
        }
    }

    Ok(())
}

fn validate_variable(variable: &VariableConfig) -> Result<(), ConfigError> {
    if variable.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "variable name must be non-empty".to_string(),
        ));
    }

    if !variable.min.is_finite() || !variable.max.is_finite() || variable.min >= variable.max {
        return Err(ConfigError::Validation(format!(
            "variable '{}' has invalid range [{}, {}]",
            variable.name, variable.min, variable.max
        )));
    }

    if !variable.step.is_finite() || variable.step <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "variable '{}' has invalid step {}; must be positive",
            variable.name, variable.step
        )));
    }

    if variable.terms.iter().any(|t| t.label.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "variable '{}' has a term with an empty label",
            variable.name
        )));
    }

    Ok(())
}

fn validate_expr(expr: &ExprConfig, rule_idx: usize) -> Result<(), ConfigError> {
    match expr {
        ExprConfig::Is(_) => Ok(()),
        ExprConfig::And(AndExpr { and: parts }) | ExprConfig::Or(OrExpr { or: parts }) => {
            if parts.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "rule #{} has an empty and/or group",
                    rule_idx + 1
                )));
            }
            parts.iter().try_for_each(|p| validate_expr(p, rule_idx))
        }
    }
}

#[cfg(test)]
#[path = "system_test.rs"]
mod tests;
