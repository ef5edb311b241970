use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::reviews::LabelThresholds;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Method used to collapse an aggregated output curve into one crisp value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Defuzzification {
    /// Center of gravity of the sampled curve.
    #[default]
    Centroid,
    /// Grid point splitting the area under the curve in half.
    Bisector,
    /// Mean of the grid points where the curve reaches its maximum.
    Mom,
    /// Smallest grid point where the curve reaches its maximum.
    Som,
    /// Largest grid point where the curve reaches its maximum.
    Lom,
}

impl Defuzzification {
    /// Parse a method name as written in configuration.
    ///
    /// Returns `None` for unrecognized names.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "centroid" => Some(Self::Centroid),
            "bisector" => Some(Self::Bisector),
            "mom" => Some(Self::Mom),
            "som" => Some(Self::Som),
            "lom" => Some(Self::Lom),
            _ => None,
        }
    }
}

impl std::fmt::Display for Defuzzification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Defuzzification::Centroid => write!(f, "centroid"),
            Defuzzification::Bisector => write!(f, "bisector"),
            Defuzzification::Mom => write!(f, "mom"),
            Defuzzification::Som => write!(f, "som"),
            Defuzzification::Lom => write!(f, "lom"),
        }
    }
}

/// What to do with a crisp input that falls outside its variable's universe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Clamp to the nearest universe boundary.
    #[default]
    Clip,
    /// Fail the evaluation.
    Reject,
}

impl InputPolicy {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clip" => Some(Self::Clip),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

impl std::fmt::Display for InputPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputPolicy::Clip => write!(f, "clip"),
            InputPolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Grid steps for the builtin satisfaction system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSteps {
    pub sentiment: f64,
    pub review_length: f64,
    pub satisfaction: f64,
}

impl Default for GridSteps {
    fn default() -> Self {
        Self {
            sentiment: 0.1,
            review_length: 1.0,
            satisfaction: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// YAML system definition. `None` selects the builtin satisfaction system.
    pub system_path: Option<PathBuf>,
    pub grid_steps: GridSteps,
    pub defuzzification: Defuzzification,
    pub input_policy: InputPolicy,
    pub label_thresholds: LabelThresholds,
    pub parallel: bool,
}
