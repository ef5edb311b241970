use thiserror::Error;

/// A triangle whose vertices are out of order or not finite.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("triangle [{a}, {b}, {c}] must be finite with a <= b <= c")]
pub struct InvalidTriangle {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// A universe grid that cannot be sampled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid universe: {0}")]
pub struct InvalidUniverse(pub String);

/// Errors raised while building a control system. The system is unusable
/// after any of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("variable '{variable}': {source}")]
    Universe {
        variable: String,
        #[source]
        source: InvalidUniverse,
    },

    #[error("term '{variable}[{label}]': {source}")]
    Triangle {
        variable: String,
        label: String,
        #[source]
        source: InvalidTriangle,
    },

    #[error("variable '{variable}' declares label '{label}' more than once")]
    DuplicateLabel { variable: String, label: String },

    #[error("variable '{0}' is declared more than once")]
    DuplicateVariable(String),

    #[error("variable '{0}' has no terms")]
    NoTerms(String),

    #[error("system has no antecedent variables")]
    NoAntecedents,

    #[error("system has no consequent variables")]
    NoConsequents,

    #[error("system has no rules")]
    NoRules,

    #[error("rule #{rule} has an empty and/or group")]
    EmptyGroup { rule: usize },

    #[error("rule #{rule} has no consequent")]
    NoConsequent { rule: usize },

    #[error("rule #{rule} references unknown variable '{variable}'")]
    UnknownVariable { rule: usize, variable: String },

    #[error("rule #{rule} references unknown label '{label}' of variable '{variable}'")]
    UnknownLabel {
        rule: usize,
        variable: String,
        label: String,
    },

    #[error("rule #{rule} uses '{variable}' as {used_as}, but it is not declared as one")]
    WrongRole {
        rule: usize,
        variable: String,
        used_as: &'static str,
    },
}

/// Errors raised by a single evaluation. They never affect other evaluations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("no input supplied for antecedent '{0}'")]
    MissingInput(String),

    #[error("'{0}' is not an antecedent of this system")]
    UnknownInput(String),

    #[error("input for '{variable}' is not finite: {value}")]
    NonFiniteInput { variable: String, value: f64 },

    #[error("input {value} for '{variable}' is outside its universe [{min}, {max}]")]
    OutOfRange {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("aggregated membership of '{0}' is zero everywhere; no rule fired")]
    DefuzzificationUndefined(String),

    #[error("'{0}' is not a consequent of this system")]
    UnknownOutput(String),

    #[error("compute() has not been called since the last input change")]
    NotComputed,
}
