//! Building control systems from YAML system definitions.

use fuzzysat_core::{AndExpr, ExprConfig, IsExpr, OrExpr, SystemFile, VariableConfig};

use crate::error::ConfigurationError;
use crate::rule::{Expr, Rule, Term};
use crate::system::{ControlSystem, InferenceSettings};
use crate::variable::FuzzyVariable;

impl ControlSystem {
    /// Build a system from a parsed definition file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for any invalid variable, term or rule.
    pub fn from_definition(
        definition: &SystemFile,
        settings: InferenceSettings,
    ) -> Result<Self, ConfigurationError> {
        let mut builder = ControlSystem::builder().settings(settings);

        for config in &definition.antecedents {
            builder = builder.antecedent(variable_from_config(config)?);
        }
        for config in &definition.consequents {
            builder = builder.consequent(variable_from_config(config)?);
        }
        for (idx, config) in definition.rules.iter().enumerate() {
            let antecedent = expr_from_config(&config.when)
                .ok_or(ConfigurationError::EmptyGroup { rule: idx + 1 })?;
            let consequents = config
                .then
                .iter()
                .map(|t| Term::new(&t.variable, &t.label))
                .collect();
            builder = builder.rule(Rule::with_consequents(antecedent, consequents));
        }

        builder.build()
    }
}

fn variable_from_config(config: &VariableConfig) -> Result<FuzzyVariable, ConfigurationError> {
    let mut variable = FuzzyVariable::with_range(&config.name, config.min, config.max, config.step)?;
    for term in &config.terms {
        variable.add_term(&term.label, term.points)?;
    }
    Ok(variable)
}

/// `None` if any and/or group is empty.
fn expr_from_config(config: &ExprConfig) -> Option<Expr> {
    match config {
        ExprConfig::Is(IsExpr { is }) => Some(Expr::is(&is.variable, &is.label)),
        ExprConfig::And(AndExpr { and }) => {
            let parts = and.iter().map(expr_from_config).collect::<Option<Vec<_>>>()?;
            Expr::all(parts)
        }
        ExprConfig::Or(OrExpr { or }) => {
            let parts = or.iter().map(expr_from_config).collect::<Option<Vec<_>>>()?;
            Expr::any(parts)
        }
    }
}
