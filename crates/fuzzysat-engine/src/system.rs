//! Control systems: validated, immutable sets of variables and rules.

use std::collections::HashSet;

use fuzzysat_core::{AppConfig, Defuzzification, InputPolicy};

use crate::error::{ConfigurationError, EvaluationError};
use crate::rule::Rule;
use crate::simulation::{Prediction, Simulation};
use crate::variable::FuzzyVariable;

/// Evaluation settings fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InferenceSettings {
    pub defuzzification: Defuzzification,
    pub input_policy: InputPolicy,
}

impl InferenceSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            defuzzification: config.defuzzification,
            input_policy: config.input_policy,
        }
    }
}

/// Mamdani inference system. Read-only after [`ControlSystemBuilder::build`],
/// so one instance can serve any number of concurrent evaluations.
#[derive(Debug, Clone)]
pub struct ControlSystem {
    antecedents: Vec<FuzzyVariable>,
    consequents: Vec<FuzzyVariable>,
    rules: Vec<Rule>,
    settings: InferenceSettings,
}

impl ControlSystem {
    #[must_use]
    pub fn builder() -> ControlSystemBuilder {
        ControlSystemBuilder::default()
    }

    #[must_use]
    pub fn antecedents(&self) -> &[FuzzyVariable] {
        &self.antecedents
    }

    #[must_use]
    pub fn consequents(&self) -> &[FuzzyVariable] {
        &self.consequents
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn settings(&self) -> InferenceSettings {
        self.settings
    }

    #[must_use]
    pub fn antecedent(&self, name: &str) -> Option<&FuzzyVariable> {
        self.antecedents.iter().find(|v| v.name() == name)
    }

    #[must_use]
    pub fn consequent(&self, name: &str) -> Option<&FuzzyVariable> {
        self.consequents.iter().find(|v| v.name() == name)
    }

    /// Fresh evaluation context bound to this system.
    #[must_use]
    pub fn simulation(&self) -> Simulation<'_> {
        Simulation::new(self)
    }

    /// Evaluate one input vector in a fresh context.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] if an input is unknown, non-finite,
    /// rejected by the input policy, or an antecedent has no input.
    /// Per-consequent defuzzification failures are reported inside the
    /// returned [`Prediction`].
    pub fn predict<I, K>(&self, inputs: I) -> Result<Prediction, EvaluationError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut sim = self.simulation();
        for (name, value) in inputs {
            sim.input(name.as_ref(), value)?;
        }
        sim.compute()?;
        Ok(sim.into_prediction())
    }
}

#[derive(Debug, Default)]
pub struct ControlSystemBuilder {
    antecedents: Vec<FuzzyVariable>,
    consequents: Vec<FuzzyVariable>,
    rules: Vec<Rule>,
    settings: InferenceSettings,
}

impl ControlSystemBuilder {
    #[must_use]
    pub fn antecedent(mut self, variable: FuzzyVariable) -> Self {
        self.antecedents.push(variable);
        self
    }

    #[must_use]
    pub fn consequent(mut self, variable: FuzzyVariable) -> Self {
        self.consequents.push(variable);
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: InferenceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Validate and freeze the system.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if a variable name repeats, a variable
    /// has no terms, there are no rules, or a rule references a variable or
    /// label that is missing or declared in the wrong role.
    pub fn build(self) -> Result<ControlSystem, ConfigurationError> {
        if self.antecedents.is_empty() {
            return Err(ConfigurationError::NoAntecedents);
        }
        if self.consequents.is_empty() {
            return Err(ConfigurationError::NoConsequents);
        }
        if self.rules.is_empty() {
            return Err(ConfigurationError::NoRules);
        }

        let mut seen = HashSet::new();
        for variable in self.antecedents.iter().chain(&self.consequents) {
            if !seen.insert(variable.name()) {
                return Err(ConfigurationError::DuplicateVariable(
                    variable.name().to_string(),
                ));
            }
            if variable.terms().next().is_none() {
                return Err(ConfigurationError::NoTerms(variable.name().to_string()));
            }
        }

        for (idx, rule) in self.rules.iter().enumerate() {
            let number = idx + 1;
            for term in rule.antecedent().terms() {
                check_reference(&self.antecedents, &self.consequents, number, term, "antecedent")?;
            }
            if rule.consequents().is_empty() {
                return Err(ConfigurationError::NoConsequent { rule: number });
            }
            for term in rule.consequents() {
                check_reference(&self.consequents, &self.antecedents, number, term, "consequent")?;
            }
        }

        for consequent in &self.consequents {
            let concluded = self
                .rules
                .iter()
                .flat_map(Rule::consequents)
                .any(|t| t.variable == consequent.name());
            if !concluded {
                tracing::warn!(
                    consequent = consequent.name(),
                    "no rule concludes this consequent; its output will always be undefined"
                );
            }
        }

        tracing::debug!(
            antecedents = self.antecedents.len(),
            consequents = self.consequents.len(),
            rules = self.rules.len(),
            defuzzification = %self.settings.defuzzification,
            input_policy = %self.settings.input_policy,
            "control system built"
        );

        Ok(ControlSystem {
            antecedents: self.antecedents,
            consequents: self.consequents,
            rules: self.rules,
            settings: self.settings,
        })
    }
}

/// Check that `term` names a variable in `expected` and one of its labels.
fn check_reference(
    expected: &[FuzzyVariable],
    other_role: &[FuzzyVariable],
    rule: usize,
    term: &crate::rule::Term,
    used_as: &'static str,
) -> Result<(), ConfigurationError> {
    let Some(variable) = expected.iter().find(|v| v.name() == term.variable) else {
        if other_role.iter().any(|v| v.name() == term.variable) {
            return Err(ConfigurationError::WrongRole {
                rule,
                variable: term.variable.clone(),
                used_as,
            });
        }
        return Err(ConfigurationError::UnknownVariable {
            rule,
            variable: term.variable.clone(),
        });
    };

    if variable.membership(&term.label).is_none() {
        return Err(ConfigurationError::UnknownLabel {
            rule,
            variable: term.variable.clone(),
            label: term.label.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
#[path = "system_test.rs"]
mod tests;
