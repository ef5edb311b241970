//! Per-call evaluation contexts.
//!
//! A [`Simulation`] borrows a [`ControlSystem`] read-only and owns the inputs
//! and intermediate results of one evaluation. Each thread should use its own
//! context; the system itself is never mutated.

use std::collections::{BTreeMap, HashMap};

use fuzzysat_core::InputPolicy;

use crate::defuzz::defuzzify;
use crate::error::EvaluationError;
use crate::system::ControlSystem;
use crate::variable::Fuzzified;

#[derive(Debug, Clone)]
struct Computed {
    strengths: Vec<f64>,
    aggregates: BTreeMap<String, Vec<f64>>,
    outputs: BTreeMap<String, Result<f64, EvaluationError>>,
}

#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    system: &'a ControlSystem,
    inputs: HashMap<String, f64>,
    computed: Option<Computed>,
}

impl<'a> Simulation<'a> {
    #[must_use]
    pub fn new(system: &'a ControlSystem) -> Self {
        Self {
            system,
            inputs: HashMap::new(),
            computed: None,
        }
    }

    /// Set the crisp value of an antecedent. Discards any previous results.
    ///
    /// Under [`InputPolicy::Clip`] out-of-universe values are clamped to the
    /// nearest boundary; under [`InputPolicy::Reject`] they are an error.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::UnknownInput`] if `name` is not an
    /// antecedent, [`EvaluationError::NonFiniteInput`] for `NaN`/infinite
    /// values, and [`EvaluationError::OutOfRange`] under the reject policy.
    pub fn input(&mut self, name: &str, value: f64) -> Result<&mut Self, EvaluationError> {
        let variable = self
            .system
            .antecedent(name)
            .ok_or_else(|| EvaluationError::UnknownInput(name.to_string()))?;

        if !value.is_finite() {
            return Err(EvaluationError::NonFiniteInput {
                variable: name.to_string(),
                value,
            });
        }

        let universe = variable.universe();
        let value = if universe.contains(value) {
            value
        } else {
            match self.system.settings().input_policy {
                InputPolicy::Clip => universe.clip(value),
                InputPolicy::Reject => {
                    return Err(EvaluationError::OutOfRange {
                        variable: name.to_string(),
                        value,
                        min: universe.min(),
                        max: universe.max(),
                    })
                }
            }
        };

        self.computed = None;
        self.inputs.insert(name.to_string(), value);
        Ok(self)
    }

    /// Inputs as stored, after clipping.
    #[must_use]
    pub fn inputs(&self) -> &HashMap<String, f64> {
        &self.inputs
    }

    /// Fuzzify, fire rules, aggregate and defuzzify.
    ///
    /// A consequent whose aggregate has no area gets
    /// [`EvaluationError::DefuzzificationUndefined`] as its output; that does
    /// not fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingInput`] if any antecedent has no value.
    pub fn compute(&mut self) -> Result<(), EvaluationError> {
        let system = self.system;

        let mut fuzzified = Fuzzified::with_capacity(system.antecedents().len());
        for variable in system.antecedents() {
            let value = self
                .inputs
                .get(variable.name())
                .copied()
                .ok_or_else(|| EvaluationError::MissingInput(variable.name().to_string()))?;
            fuzzified.insert(variable.name().to_string(), variable.fuzzify(value));
        }

        let strengths: Vec<f64> = system
            .rules()
            .iter()
            .map(|rule| rule.strength(&fuzzified))
            .collect();

        for (idx, (rule, strength)) in system.rules().iter().zip(&strengths).enumerate() {
            if *strength > 0.0 {
                tracing::trace!(rule = idx + 1, strength, %rule, "rule fired");
            }
        }

        let mut aggregates = BTreeMap::new();
        let mut outputs = BTreeMap::new();
        for consequent in system.consequents() {
            let grid = consequent.universe().points();
            let mut curve = vec![0.0_f64; grid.len()];

            for (rule, &strength) in system.rules().iter().zip(&strengths) {
                if strength <= 0.0 {
                    continue;
                }
                let shapes = rule
                    .consequents()
                    .iter()
                    .filter(|t| t.variable == consequent.name())
                    .filter_map(|t| consequent.membership(&t.label));
                for shape in shapes {
                    for (mu, &g) in curve.iter_mut().zip(grid) {
                        *mu = mu.max(strength.min(shape.degree(g)));
                    }
                }
            }

            let output = defuzzify(grid, &curve, system.settings().defuzzification).ok_or_else(
                || EvaluationError::DefuzzificationUndefined(consequent.name().to_string()),
            );
            outputs.insert(consequent.name().to_string(), output);
            aggregates.insert(consequent.name().to_string(), curve);
        }

        self.computed = Some(Computed {
            strengths,
            aggregates,
            outputs,
        });
        Ok(())
    }

    /// Crisp output of a consequent after [`Simulation::compute`].
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::NotComputed`] before `compute`,
    /// [`EvaluationError::UnknownOutput`] for names that are not consequents,
    /// or the consequent's own defuzzification error.
    pub fn output(&self, name: &str) -> Result<f64, EvaluationError> {
        let computed = self.computed.as_ref().ok_or(EvaluationError::NotComputed)?;
        computed
            .outputs
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(EvaluationError::UnknownOutput(name.to_string())))
    }

    /// Firing strength of every rule, in rule order.
    #[must_use]
    pub fn rule_strengths(&self) -> Option<&[f64]> {
        self.computed.as_ref().map(|c| c.strengths.as_slice())
    }

    /// Aggregated membership of a consequent, sampled on its universe grid.
    #[must_use]
    pub fn aggregate(&self, name: &str) -> Option<&[f64]> {
        self.computed
            .as_ref()
            .and_then(|c| c.aggregates.get(name))
            .map(Vec::as_slice)
    }

    /// Return to the idle state: no inputs, no results.
    pub fn reset(&mut self) {
        self.inputs.clear();
        self.computed = None;
    }

    /// Consume the context, keeping only the outputs.
    ///
    /// Without a prior `compute`, every consequent reports
    /// [`EvaluationError::NotComputed`].
    #[must_use]
    pub fn into_prediction(self) -> Prediction {
        let outputs = match self.computed {
            Some(computed) => computed.outputs,
            None => self
                .system
                .consequents()
                .iter()
                .map(|v| (v.name().to_string(), Err(EvaluationError::NotComputed)))
                .collect(),
        };
        Prediction { outputs }
    }
}

/// Outputs of one evaluation: a value or failure per consequent.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    outputs: BTreeMap<String, Result<f64, EvaluationError>>,
}

impl Prediction {
    /// # Errors
    ///
    /// Returns the consequent's failure, or [`EvaluationError::UnknownOutput`].
    pub fn value(&self, name: &str) -> Result<f64, EvaluationError> {
        self.outputs
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(EvaluationError::UnknownOutput(name.to_string())))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Result<f64, EvaluationError>)> {
        self.outputs.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

#[cfg(test)]
#[path = "simulation_test.rs"]
mod tests;
