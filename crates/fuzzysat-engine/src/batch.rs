//! Row-wise prediction over datasets with per-row failure isolation.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::error::EvaluationError;
use crate::system::ControlSystem;

/// One row of crisp inputs keyed by antecedent name. A missing key is a
/// missing value.
pub type InputRow = HashMap<String, f64>;

/// Outcome for one row: the crisp output or why the row failed.
pub type RowResult = Result<f64, EvaluationError>;

/// Scores rows against one consequent of a [`ControlSystem`].
#[derive(Debug, Clone, Copy)]
pub struct BatchPredictor<'a> {
    system: &'a ControlSystem,
    output: &'a str,
}

impl<'a> BatchPredictor<'a> {
    /// # Errors
    ///
    /// Returns [`EvaluationError::UnknownOutput`] if `output` is not a
    /// consequent of `system`.
    pub fn new(system: &'a ControlSystem, output: &'a str) -> Result<Self, EvaluationError> {
        if system.consequent(output).is_none() {
            return Err(EvaluationError::UnknownOutput(output.to_string()));
        }
        Ok(Self { system, output })
    }

    /// Clip every known input to its universe and evaluate the row.
    ///
    /// Clipping happens here regardless of the system's input policy.
    /// Non-finite and unknown inputs are left for the engine to reject.
    ///
    /// # Errors
    ///
    /// Returns the row's [`EvaluationError`].
    pub fn predict_row(&self, row: &InputRow) -> RowResult {
        let clipped = row.iter().map(|(name, &value)| {
            let value = match self.system.antecedent(name) {
                Some(variable) if value.is_finite() => variable.universe().clip(value),
                _ => value,
            };
            (name.as_str(), value)
        });
        self.system.predict(clipped)?.value(self.output)
    }

    /// Evaluate every row in order. Always returns one slot per row.
    #[must_use]
    pub fn predict_many(&self, rows: &[InputRow]) -> Vec<RowResult> {
        let results: Vec<RowResult> = rows.iter().map(|row| self.predict_row(row)).collect();
        self.log_summary(&results);
        results
    }

    /// Parallel [`BatchPredictor::predict_many`] on the rayon pool. Output
    /// order matches input order.
    #[must_use]
    pub fn predict_many_par(&self, rows: &[InputRow]) -> Vec<RowResult> {
        let results: Vec<RowResult> = rows.par_iter().map(|row| self.predict_row(row)).collect();
        self.log_summary(&results);
        results
    }

    fn log_summary(&self, results: &[RowResult]) {
        for (idx, result) in results.iter().enumerate() {
            if let Err(e) = result {
                tracing::debug!(row = idx, output = self.output, error = %e, "row failed");
            }
        }
        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::debug!(
            output = self.output,
            rows = results.len(),
            failed,
            "batch scored"
        );
    }
}
