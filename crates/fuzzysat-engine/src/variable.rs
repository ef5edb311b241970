//! Fuzzy variables: a universe plus labeled membership functions.

use std::collections::{BTreeMap, HashMap};

use crate::error::ConfigurationError;
use crate::membership::Triangle;
use crate::universe::Universe;

/// Degrees of membership keyed by term label.
pub type Memberships = BTreeMap<String, f64>;

/// Fuzzified inputs keyed by variable name.
pub type Fuzzified = HashMap<String, Memberships>;

#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyVariable {
    name: String,
    universe: Universe,
    /// Declaration order is kept for display.
    terms: Vec<(String, Triangle)>,
}

impl FuzzyVariable {
    #[must_use]
    pub fn new(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            terms: Vec::new(),
        }
    }

    /// Variable over an evenly spaced `[min, max]` grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Universe`] if the grid is invalid.
    pub fn with_range(
        name: impl Into<String>,
        min: f64,
        max: f64,
        step: f64,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        match Universe::range(min, max, step) {
            Ok(universe) => Ok(Self::new(name, universe)),
            Err(source) => Err(ConfigurationError::Universe {
                variable: name,
                source,
            }),
        }
    }

    /// Builder form of [`FuzzyVariable::add_term`].
    ///
    /// # Errors
    ///
    /// See [`FuzzyVariable::add_term`].
    pub fn with_term(
        mut self,
        label: impl Into<String>,
        points: [f64; 3],
    ) -> Result<Self, ConfigurationError> {
        self.add_term(label, points)?;
        Ok(self)
    }

    /// Add a triangular term.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Triangle`] for malformed vertices and
    /// [`ConfigurationError::DuplicateLabel`] if the label already exists.
    pub fn add_term(
        &mut self,
        label: impl Into<String>,
        points: [f64; 3],
    ) -> Result<(), ConfigurationError> {
        let label = label.into();
        if self.membership(&label).is_some() {
            return Err(ConfigurationError::DuplicateLabel {
                variable: self.name.clone(),
                label,
            });
        }
        let triangle =
            Triangle::from_points(points).map_err(|source| ConfigurationError::Triangle {
                variable: self.name.clone(),
                label: label.clone(),
                source,
            })?;
        self.terms.push((label, triangle));
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &Triangle)> {
        self.terms.iter().map(|(label, t)| (label.as_str(), t))
    }

    #[must_use]
    pub fn membership(&self, label: &str) -> Option<&Triangle> {
        self.terms
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, t)| t)
    }

    /// Degree of `x` in every term. Degrees are not normalized.
    #[must_use]
    pub fn fuzzify(&self, x: f64) -> Memberships {
        self.terms
            .iter()
            .map(|(label, t)| (label.clone(), t.degree(x)))
            .collect()
    }
}
