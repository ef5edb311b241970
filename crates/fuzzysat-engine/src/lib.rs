//! Mamdani fuzzy inference for fuzzysat.
//!
//! Variables carry triangular membership functions over discrete universes.
//! Rules combine input terms with min/max and clip their conclusions; clipped
//! shapes aggregate by pointwise max and are defuzzified back to a crisp
//! value (centroid by default). [`satisfaction`] wires the engine to review
//! scoring.

pub mod batch;
pub mod defuzz;
pub mod error;
pub mod membership;
pub mod rule;
pub mod satisfaction;
pub mod simulation;
pub mod system;
pub mod universe;
pub mod variable;

mod definition;

pub use batch::{BatchPredictor, InputRow, RowResult};
pub use defuzz::defuzzify;
pub use error::{ConfigurationError, EvaluationError, InvalidTriangle, InvalidUniverse};
pub use membership::Triangle;
pub use rule::{Expr, Rule, Term};
pub use satisfaction::{review_inputs, satisfaction_system, score_reviews};
pub use simulation::{Prediction, Simulation};
pub use system::{ControlSystem, ControlSystemBuilder, InferenceSettings};
pub use universe::Universe;
pub use variable::{Fuzzified, FuzzyVariable, Memberships};
