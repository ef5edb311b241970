//! Customer satisfaction from review sentiment and review length.
//!
//! Sentiment lives on `[-1, 1]`, review length (in words) on `[1, 50]`, and
//! satisfaction on `[0, 10]`. Nine rules cover every sentiment/length pair:
//! positive reviews score high unless short, neutral reviews score medium,
//! negative reviews score low.

use fuzzysat_core::{GridSteps, LabelThresholds, ReviewRecord, ScoredReview};

use crate::batch::{BatchPredictor, InputRow};
use crate::error::ConfigurationError;
use crate::rule::{Expr, Rule, Term};
use crate::system::{ControlSystem, InferenceSettings};
use crate::variable::FuzzyVariable;

pub const SENTIMENT: &str = "sentiment";
pub const REVIEW_LENGTH: &str = "review_length";
pub const SATISFACTION: &str = "satisfaction";

/// (sentiment label, length label, satisfaction label)
const RULES: [(&str, &str, &str); 9] = [
    ("positive", "long", "high"),
    ("positive", "medium", "high"),
    ("positive", "short", "medium"),
    ("neutral", "long", "medium"),
    ("neutral", "medium", "medium"),
    ("neutral", "short", "medium"),
    ("negative", "long", "low"),
    ("negative", "medium", "low"),
    ("negative", "short", "low"),
];

/// The builtin satisfaction system on grids of the given resolution.
///
/// # Errors
///
/// Returns [`ConfigurationError::Universe`] if a grid step is not positive.
pub fn satisfaction_system(
    steps: &GridSteps,
    settings: InferenceSettings,
) -> Result<ControlSystem, ConfigurationError> {
    let sentiment = FuzzyVariable::with_range(SENTIMENT, -1.0, 1.0, steps.sentiment)?
        .with_term("negative", [-1.0, -1.0, 0.0])?
        .with_term("neutral", [-0.2, 0.0, 0.2])?
        .with_term("positive", [0.0, 1.0, 1.0])?;

    let review_length = FuzzyVariable::with_range(REVIEW_LENGTH, 1.0, 50.0, steps.review_length)?
        .with_term("short", [1.0, 1.0, 10.0])?
        .with_term("medium", [5.0, 20.0, 35.0])?
        .with_term("long", [25.0, 50.0, 50.0])?;

    let satisfaction = FuzzyVariable::with_range(SATISFACTION, 0.0, 10.0, steps.satisfaction)?
        .with_term("low", [0.0, 0.0, 4.0])?
        .with_term("medium", [3.0, 5.0, 7.0])?
        .with_term("high", [6.0, 10.0, 10.0])?;

    let rules = RULES.iter().map(|(s, l, out)| {
        Rule::new(
            Expr::is(SENTIMENT, *s).and(Expr::is(REVIEW_LENGTH, *l)),
            Term::new(SATISFACTION, *out),
        )
    });

    ControlSystem::builder()
        .antecedent(sentiment)
        .antecedent(review_length)
        .consequent(satisfaction)
        .rules(rules)
        .settings(settings)
        .build()
}

/// Engine inputs for one review. A missing sentiment leaves the row without
/// a `sentiment` input, which fails that row only.
#[must_use]
pub fn review_inputs(record: &ReviewRecord) -> InputRow {
    let mut row = InputRow::with_capacity(2);
    if let Some(score) = record.sentiment_score() {
        row.insert(SENTIMENT.to_string(), score);
    }
    #[allow(clippy::cast_precision_loss)]
    let length = record.review_length() as f64;
    row.insert(REVIEW_LENGTH.to_string(), length);
    row
}

/// Score reviews against a system concluding `satisfaction`.
///
/// Rows that fail inference get no score and the `Unknown` label; the
/// returned vector always has one entry per record, in input order.
///
/// # Errors
///
/// Returns [`crate::EvaluationError::UnknownOutput`] if `system` has no
/// `satisfaction` consequent.
pub fn score_reviews(
    system: &ControlSystem,
    records: Vec<ReviewRecord>,
    thresholds: &LabelThresholds,
    parallel: bool,
) -> Result<Vec<ScoredReview>, crate::EvaluationError> {
    let predictor = BatchPredictor::new(system, SATISFACTION)?;
    let rows: Vec<InputRow> = records.iter().map(review_inputs).collect();

    let results = if parallel {
        predictor.predict_many_par(&rows)
    } else {
        predictor.predict_many(&rows)
    };

    Ok(records
        .into_iter()
        .zip(results)
        .map(|(record, result)| ScoredReview::new(record, result.ok(), thresholds))
        .collect())
}

#[cfg(test)]
mod tests {
    use fuzzysat_core::SatisfactionLabel;

    use super::*;

    fn system() -> ControlSystem {
        satisfaction_system(&GridSteps::default(), InferenceSettings::default()).unwrap()
    }

    fn record(sentiment: Option<&str>, words: usize) -> ReviewRecord {
        ReviewRecord {
            review: Some(vec!["word"; words].join(" ")),
            sentiment: sentiment.map(str::to_string),
            ..ReviewRecord::default()
        }
    }

    #[test]
    fn builtin_system_shape() {
        let system = system();
        assert_eq!(system.antecedents().len(), 2);
        assert_eq!(system.consequents().len(), 1);
        assert_eq!(system.rules().len(), 9);
        assert_eq!(system.antecedent(SENTIMENT).unwrap().universe().len(), 21);
        assert_eq!(system.antecedent(REVIEW_LENGTH).unwrap().universe().len(), 50);
        assert_eq!(system.consequent(SATISFACTION).unwrap().universe().len(), 11);
    }

    #[test]
    fn invalid_step_is_a_configuration_error() {
        let steps = GridSteps {
            satisfaction: 0.0,
            ..GridSteps::default()
        };
        let err = satisfaction_system(&steps, InferenceSettings::default()).unwrap_err();
        assert!(matches!(err, ConfigurationError::Universe { ref variable, .. } if variable == SATISFACTION));
    }

    #[test]
    fn review_inputs_map_label_and_length() {
        let row = review_inputs(&record(Some("Positive"), 12));
        assert_eq!(row.get(SENTIMENT), Some(&1.0));
        assert_eq!(row.get(REVIEW_LENGTH), Some(&12.0));
    }

    #[test]
    fn unknown_label_leaves_sentiment_out() {
        let row = review_inputs(&record(Some("Mixed"), 3));
        assert!(!row.contains_key(SENTIMENT));
    }

    #[test]
    fn empty_review_is_clipped_to_shortest_length() {
        let system = system();
        let scored = score_reviews(
            &system,
            vec![record(Some("Negative"), 0), record(Some("Negative"), 1)],
            &LabelThresholds::default(),
            false,
        )
        .unwrap();
        assert_eq!(scored[0].review_length, 0);
        assert_eq!(scored[0].satisfaction_score, scored[1].satisfaction_score);
        assert_eq!(scored[0].fuzzy_satisfaction, SatisfactionLabel::Low);
    }

    #[test]
    fn failed_rows_are_unknown() {
        let system = system();
        let scored = score_reviews(
            &system,
            vec![record(None, 10), record(Some("Positive"), 40)],
            &LabelThresholds::default(),
            false,
        )
        .unwrap();
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].satisfaction_score, None);
        assert_eq!(scored[0].fuzzy_satisfaction, SatisfactionLabel::Unknown);
        assert_eq!(scored[1].fuzzy_satisfaction, SatisfactionLabel::High);
    }

    #[test]
    fn system_without_satisfaction_output_is_rejected() {
        let other = FuzzyVariable::with_range("x", 0.0, 1.0, 0.5)
            .unwrap()
            .with_term("on", [0.0, 1.0, 1.0])
            .unwrap();
        let out = FuzzyVariable::with_range("y", 0.0, 1.0, 0.5)
            .unwrap()
            .with_term("on", [0.0, 1.0, 1.0])
            .unwrap();
        let system = ControlSystem::builder()
            .antecedent(other)
            .consequent(out)
            .rule(Rule::new(Expr::is("x", "on"), Term::new("y", "on")))
            .build()
            .unwrap();
        let err = score_reviews(&system, vec![], &LabelThresholds::default(), false).unwrap_err();
        assert_eq!(
            err,
            crate::EvaluationError::UnknownOutput(SATISFACTION.to_string())
        );
    }
}
