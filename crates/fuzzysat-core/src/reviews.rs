//! Review records and the glue around the inference engine: sentiment label
//! mapping, word counts, and score bucketing.

use serde::{Deserialize, Serialize};

/// One input review as read from a JSON Lines file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, alias = "review_text")]
    pub review: Option<String>,
    /// Sentiment label: `Negative`, `Neutral` or `Positive`.
    #[serde(default)]
    pub sentiment: Option<String>,
}

impl ReviewRecord {
    /// Numeric sentiment score for the record's label, if it has a known one.
    #[must_use]
    pub fn sentiment_score(&self) -> Option<f64> {
        self.sentiment.as_deref().and_then(sentiment_score)
    }

    /// Word count of the review text. Absent text counts as zero words.
    #[must_use]
    pub fn review_length(&self) -> usize {
        self.review.as_deref().map_or(0, review_length)
    }
}

/// Map a sentiment label to `-1.0`, `0.0` or `1.0`.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
#[must_use]
pub fn sentiment_score(label: &str) -> Option<f64> {
    match label.trim().to_ascii_lowercase().as_str() {
        "negative" => Some(-1.0),
        "neutral" => Some(0.0),
        "positive" => Some(1.0),
        _ => None,
    }
}

/// Number of whitespace-separated words in `text`.
#[must_use]
pub fn review_length(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Qualitative bucket for a crisp satisfaction score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SatisfactionLabel {
    Low,
    Medium,
    High,
    /// No score could be computed for the row.
    Unknown,
}

impl std::fmt::Display for SatisfactionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SatisfactionLabel::Low => write!(f, "Low"),
            SatisfactionLabel::Medium => write!(f, "Medium"),
            SatisfactionLabel::High => write!(f, "High"),
            SatisfactionLabel::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Upper bounds (inclusive) for the `Low` and `Medium` buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelThresholds {
    pub low_max: f64,
    pub medium_max: f64,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            low_max: 4.0,
            medium_max: 7.0,
        }
    }
}

impl LabelThresholds {
    #[must_use]
    pub fn label(&self, score: Option<f64>) -> SatisfactionLabel {
        match score {
            Some(s) if s.is_nan() => SatisfactionLabel::Unknown,
            Some(s) if s <= self.low_max => SatisfactionLabel::Low,
            Some(s) if s <= self.medium_max => SatisfactionLabel::Medium,
            Some(_) => SatisfactionLabel::High,
            None => SatisfactionLabel::Unknown,
        }
    }
}

/// One output row: the input's passthrough columns plus the fuzzy score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub review: Option<String>,
    pub sentiment: Option<String>,
    pub review_length: usize,
    /// `None` when inference failed for the row.
    pub satisfaction_score: Option<f64>,
    pub fuzzy_satisfaction: SatisfactionLabel,
}

impl ScoredReview {
    #[must_use]
    pub fn new(record: ReviewRecord, score: Option<f64>, thresholds: &LabelThresholds) -> Self {
        let review_length = record.review_length();
        Self {
            product_id: record.product_id,
            product_title: record.product_title,
            category: record.category,
            review: record.review,
            sentiment: record.sentiment,
            review_length,
            satisfaction_score: score,
            fuzzy_satisfaction: thresholds.label(score),
        }
    }
}
