use serde::{Deserialize, Serialize};

use super::SentimentLabel;
use crate::domain::DomainError;

/// Validated sentiment judgment.
///
/// Construction is the only way to obtain a value, so `confidence` is always
/// within `0.0..=1.0` and `explanation` is never blank. Deserialization goes
/// through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSentimentResult")]
pub struct SentimentResult {
    sentiment: SentimentLabel,
    confidence: f64,
    explanation: String,
}

impl SentimentResult {
    pub fn new(
        sentiment: SentimentLabel,
        confidence: f64,
        explanation: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let explanation = explanation.into();

        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(DomainError::schema(format!(
                "confidence must be within [0.0, 1.0], got {}",
                confidence
            )));
        }

        if explanation.trim().is_empty() {
            return Err(DomainError::schema("explanation must not be empty"));
        }

        Ok(Self {
            sentiment,
            confidence,
            explanation,
        })
    }

    /// Builds a result from values already known to satisfy the invariants
    pub(super) fn new_unchecked(
        sentiment: SentimentLabel,
        confidence: f64,
        explanation: String,
    ) -> Self {
        debug_assert!((0.0..=1.0).contains(&confidence));
        debug_assert!(!explanation.trim().is_empty());

        Self {
            sentiment,
            confidence,
            explanation,
        }
    }

    pub fn sentiment(&self) -> SentimentLabel {
        self.sentiment
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Unchecked wire shape of a sentiment result
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSentimentResult {
    sentiment: SentimentLabel,
    confidence: f64,
    explanation: String,
}

impl TryFrom<RawSentimentResult> for SentimentResult {
    type Error = DomainError;

    fn try_from(raw: RawSentimentResult) -> Result<Self, Self::Error> {
        Self::new(raw.sentiment, raw.confidence, raw.explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_result() {
        let result =
            SentimentResult::new(SentimentLabel::Positive, 0.95, "Strongly positive wording.")
                .unwrap();

        assert_eq!(result.sentiment(), SentimentLabel::Positive);
        assert_eq!(result.confidence(), 0.95);
        assert_eq!(result.explanation(), "Strongly positive wording.");
    }

    #[test]
    fn test_confidence_bounds_are_inclusive() {
        assert!(SentimentResult::new(SentimentLabel::Neutral, 0.0, "x").is_ok());
        assert!(SentimentResult::new(SentimentLabel::Neutral, 1.0, "x").is_ok());
    }

    #[test]
    fn test_confidence_out_of_bounds_is_rejected() {
        assert!(SentimentResult::new(SentimentLabel::Neutral, 1.01, "x").is_err());
        assert!(SentimentResult::new(SentimentLabel::Neutral, -0.1, "x").is_err());
        assert!(SentimentResult::new(SentimentLabel::Neutral, f64::NAN, "x").is_err());
        assert!(SentimentResult::new(SentimentLabel::Neutral, f64::INFINITY, "x").is_err());
    }

    #[test]
    fn test_blank_explanation_is_rejected() {
        let err = SentimentResult::new(SentimentLabel::Negative, 0.5, "   ").unwrap_err();
        assert!(matches!(err, DomainError::Schema { .. }));
    }

    #[test]
    fn test_deserialization_enforces_invariants() {
        let ok: SentimentResult = serde_json::from_str(
            r#"{"sentiment":"negative","confidence":0.8,"explanation":"Complaint."}"#,
        )
        .unwrap();
        assert_eq!(ok.sentiment(), SentimentLabel::Negative);

        let out_of_range = serde_json::from_str::<SentimentResult>(
            r#"{"sentiment":"negative","confidence":1.8,"explanation":"Complaint."}"#,
        );
        assert!(out_of_range.is_err());
    }

    #[test]
    fn test_serialization_shape() {
        let result = SentimentResult::new(SentimentLabel::Neutral, 0.5, "Flat tone.").unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["sentiment"], "neutral");
        assert_eq!(json["confidence"], 0.5);
        assert_eq!(json["explanation"], "Flat tone.");
    }
}
