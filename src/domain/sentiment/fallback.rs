//! Keyword heuristic used when model inference is unavailable

use super::{SentimentLabel, SentimentResult};

const POSITIVE_MARKERS: [&str; 7] = [
    "love",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "good",
    "best",
];

const NEGATIVE_MARKERS: [&str; 7] = [
    "hate",
    "terrible",
    "awful",
    "horrible",
    "worst",
    "bad",
    "disappointing",
];

const BASE_CONFIDENCE: f64 = 0.4;
const CONFIDENCE_PER_MARKER: f64 = 0.1;
const MAX_CONFIDENCE: f64 = 0.6;
const NEUTRAL_CONFIDENCE: f64 = 0.5;

/// Deterministic sentiment classifier with no external dependencies.
///
/// Each marker counts once when it appears anywhere in the lower-cased text,
/// so repeats do not raise the score and markers match inside longer words.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackAnalyzer;

impl FallbackAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str, failure_reason: &str) -> SentimentResult {
        tracing::warn!(reason = %failure_reason, "Using fallback analysis");

        let lowered = text.to_lowercase();
        let positive = count_markers(&lowered, &POSITIVE_MARKERS);
        let negative = count_markers(&lowered, &NEGATIVE_MARKERS);

        let (sentiment, confidence, explanation) = if positive > negative {
            (
                SentimentLabel::Positive,
                marker_confidence(positive),
                format!(
                    "Text contains {} positive keyword(s). (Fallback analysis)",
                    positive
                ),
            )
        } else if negative > positive {
            (
                SentimentLabel::Negative,
                marker_confidence(negative),
                format!(
                    "Text contains {} negative keyword(s). (Fallback analysis)",
                    negative
                ),
            )
        } else {
            (
                SentimentLabel::Neutral,
                NEUTRAL_CONFIDENCE,
                "No strong sentiment indicators detected. (Fallback analysis)".to_string(),
            )
        };

        SentimentResult::new_unchecked(sentiment, confidence, explanation)
    }
}

fn count_markers(lowered: &str, markers: &[&str]) -> usize {
    markers
        .iter()
        .filter(|marker| lowered.contains(*marker))
        .count()
}

fn marker_confidence(count: usize) -> f64 {
    (BASE_CONFIDENCE + count as f64 * CONFIDENCE_PER_MARKER).min(MAX_CONFIDENCE)
}
