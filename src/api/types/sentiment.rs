//! Sentiment endpoint request and response bodies

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::domain::{CacheStats, SentimentLabel, SentimentResult};

/// Upper bound on input length, in characters after trimming
pub const MAX_TEXT_CHARS: usize = 5000;

fn default_use_cache() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeSentimentRequest {
    pub text: String,
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

impl AnalyzeSentimentRequest {
    /// Trimmed input text, rejecting blank or oversized input
    pub fn validated_text(&self) -> Result<&str, ApiError> {
        let text = self.text.trim();

        if text.is_empty() {
            return Err(ApiError::unprocessable("Text cannot be empty or whitespace only")
                .with_param("text"));
        }

        let chars = text.chars().count();
        if chars > MAX_TEXT_CHARS {
            return Err(ApiError::unprocessable(format!(
                "Text must be at most {} characters (got {})",
                MAX_TEXT_CHARS, chars
            ))
            .with_param("text"));
        }

        Ok(text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResponse {
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub explanation: String,
}

impl From<SentimentResult> for SentimentResponse {
    fn from(result: SentimentResult) -> Self {
        Self {
            sentiment: result.sentiment(),
            confidence: result.confidence(),
            explanation: result.explanation().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStatsResponse {
    pub cache_size: usize,
    pub cache_enabled: bool,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            cache_size: stats.size,
            cache_enabled: stats.enabled,
        }
    }
}
