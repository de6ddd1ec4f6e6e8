//! HTTP request, response and error types

pub mod error;
pub mod json;
pub mod sentiment;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use sentiment::{AnalyzeSentimentRequest, CacheStatsResponse, SentimentResponse, MAX_TEXT_CHARS};
