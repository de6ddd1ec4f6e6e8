//! Sentiment analysis and cache management endpoints

use axum::{extract::State, http::StatusCode};
use tracing::info;

use super::state::AppState;
use super::types::{AnalyzeSentimentRequest, ApiError, CacheStatsResponse, Json, SentimentResponse};
use crate::infrastructure::logging::truncate_for_log;

/// POST /analyze-sentiment
pub async fn analyze_sentiment(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeSentimentRequest>,
) -> Result<Json<SentimentResponse>, ApiError> {
    let text = request.validated_text()?;

    info!(
        text = %truncate_for_log(text, 50),
        use_cache = request.use_cache,
        "Received sentiment analysis request"
    );

    let result = state.sentiment.analyze(text, request.use_cache).await;

    Ok(Json(result.into()))
}

/// GET /cache/stats
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(state.sentiment.cache_stats().await.into())
}

/// POST /cache/clear
pub async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.sentiment.clear_cache().await;
    StatusCode::NO_CONTENT
}
