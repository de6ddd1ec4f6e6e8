//! Sentiment engine - cache, inference and fallback orchestration

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::inference::SentimentInference;
use crate::config::CacheConfig;
use crate::domain::{CacheStats, FallbackAnalyzer, NormalizedKey, ResultCache, SentimentResult};
use crate::infrastructure::logging::truncate_for_log;
use crate::infrastructure::observability::{
    record_cache_lookup, record_fallback, record_result, ResultSource,
};

const LOG_PREVIEW_CHARS: usize = 50;

/// Cache behaviour switches, read once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub cache_enabled: bool,
    pub cache_fallback_results: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_fallback_results: true,
        }
    }
}

impl From<&CacheConfig> for EngineConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            cache_enabled: config.enabled,
            cache_fallback_results: config.cache_fallback_results,
        }
    }
}

/// Long-lived, shared sentiment engine
///
/// Concurrent misses on the same key are not deduplicated: each caller runs
/// its own inference and the last cache write wins.
#[derive(Debug)]
pub struct SentimentEngine {
    inference: Arc<dyn SentimentInference>,
    fallback: FallbackAnalyzer,
    cache: Arc<dyn ResultCache>,
    config: EngineConfig,
}

impl SentimentEngine {
    pub fn new(
        inference: Arc<dyn SentimentInference>,
        cache: Arc<dyn ResultCache>,
        config: EngineConfig,
    ) -> Self {
        Self {
            inference,
            fallback: FallbackAnalyzer::new(),
            cache,
            config,
        }
    }

    /// Classify non-blank text; always yields a valid result
    ///
    /// `use_cache = false` skips the lookup only. The fresh result is still
    /// stored when caching is enabled.
    pub async fn analyze(&self, text: &str, use_cache: bool) -> SentimentResult {
        let key = NormalizedKey::from_text(text);
        let preview = truncate_for_log(text, LOG_PREVIEW_CHARS);

        if self.config.cache_enabled && use_cache {
            if let Some(hit) = self.lookup(&key).await {
                debug!(text = %preview, "Cache hit");
                record_cache_lookup(true);
                record_result(hit.sentiment(), ResultSource::Cache);
                return hit;
            }
            record_cache_lookup(false);
        }

        info!(text = %preview, "Analyzing sentiment");

        let (result, source) = match self.inference.infer(text).await {
            Ok(result) => {
                info!(
                    sentiment = %result.sentiment(),
                    confidence = result.confidence(),
                    "Sentiment analysis complete"
                );
                (result, ResultSource::Model)
            }
            Err(e) => {
                warn!(text = %preview, kind = e.kind(), error = %e, "Inference failed, using fallback");
                record_fallback(e.kind());
                (self.fallback.analyze(text, &e.to_string()), ResultSource::Fallback)
            }
        };

        if self.should_store(source) {
            self.store(key, result.clone()).await;
        }

        record_result(result.sentiment(), source);
        result
    }

    /// Current entry count and whether caching is active
    pub async fn cache_stats(&self) -> CacheStats {
        let size = match self.cache.size().await {
            Ok(size) => size,
            Err(e) => {
                warn!(error = %e, "Failed to read cache size");
                0
            }
        };

        CacheStats {
            size,
            enabled: self.config.cache_enabled,
        }
    }

    /// Empties the cache whether or not caching is enabled
    pub async fn clear_cache(&self) {
        match self.cache.clear().await {
            Ok(()) => info!("Cache cleared"),
            Err(e) => warn!(error = %e, "Failed to clear cache"),
        }
    }

    fn should_store(&self, source: ResultSource) -> bool {
        self.config.cache_enabled
            && (source == ResultSource::Model || self.config.cache_fallback_results)
    }

    async fn lookup(&self, key: &NormalizedKey) -> Option<SentimentResult> {
        match self.cache.get(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    async fn store(&self, key: NormalizedKey, result: SentimentResult) {
        if let Err(e) = self.cache.put(key, result).await {
            warn!(error = %e, "Cache write failed");
        }
    }
}
