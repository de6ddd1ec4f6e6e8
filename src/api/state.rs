//! Application state for shared services

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::AppConfig;
use crate::domain::{CacheStats, SentimentResult};
use crate::infrastructure::sentiment::SentimentEngine;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub sentiment: Arc<dyn SentimentServiceTrait>,
    pub info: ServiceInfo,
}

impl AppState {
    pub fn new(sentiment: Arc<dyn SentimentServiceTrait>, info: ServiceInfo) -> Self {
        Self { sentiment, info }
    }
}

/// Static service metadata reported by `/` and `/health`
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
}

impl ServiceInfo {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            name: config.app.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: config.app.environment.to_string(),
        }
    }
}

/// Trait for sentiment service operations
#[async_trait]
pub trait SentimentServiceTrait: Send + Sync {
    async fn analyze(&self, text: &str, use_cache: bool) -> SentimentResult;
    async fn cache_stats(&self) -> CacheStats;
    async fn clear_cache(&self);
}

#[async_trait]
impl SentimentServiceTrait for SentimentEngine {
    async fn analyze(&self, text: &str, use_cache: bool) -> SentimentResult {
        SentimentEngine::analyze(self, text, use_cache).await
    }

    async fn cache_stats(&self) -> CacheStats {
        SentimentEngine::cache_stats(self).await
    }

    async fn clear_cache(&self) {
        SentimentEngine::clear_cache(self).await
    }
}
