//! Engine construction and the process-scoped accessor

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::info;

use super::engine::{EngineConfig, SentimentEngine};
use super::inference::{InferenceConfig, StructuredInferenceClient};
use crate::config::AppConfig;
use crate::domain::DomainError;
use crate::infrastructure::cache::CacheFactory;
use crate::infrastructure::llm::LlmProviderFactory;

/// Build a fully wired engine from validated configuration
pub fn build_engine(config: &AppConfig) -> Result<SentimentEngine, DomainError> {
    config.check()?;

    let provider = LlmProviderFactory::create(&config.model)?;
    let inference = StructuredInferenceClient::new(provider, InferenceConfig::from(&config.model));
    let cache = CacheFactory::create(&config.cache);

    info!(
        model = %config.model.name,
        cache_enabled = config.cache.enabled,
        max_retries = config.model.max_retries,
        "Sentiment engine initialized"
    );

    Ok(SentimentEngine::new(
        Arc::new(inference),
        cache,
        EngineConfig::from(&config.cache),
    ))
}

/// Holds the single engine instance for a process
///
/// Initialisation runs at most once; later calls return the same engine
/// regardless of the configuration passed.
#[derive(Debug, Default)]
pub struct EngineRegistry {
    engine: OnceCell<Arc<SentimentEngine>>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_init(&self, config: &AppConfig) -> Result<Arc<SentimentEngine>, DomainError> {
        self.engine
            .get_or_try_init(|| build_engine(config).map(Arc::new))
            .cloned()
    }
}
