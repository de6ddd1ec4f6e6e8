//! Cache factory

use std::sync::Arc;
use std::time::Duration;

use super::in_memory::{InMemoryCacheConfig, InMemoryResultCache};
use crate::config::CacheConfig;
use crate::domain::ResultCache;

/// Factory for creating the result cache from configuration
#[derive(Debug)]
pub struct CacheFactory;

impl CacheFactory {
    pub fn create(config: &CacheConfig) -> Arc<dyn ResultCache> {
        let mut cache_config = InMemoryCacheConfig::default();

        if let Some(max_entries) = config.max_entries {
            cache_config = cache_config.with_max_capacity(max_entries);
        }

        if let Some(ttl_secs) = config.ttl_secs {
            cache_config = cache_config.with_time_to_live(Duration::from_secs(ttl_secs));
        }

        Arc::new(InMemoryResultCache::with_config(cache_config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NormalizedKey, SentimentLabel, SentimentResult};

    #[tokio::test]
    async fn test_create_bounded_cache() {
        let config = CacheConfig {
            max_entries: Some(10),
            ttl_secs: Some(60),
            ..CacheConfig::default()
        };
        let cache = CacheFactory::create(&config);

        let result = SentimentResult::new(SentimentLabel::Neutral, 0.5, "ok").unwrap();
        cache
            .put(NormalizedKey::from_text("text"), result)
            .await
            .unwrap();

        assert_eq!(cache.size().await.unwrap(), 1);
    }
}
