//! In-memory result cache using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::{NormalizedKey, ResultCache};
use crate::domain::{DomainError, SentimentResult};

/// Configuration for the in-memory result cache
#[derive(Debug, Clone, Default)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries; unbounded when `None`
    pub max_capacity: Option<u64>,
    /// Entry lifetime; entries live until cleared when `None`
    pub time_to_live: Option<Duration>,
}

impl InMemoryCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    pub fn with_time_to_live(mut self, ttl: Duration) -> Self {
        self.time_to_live = Some(ttl);
        self
    }
}

/// Thread-safe memo table keyed by normalized text
///
/// With the default configuration nothing is ever evicted, so the table
/// grows with the number of distinct normalized inputs until cleared.
#[derive(Debug, Clone)]
pub struct InMemoryResultCache {
    cache: MokaCache<String, SentimentResult>,
}

impl InMemoryResultCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let mut builder = MokaCache::builder();

        if let Some(capacity) = config.max_capacity {
            builder = builder.max_capacity(capacity);
        }

        if let Some(ttl) = config.time_to_live {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
        }
    }
}

impl Default for InMemoryResultCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultCache for InMemoryResultCache {
    async fn get(&self, key: &NormalizedKey) -> Result<Option<SentimentResult>, DomainError> {
        Ok(self.cache.get(key.as_str()).await)
    }

    async fn put(&self, key: NormalizedKey, result: SentimentResult) -> Result<(), DomainError> {
        self.cache.insert(key.into_inner(), result).await;
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.cache.invalidate_all();

        // Invalidated entries are evicted in batches; drain until the count stops falling
        let mut remaining = u64::MAX;
        loop {
            self.cache.run_pending_tasks().await;
            let count = self.cache.entry_count();
            if count == 0 || count >= remaining {
                break;
            }
            remaining = count;
        }

        Ok(())
    }

    async fn size(&self) -> Result<usize, DomainError> {
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count() as usize)
    }
}
