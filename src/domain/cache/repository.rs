//! Result cache trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use serde::Serialize;

use super::NormalizedKey;
use crate::domain::sentiment::SentimentResult;
use crate::domain::DomainError;

/// Snapshot of cache state at the time of the call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub enabled: bool,
}

/// Memo table from normalized text to sentiment result
#[async_trait]
pub trait ResultCache: Send + Sync + Debug {
    /// Looks up a result without side effects
    async fn get(&self, key: &NormalizedKey) -> Result<Option<SentimentResult>, DomainError>;

    /// Stores a result, replacing any existing entry for the key
    async fn put(&self, key: NormalizedKey, result: SentimentResult) -> Result<(), DomainError>;

    /// Removes all entries
    async fn clear(&self) -> Result<(), DomainError>;

    /// Current number of entries
    async fn size(&self) -> Result<usize, DomainError>;
}
