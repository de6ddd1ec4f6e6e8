//! Domain layer - Core business logic and entities

pub mod cache;
pub mod error;
pub mod llm;
pub mod sentiment;

pub use cache::{normalize, CacheStats, NormalizedKey, ResultCache};
pub use error::DomainError;
pub use llm::{
    FinishReason, LlmJsonSchema, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse,
    LlmResponseFormat, Message, MessageRole, Usage,
};
pub use sentiment::{FallbackAnalyzer, SentimentLabel, SentimentResult};
