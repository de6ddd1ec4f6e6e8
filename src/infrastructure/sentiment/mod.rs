//! Sentiment analysis services

mod engine;
mod factory;
mod inference;

pub use engine::{EngineConfig, SentimentEngine};
pub use factory::{build_engine, EngineRegistry};
pub use inference::{InferenceConfig, RetryPolicy, SentimentInference, StructuredInferenceClient};
