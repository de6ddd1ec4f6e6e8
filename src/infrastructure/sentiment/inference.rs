//! Structured inference client - prompt, call, validate, retry

use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::ModelConfig;
use crate::domain::sentiment::{prompt, schema};
use crate::domain::{DomainError, LlmProvider, LlmRequest, SentimentResult};
use crate::infrastructure::observability::{record_inference, record_token_usage};

/// Backoff schedule for transient failures
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 500,
            max_delay_ms: 8_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    pub fn with_initial_delay(mut self, ms: u64) -> Self {
        self.initial_delay_ms = ms;
        self
    }

    pub fn with_max_delay(mut self, ms: u64) -> Self {
        self.max_delay_ms = ms;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry number `retry` (0-indexed)
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(retry as i32);
        let delay_ms = delay.min(self.max_delay_ms as f64) as u64;

        Duration::from_millis(delay_ms)
    }
}

/// Generation settings fixed at construction
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Bound on each individual attempt
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl From<&ModelConfig> for InferenceConfig {
    fn from(config: &ModelConfig) -> Self {
        Self {
            model: config.name.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.timeout(),
            retry: RetryPolicy::new(config.max_retries)
                .with_initial_delay(config.retry_initial_delay_ms)
                .with_max_delay(config.retry_max_delay_ms),
        }
    }
}

/// Primary classification path
///
/// Implementations either return a fully validated result or an error; they
/// never fall back on their own.
#[async_trait]
pub trait SentimentInference: Send + Sync + Debug {
    async fn infer(&self, text: &str) -> Result<SentimentResult, DomainError>;
}

/// Inference over a chat model constrained to the three-field output schema
#[derive(Debug)]
pub struct StructuredInferenceClient {
    provider: Arc<dyn LlmProvider>,
    config: InferenceConfig,
}

impl StructuredInferenceClient {
    pub fn new(provider: Arc<dyn LlmProvider>, config: InferenceConfig) -> Self {
        Self { provider, config }
    }

    fn build_request(&self, text: &str) -> LlmRequest {
        LlmRequest::builder()
            .system(prompt::system_prompt())
            .user(prompt::user_prompt(text))
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .response_format(schema::response_format())
            .build()
    }

    async fn attempt(&self, request: LlmRequest) -> Result<SentimentResult, DomainError> {
        let call = self.provider.chat(&self.config.model, request);

        let response = match timeout(self.config.timeout, call).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(DomainError::timeout(
                    self.provider.provider_name(),
                    self.config.timeout.as_millis() as u64,
                ))
            }
        };

        if let Some(usage) = &response.usage {
            record_token_usage(&self.config.model, usage);
        }

        if response.is_truncated() {
            return Err(DomainError::schema(format!(
                "Model output truncated at {} tokens",
                self.config.max_tokens
            )));
        }

        schema::parse_output(response.content())
    }
}

#[async_trait]
impl SentimentInference for StructuredInferenceClient {
    async fn infer(&self, text: &str) -> Result<SentimentResult, DomainError> {
        let start = Instant::now();
        let request = self.build_request(text);
        let max_attempts = self.config.retry.max_attempts();

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let delay = self.config.retry.delay_for_retry(attempt - 1);
                debug!(attempt = attempt + 1, delay_ms = delay.as_millis() as u64, "Retrying inference");
                tokio::time::sleep(delay).await;
            }

            match self.attempt(request.clone()).await {
                Ok(result) => {
                    record_inference(&self.config.model, true, attempt + 1, start.elapsed());
                    return Ok(result);
                }
                Err(e) if e.is_transient() && attempt + 1 < max_attempts => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        error = %e,
                        "Transient inference failure"
                    );
                }
                Err(e) => {
                    record_inference(&self.config.model, false, attempt + 1, start.elapsed());
                    return Err(e);
                }
            }
        }

        Err(DomainError::internal("No inference attempts were made"))
    }
}
