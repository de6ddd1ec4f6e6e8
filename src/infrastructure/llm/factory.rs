use std::sync::Arc;

use super::http_client::HttpClient;
use super::OpenAiProvider;
use crate::config::ModelConfig;
use crate::domain::{DomainError, LlmProvider};

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create the configured chat provider
    ///
    /// The HTTP client carries the per-attempt timeout so a hung connection
    /// surfaces as a transient `Timeout` error.
    pub fn create(config: &ModelConfig) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let api_key = config.require_api_key()?;
        let http_client = HttpClient::with_timeout(config.timeout())?;

        let provider = OpenAiProvider::with_base_url(http_client, api_key, &config.base_url);
        Ok(Arc::new(provider))
    }
}
