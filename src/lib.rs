//! Sentiment Gateway
//!
//! Classifies text as positive, negative or neutral using a chat model
//! constrained to a strict JSON schema, with:
//! - a normalized-text result cache
//! - bounded retries for transient model failures
//! - a deterministic keyword fallback so every request gets an answer

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::{AppState, ServiceInfo};
use infrastructure::sentiment::EngineRegistry;

/// Create the application state around the process engine
pub fn create_app_state(config: &AppConfig, registry: &EngineRegistry) -> anyhow::Result<AppState> {
    let engine = registry.get_or_init(config)?;

    Ok(AppState::new(engine, ServiceInfo::from_config(config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_app_state_requires_api_key() {
        let registry = EngineRegistry::new();
        assert!(create_app_state(&AppConfig::default(), &registry).is_err());
    }

    #[tokio::test]
    async fn test_create_app_state() {
        let mut config = AppConfig::default();
        config.model.api_key = Some("sk-0123456789abcdefghijklmnop".to_string());
        let registry = EngineRegistry::new();

        let state = create_app_state(&config, &registry).unwrap();

        assert_eq!(state.info.environment, "development");
        assert_eq!(state.info.name, "Sentiment Analysis API");
        assert!(state.sentiment.cache_stats().await.enabled);
    }
}
