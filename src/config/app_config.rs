use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use validator::Validate;

use crate::domain::DomainError;
use crate::infrastructure::llm::DEFAULT_OPENAI_BASE_URL;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Validate, Default)]
#[serde(default)]
pub struct AppConfig {
    #[validate(nested)]
    pub app: AppInfoConfig,
    #[validate(nested)]
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[validate(nested)]
    pub model: ModelConfig,
    #[validate(nested)]
    pub cache: CacheConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct AppInfoConfig {
    #[validate(length(min = 1))]
    pub name: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// CORS origins; an empty list disables cross-origin access
    pub allowed_origins: Vec<String>,
    #[validate(range(min = 1024))]
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

/// Minimum level for the service's own logs
///
/// Uppercase spellings and the `warning`/`critical` names are accepted so
/// that conventional `LOG_LEVEL` values work unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[serde(alias = "TRACE")]
    Trace,
    #[serde(alias = "DEBUG")]
    Debug,
    #[default]
    #[serde(alias = "INFO")]
    Info,
    #[serde(alias = "WARN", alias = "warning", alias = "WARNING")]
    Warn,
    #[serde(alias = "ERROR", alias = "critical", alias = "CRITICAL")]
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// External model settings
#[derive(Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ModelConfig {
    #[validate(url)]
    pub base_url: String,
    #[validate(length(min = 20, message = "API key looks too short"))]
    pub api_key: Option<String>,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    #[validate(range(min = 50, max = 500))]
    pub max_tokens: u32,
    #[validate(range(min = 10, max = 120))]
    pub timeout_secs: u64,
    #[validate(range(min = 1, max = 10))]
    pub max_retries: u32,
    pub retry_initial_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

impl ModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn require_api_key(&self) -> Result<&str, DomainError> {
        self.api_key.as_deref().ok_or_else(|| {
            DomainError::configuration(
                "model API key is not set (model.api_key, APP__MODEL__API_KEY or OPENAI_API_KEY)",
            )
        })
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("name", &self.name)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_initial_delay_ms", &self.retry_initial_delay_ms)
            .field("retry_max_delay_ms", &self.retry_max_delay_ms)
            .finish()
    }
}

/// Result cache settings
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Upper bound on entries; unbounded when unset
    #[validate(range(min = 1))]
    pub max_entries: Option<u64>,
    /// Entry lifetime; entries never expire when unset
    #[validate(range(min = 1))]
    pub ttl_secs: Option<u64>,
    /// Whether degraded fallback results are memoized like model results
    pub cache_fallback_results: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for AppInfoConfig {
    fn default() -> Self {
        Self {
            name: "Sentiment Analysis API".to_string(),
            environment: Environment::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:8000".to_string(),
            ],
            body_limit_bytes: 64 * 1024,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key: None,
            name: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_tokens: 150,
            timeout_secs: 30,
            max_retries: 3,
            retry_initial_delay_ms: 500,
            retry_max_delay_ms: 8_000,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: None,
            ttl_secs: None,
            cache_fallback_results: true,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads and validates configuration from files and the environment
    pub fn load() -> Result<Self, DomainError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| DomainError::configuration(e.to_string()))?;

        let mut config: AppConfig = config
            .try_deserialize()
            .map_err(|e| DomainError::configuration(e.to_string()))?;

        if config.model.api_key.is_none() {
            config.model.api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        config.check()?;
        Ok(config)
    }

    /// Runs the declarative validation rules
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::configuration(format!("Invalid configuration: {}", e)))
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == Environment::Production
    }
}
