//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AppInfoConfig, CacheConfig, Environment, LogFormat, LogLevel, LoggingConfig,
    MetricsConfig, ModelConfig, ServerConfig,
};
