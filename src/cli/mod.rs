//! CLI module for the sentiment gateway
//!
//! - `serve`: run the HTTP API
//! - `analyze`: classify texts from the command line

pub mod analyze;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::{AppConfig, LogFormat, LoggingConfig};
use crate::infrastructure::logging;

/// Sentiment analysis over a chat model with caching and keyword fallback
#[derive(Parser)]
#[command(name = "sentiment-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Analyze one or more texts and print the results as JSON
    Analyze(analyze::AnalyzeArgs),
}

/// Load `.env`, configuration and logging shared by all commands
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Production always logs structured JSON
    let format = if config.is_production() {
        LogFormat::Json
    } else {
        config.logging.format.clone()
    };
    logging::init_logging(&LoggingConfig {
        level: config.logging.level,
        format,
    });

    Ok(config)
}
