//! Analyze command - one-shot classification from the command line

use clap::Args;
use futures::future::join_all;
use serde::Serialize;

use crate::api::types::{SentimentResponse, MAX_TEXT_CHARS};
use crate::infrastructure::sentiment::{EngineRegistry, SentimentEngine};

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Texts to analyze; each is classified independently
    #[arg(required = true)]
    pub texts: Vec<String>,

    /// Skip the cache lookup
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Debug, Serialize)]
struct AnalyzeOutput {
    text: String,
    #[serde(flatten)]
    result: SentimentResponse,
}

pub async fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let registry = EngineRegistry::new();
    let engine = registry.get_or_init(&config)?;

    let outputs = analyze_all(&engine, &args.texts, !args.no_cache).await?;
    println!("{}", serde_json::to_string_pretty(&outputs)?);

    Ok(())
}

async fn analyze_all(
    engine: &SentimentEngine,
    texts: &[String],
    use_cache: bool,
) -> anyhow::Result<Vec<AnalyzeOutput>> {
    let texts = texts
        .iter()
        .map(String::as_str)
        .map(validate)
        .collect::<anyhow::Result<Vec<_>>>()?;

    let results = join_all(texts.iter().map(|text| engine.analyze(text, use_cache))).await;

    Ok(texts
        .into_iter()
        .zip(results)
        .map(|(text, result)| AnalyzeOutput {
            text: text.to_string(),
            result: result.into(),
        })
        .collect())
}

fn validate(text: &str) -> anyhow::Result<&str> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        anyhow::bail!("Text cannot be empty or whitespace only");
    }

    if trimmed.chars().count() > MAX_TEXT_CHARS {
        anyhow::bail!("Text must be at most {} characters", MAX_TEXT_CHARS);
    }

    Ok(trimmed)
}
