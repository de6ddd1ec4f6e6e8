//! Structured output contract between the engine and the model

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use super::SentimentResult;
use crate::domain::llm::{LlmJsonSchema, LlmResponseFormat};
use crate::domain::DomainError;

pub const OUTPUT_SCHEMA_NAME: &str = "sentiment_result";

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[a-zA-Z]*\s*(.*?)\s*```$").expect("code fence pattern is valid")
});

/// JSON schema describing the three required output fields
pub fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "sentiment": {
                "type": "string",
                "enum": ["positive", "negative", "neutral"],
                "description": "The sentiment: positive, negative, or neutral"
            },
            "confidence": {
                "type": "number",
                "description": "Confidence score between 0 and 1"
            },
            "explanation": {
                "type": "string",
                "description": "Brief explanation of the sentiment"
            }
        },
        "required": ["sentiment", "confidence", "explanation"],
        "additionalProperties": false
    })
}

/// Response format asking the provider to enforce the output schema
pub fn response_format() -> LlmResponseFormat {
    LlmResponseFormat::JsonSchema {
        json_schema: LlmJsonSchema {
            name: OUTPUT_SCHEMA_NAME.to_string(),
            strict: true,
            schema: output_schema(),
        },
    }
}

/// Human-readable format instructions embedded in the system prompt
pub fn format_instructions() -> String {
    format!(
        "The output must be a single JSON object conforming to this JSON schema, with no other text:\n{}",
        output_schema()
    )
}

/// Parses raw model output into a validated result.
///
/// A surrounding Markdown code fence is stripped; the object itself must
/// decode into the three fields with an allowed label and an in-range
/// confidence. Nothing is coerced.
pub fn parse_output(content: &str) -> Result<SentimentResult, DomainError> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Err(DomainError::schema("model returned empty output"));
    }

    let payload = CODE_FENCE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(trimmed);

    serde_json::from_str::<SentimentResult>(payload)
        .map_err(|e| DomainError::schema(format!("Failed to parse model output: {}", e)))
}
