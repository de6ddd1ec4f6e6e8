//! Instruction template for sentiment inference

use super::schema;

const SYSTEM_TEMPLATE: &str = "You are an expert sentiment analyzer. Analyze the sentiment of the given text \
and respond with a JSON object containing:
- sentiment: one of \"positive\", \"negative\", or \"neutral\"
- confidence: a number between 0 and 1 indicating your confidence
- explanation: a brief (1-2 sentences) explanation of your analysis

Be precise and objective in your analysis. Consider:
- Emotional tone and word choice
- Context and implied meaning
- Overall message and intent

{format_instructions}";

/// System message with the output format instructions filled in
pub fn system_prompt() -> String {
    SYSTEM_TEMPLATE.replace("{format_instructions}", &schema::format_instructions())
}

/// User message carrying the text to classify
pub fn user_prompt(text: &str) -> String {
    format!("Analyze the sentiment of this text: {}", text)
}
