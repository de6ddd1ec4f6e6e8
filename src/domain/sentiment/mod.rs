//! Sentiment domain - result types, output contract and fallback heuristic

mod fallback;
mod label;
pub mod prompt;
mod result;
pub mod schema;

pub use fallback::FallbackAnalyzer;
pub use label::SentimentLabel;
pub use result::SentimentResult;
