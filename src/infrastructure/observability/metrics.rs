//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::config::MetricsConfig;
use crate::domain::{SentimentLabel, Usage};

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Where a returned result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Cache,
    Model,
    Fallback,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Model => "model",
            Self::Fallback => "fallback",
        }
    }
}

/// Install the global Prometheus recorder
///
/// Returns `None` when metrics are disabled or a recorder is already
/// installed; the `record_*` helpers are no-ops without a recorder.
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("sentiment_gateway_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

pub fn record_cache_lookup(hit: bool) {
    if hit {
        counter!("sentiment_cache_hits_total").increment(1);
    } else {
        counter!("sentiment_cache_misses_total").increment(1);
    }
}

/// Record one structured inference call (all attempts included)
pub fn record_inference(model: &str, success: bool, attempts: u32, duration: Duration) {
    let labels = [
        ("model", model.to_string()),
        ("outcome", if success { "success" } else { "failure" }.to_string()),
    ];

    counter!("sentiment_inference_total", &labels).increment(1);
    histogram!("sentiment_inference_duration_seconds", &labels).record(duration.as_secs_f64());
    histogram!("sentiment_inference_attempts", &labels).record(f64::from(attempts));
}

/// Tokens billed for one provider call, counted on every attempt
pub fn record_token_usage(model: &str, usage: &Usage) {
    let labels = [("model", model.to_string())];

    counter!("llm_input_tokens_total", &labels).increment(u64::from(usage.prompt_tokens));
    counter!("llm_output_tokens_total", &labels).increment(u64::from(usage.completion_tokens));
}

pub fn record_fallback(reason_kind: &str) {
    counter!("sentiment_fallback_total", "reason" => reason_kind.to_string()).increment(1);
}

pub fn record_result(sentiment: SentimentLabel, source: ResultSource) {
    counter!(
        "sentiment_results_total",
        "sentiment" => sentiment.as_str(),
        "source" => source.as_str()
    )
    .increment(1);
}
