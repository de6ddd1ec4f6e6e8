//! Observability infrastructure - Prometheus metrics

mod metrics;

pub use metrics::{
    create_metrics_router, init_metrics, record_cache_lookup, record_fallback,
    record_http_request, record_inference, record_result, record_token_usage, PrometheusMetrics,
    ResultSource,
};
