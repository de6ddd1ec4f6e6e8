use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::sentiment;
use super::state::AppState;
use super::types::ApiError;
use crate::config::{MetricsConfig, ServerConfig};
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create the router with all endpoints and per-request middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/analyze-sentiment", post(sentiment::analyze_sentiment))
        .route("/cache/stats", get(sentiment::cache_stats))
        .route("/cache/clear", post(sentiment::clear_cache))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Full application: endpoints plus metrics, CORS and body limit
pub fn create_app_router(
    state: AppState,
    server: &ServerConfig,
    metrics_config: &MetricsConfig,
    metrics: Option<PrometheusMetrics>,
) -> Router {
    let mut router = create_router(state);

    if let Some(metrics) = metrics {
        router = router.merge(create_metrics_router(metrics, &metrics_config.path));
    }

    router
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(cors_layer(&server.allowed_origins))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::api::state::ServiceInfo;
    use crate::domain::llm::MockLlmProvider;
    use crate::infrastructure::cache::InMemoryResultCache;
    use crate::infrastructure::sentiment::{
        EngineConfig, InferenceConfig, RetryPolicy, SentimentEngine, StructuredInferenceClient,
    };

    const POSITIVE: &str =
        r#"{"sentiment": "positive", "confidence": 0.95, "explanation": "Strong praise."}"#;

    fn state_with(provider: Arc<MockLlmProvider>, config: EngineConfig) -> AppState {
        let inference = StructuredInferenceClient::new(
            provider,
            InferenceConfig {
                model: "gpt-4o-mini".to_string(),
                temperature: 0.3,
                max_tokens: 150,
                timeout: std::time::Duration::from_secs(5),
                retry: RetryPolicy::new(0),
            },
        );
        let engine = SentimentEngine::new(
            Arc::new(inference),
            Arc::new(InMemoryResultCache::new()),
            config,
        );

        AppState::new(
            Arc::new(engine),
            ServiceInfo {
                name: "Sentiment Analysis API".to_string(),
                version: "1.0.0".to_string(),
                environment: "development".to_string(),
            },
        )
    }

    fn app() -> (Router, Arc<MockLlmProvider>) {
        let provider = Arc::new(MockLlmProvider::new("mock").with_content(POSITIVE));
        let state = state_with(provider.clone(), EngineConfig::default());
        let router = create_app_router(
            state,
            &ServerConfig::default(),
            &MetricsConfig::default(),
            None,
        );
        (router, provider)
    }

    fn analyze(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze-sentiment")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_sentiment() {
        let (app, _) = app();

        let response = app
            .oneshot(analyze(r#"{"text": "I love this product! It's amazing!"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["sentiment"], "positive");
        assert_eq!(json["confidence"], 0.95);
        assert_eq!(json["explanation"], "Strong praise.");
    }

    #[tokio::test]
    async fn test_analyze_trims_text_and_uses_cache() {
        let (app, provider) = app();

        for body in [r#"{"text": "  Great  "}"#, r#"{"text": "great"}"#] {
            let response = app.clone().oneshot(analyze(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        assert_eq!(provider.call_count(), 1);
        let request = provider.last_request().unwrap();
        assert!(request.messages[1].content().ends_with(": Great"));
    }

    #[tokio::test]
    async fn test_use_cache_false_bypasses_lookup() {
        let (app, provider) = app();

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(analyze(r#"{"text": "great", "use_cache": false}"#))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_invalid_inputs_are_422() {
        let too_long = format!(r#"{{"text": "{}"}}"#, "a".repeat(5001));
        let bodies = [
            r#"{"text": ""}"#.to_string(),
            r#"{"text": "   "}"#.to_string(),
            r#"{"use_cache": true}"#.to_string(),
            r#"{"text": 42}"#.to_string(),
            "{broken".to_string(),
            too_long,
        ];

        for body in bodies {
            let (app, provider) = app();
            let response = app.oneshot(analyze(&body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "body: {}", body);
            let json = body_json(response).await;
            assert_eq!(json["error"]["type"], "invalid_request_error");
            assert_eq!(provider.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_model_failure_still_returns_200() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_error("invalid api key"));
        let state = state_with(provider, EngineConfig::default());
        let app = create_router(state);

        let response = app
            .oneshot(analyze(r#"{"text": "This is terrible and bad"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["sentiment"], "negative");
        assert_eq!(json["confidence"], 0.6);
    }

    #[tokio::test]
    async fn test_cache_stats_and_clear() {
        let (app, _) = app();

        app.clone()
            .oneshot(analyze(r#"{"text": "great"}"#))
            .await
            .unwrap();

        let response = app.clone().oneshot(get("/cache/stats")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["cache_size"], 1);
        assert_eq!(json["cache_enabled"], true);

        let clear = Request::builder()
            .method("POST")
            .uri("/cache/clear")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(clear).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let json = body_json(app.oneshot(get("/cache/stats")).await.unwrap()).await;
        assert_eq!(json["cache_size"], 0);
    }

    #[tokio::test]
    async fn test_cache_stats_when_disabled() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_content(POSITIVE));
        let config = EngineConfig {
            cache_enabled: false,
            cache_fallback_results: true,
        };
        let app = create_router(state_with(provider, config));

        let json = body_json(app.oneshot(get("/cache/stats")).await.unwrap()).await;
        assert_eq!(json["cache_size"], 0);
        assert_eq!(json["cache_enabled"], false);
    }

    #[tokio::test]
    async fn test_health_and_info() {
        let (app, _) = app();

        let response = app.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["environment"], "development");

        let response = app.clone().oneshot(get("/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(app.oneshot(get("/")).await.unwrap()).await;
        assert_eq!(json["name"], "Sentiment Analysis API");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (app, _) = app();

        let response = app.oneshot(get("/nope")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["type"], "not_found_error");
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let (app, _) = app();
        let request = Request::builder()
            .uri("/health")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }

    #[tokio::test]
    async fn test_body_limit() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_content(POSITIVE));
        let server = ServerConfig {
            body_limit_bytes: 1024,
            ..ServerConfig::default()
        };
        let app = create_app_router(
            state_with(provider, EngineConfig::default()),
            &server,
            &MetricsConfig::default(),
            None,
        );

        let body = format!(r#"{{"text": "{}"}}"#, "a".repeat(2048));
        let response = app.oneshot(analyze(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_cors_preflight_for_allowed_origin() {
        let (app, _) = app();
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/analyze-sentiment")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
    }
}
