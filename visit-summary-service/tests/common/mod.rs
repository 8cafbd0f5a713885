#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use secrecy::Secret;
use service_core::config::Config;
use std::sync::Arc;
use visit_summary_service::config::{
    Environment, HelloConfig, HttpConfig, OpenAiConfig, SummaryConfig,
};
use visit_summary_service::services::providers::mock::MockCompletionProvider;
use visit_summary_service::startup::{build_router, AppState};

pub const TEST_API_KEY: &str = "sk-test-0123456789";

pub fn test_config() -> SummaryConfig {
    SummaryConfig {
        common: Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            log_level: "error".to_string(),
            otlp_endpoint: None,
        },
        environment: Environment::Dev,
        openai: OpenAiConfig {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            timeout_secs: 5,
        },
        http: HttpConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
            max_visits_per_request: 5,
            max_body_bytes: 64 * 1024,
        },
        hello: HelloConfig {
            expose_key_prefix: false,
        },
    }
}

pub fn router_with(config: SummaryConfig, provider: Arc<MockCompletionProvider>) -> axum::Router {
    build_router(AppState::new(config, provider))
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
