#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use folioadvisor_ai::{FakeRecommendationGenerator, RecommendationGeneratorTrait};
use folioadvisor_core::RecordStore;
use folioadvisor_server::{api::app_router, build_state_with_generator, config::Config};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub fn test_config() -> Config {
    let mut config = Config::in_memory();
    config.jwt_secret = Some(TEST_SECRET.to_string());
    config
}

pub fn router_over(store: RecordStore, generator: Arc<FakeRecommendationGenerator>) -> Router {
    let config = test_config();
    let generator: Arc<dyn RecommendationGeneratorTrait> = generator;
    let state = build_state_with_generator(&config, store, generator).unwrap();
    app_router(state, &config)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Registers `username` and returns its token.
pub async fn register(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

/// A validly signed token for a user id that may not exist in the store.
pub fn token_for(user_id: i64, username: &str) -> String {
    let config = folioadvisor_server::auth::AuthConfig::from_secret(Some(TEST_SECRET)).unwrap();
    folioadvisor_server::auth::CredentialManager::new(&config)
        .issue_token(user_id, username)
        .unwrap()
}
