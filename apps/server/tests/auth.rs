mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use folioadvisor_ai::FakeRecommendationGenerator;
use folioadvisor_core::testing::fixtures::sample_plan;
use folioadvisor_storage_kv::memory_record_store;
use serde_json::json;

use common::{register, router_over, send};

fn app() -> axum::Router {
    router_over(
        memory_record_store(),
        Arc::new(FakeRecommendationGenerator::with_plan(sample_plan(1, 2))),
    )
}

#[tokio::test]
async fn register_then_login_and_access_protected_route() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "未授权访问");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": "alice", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("passwordHash").is_none());
    let user_id = body["user"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"].as_i64(), Some(user_id));
    assert!(body["user"].get("profile").is_none());
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/api/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["profile"].is_null());
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = app();
    register(&app, "alice", "secret1").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": "alice", "password": "another1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "用户名已存在");
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let app = app();
    register(&app, "alice", "secret1").await;

    let (wrong_status, wrong_body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "secret2" })),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "mallory", "password": "secret1" })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"], "用户名或密码错误");
}

#[tokio::test]
async fn registration_input_is_validated() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": "al", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "用户名至少3个字符");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": "alice", "password": "12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "密码至少6个字符");
}

#[tokio::test]
async fn forged_token_is_unauthorized() {
    let app = app();
    let token = register(&app, "alice", "secret1").await;
    let forged = format!("{token}x");

    let (status, body) = send(&app, Method::GET, "/api/history", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "未授权访问");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = app();
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
