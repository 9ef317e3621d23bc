mod common;

use std::sync::Arc;

use axum::{
    http::{Method, StatusCode},
    Router,
};
use folioadvisor_ai::FakeRecommendationGenerator;
use folioadvisor_core::{testing::fixtures::sample_plan, RecordStore};
use folioadvisor_storage_kv::memory_record_store;
use serde_json::{json, Value};
use tempfile::TempDir;

use common::{register, router_over, send, token_for};

fn profile_body() -> Value {
    json!({
        "riskPreference": "稳健",
        "investmentAmount": 100000,
        "investmentPeriod": "1-3年",
        "investmentGoal": "稳健收益"
    })
}

fn project_body(name: &str, kind: &str, risk: i64, ret: f64, threshold: f64) -> Value {
    json!({
        "name": name,
        "type": kind,
        "riskLevel": risk,
        "expectedReturn": ret,
        "investmentThreshold": threshold,
        "description": format!("{name} 说明")
    })
}

async fn create_project(app: &Router, token: &str, body: Value) -> i64 {
    let (status, resp) = send(app, Method::POST, "/api/projects", Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::OK, "create project failed: {resp}");
    assert_eq!(resp["success"], true);
    resp["project"]["id"].as_i64().unwrap()
}

async fn alice_scenario(store: RecordStore) {
    let generator = Arc::new(FakeRecommendationGenerator::with_plan(sample_plan(1, 2)));
    let app = router_over(store, Arc::clone(&generator));

    register(&app, "alice", "secret1").await;
    let (status, login) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().unwrap().to_string();

    let (status, saved) = send(
        &app,
        Method::POST,
        "/api/profile",
        Some(&token),
        Some(profile_body()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["success"], true);

    let (status, fetched) = send(&app, Method::GET, "/api/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["profile"], saved["profile"]);
    assert_eq!(fetched["profile"]["riskPreference"], "稳健");
    assert_eq!(fetched["profile"]["investmentAmount"], 100000.0);
    assert_eq!(fetched["profile"]["investmentPeriod"], "1-3年");
    assert_eq!(fetched["profile"]["investmentGoal"], "稳健收益");

    create_project(&app, &token, project_body("国债A", "债券", 1, 3.1, 1000.0)).await;
    create_project(&app, &token, project_body("蓝筹股B", "股票", 4, 12.7, 10000.0)).await;

    let (status, rec) = send(
        &app,
        Method::POST,
        "/api/recommend",
        Some(&token),
        Some(json!({ "apiKey": "sk-test", "saveToHistory": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "recommend failed: {rec}");
    assert_eq!(rec["success"], true);
    assert_eq!(rec["saved"], true);
    let saved_id = rec["savedId"].as_i64().unwrap();
    assert_eq!(generator.calls(), 1);

    let (status, history) = send(&app, Method::GET, "/api/history", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = history["recommendations"].as_array().unwrap();
    assert_eq!(entries.len(), 1);

    let expected = serde_json::to_value(sample_plan(1, 2)).unwrap();
    let entry = &entries[0];
    assert_eq!(entry["id"].as_i64(), Some(saved_id));
    for field in [
        "overallExpectedReturn",
        "overallRiskLevel",
        "matchScore",
        "projectAllocations",
        "reasoning",
    ] {
        assert_eq!(entry[field], expected[field], "field {field} differs");
    }
    assert_eq!(rec["recommendation"], expected);
}

#[tokio::test(flavor = "multi_thread")]
async fn alice_end_to_end_in_memory() {
    alice_scenario(memory_record_store()).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn alice_end_to_end_on_sqlite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("e2e.db");
    let store = folioadvisor_storage_sqlite::open_record_store(path.to_str().unwrap()).unwrap();
    alice_scenario(store).await;
}

#[tokio::test]
async fn recommend_preconditions_are_checked_in_order() {
    let generator = Arc::new(FakeRecommendationGenerator::with_plan(sample_plan(1, 2)));
    let app = router_over(memory_record_store(), Arc::clone(&generator));
    let token = register(&app, "bob", "secret1").await;

    let cases = [
        (json!({ "saveToHistory": true }), "请提供 OpenAI API Key"),
        (json!({ "apiKey": "  " }), "请提供 OpenAI API Key"),
        (json!({ "apiKey": "sk-test" }), "请先完善投资画像"),
    ];
    for (body, message) in cases {
        let (status, resp) =
            send(&app, Method::POST, "/api/recommend", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["error"], message);
    }

    send(&app, Method::POST, "/api/profile", Some(&token), Some(profile_body())).await;
    let (status, resp) = send(
        &app,
        Method::POST,
        "/api/recommend",
        Some(&token),
        Some(json!({ "apiKey": "sk-test" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], "项目库为空，无法生成推荐");
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn recommendation_without_save_leaves_history_empty() {
    let app = router_over(
        memory_record_store(),
        Arc::new(FakeRecommendationGenerator::with_plan(sample_plan(1, 2))),
    );
    let token = register(&app, "carol", "secret1").await;
    send(&app, Method::POST, "/api/profile", Some(&token), Some(profile_body())).await;
    create_project(&app, &token, project_body("货币基金", "基金", 1, 2.0, 100.0)).await;

    let (status, rec) = send(
        &app,
        Method::POST,
        "/api/recommend",
        Some(&token),
        Some(json!({ "apiKey": "sk-test", "saveToHistory": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rec["saved"], false);
    assert!(rec.get("savedId").is_none());

    let (_, history) = send(&app, Method::GET, "/api/history", Some(&token), None).await;
    assert!(history["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn upstream_failures_map_to_status_classes() {
    for (upstream, expected) in [
        (401, StatusCode::BAD_REQUEST),
        (502, StatusCode::INTERNAL_SERVER_ERROR),
    ] {
        let app = router_over(
            memory_record_store(),
            Arc::new(FakeRecommendationGenerator::failing(upstream, "上游错误")),
        );
        let token = register(&app, "dave", "secret1").await;
        send(&app, Method::POST, "/api/profile", Some(&token), Some(profile_body())).await;
        create_project(&app, &token, project_body("国债", "债券", 1, 3.0, 100.0)).await;

        let (status, resp) = send(
            &app,
            Method::POST,
            "/api/recommend",
            Some(&token),
            Some(json!({ "apiKey": "sk-test", "saveToHistory": true })),
        )
        .await;
        assert_eq!(status, expected);
        assert_eq!(resp["error"], "上游错误");

        let (_, history) = send(&app, Method::GET, "/api/history", Some(&token), None).await;
        assert!(history["recommendations"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn project_catalog_lifecycle() {
    let app = router_over(
        memory_record_store(),
        Arc::new(FakeRecommendationGenerator::with_plan(sample_plan(1, 2))),
    );

    let (status, resp) = send(
        &app,
        Method::POST,
        "/api/projects",
        None,
        Some(project_body("国债", "债券", 1, 3.0, 100.0)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp["error"], "未授权访问");

    let token = register(&app, "erin", "secret1").await;
    let id = create_project(&app, &token, project_body("国债", "债券", 1, 3.0, 100.0)).await;

    let (status, resp) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&token),
        Some(project_body("坏项目", "期货", 1, 3.0, 100.0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], "请选择项目类型");

    // Listing needs no token.
    let (status, list) = send(&app, Method::GET, "/api/projects", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["projects"].as_array().unwrap().len(), 1);
    let created_at = list["projects"][0]["createdAt"].clone();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/projects/{id}"),
        Some(&token),
        Some(project_body("国债(新)", "债券", 2, 3.4, 200.0)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["project"]["id"].as_i64(), Some(id));
    assert_eq!(updated["project"]["name"], "国债(新)");
    assert_eq!(updated["project"]["riskLevel"], 2);
    assert_eq!(updated["project"]["createdAt"], created_at);

    let (status, deleted) = send(
        &app,
        Method::DELETE,
        &format!("/api/projects/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "success": true, "message": "项目已删除" }));

    for (method, body) in [
        (Method::DELETE, None),
        (Method::PUT, Some(project_body("复活", "债券", 1, 3.0, 100.0))),
    ] {
        let (status, resp) = send(
            &app,
            method,
            &format!("/api/projects/{id}"),
            Some(&token),
            body,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(resp["error"], "项目不存在");
    }

    let (status, _) = send(&app, Method::DELETE, "/api/projects/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn orphan_token_is_unauthorized(store: RecordStore) {
    let app = router_over(
        store,
        Arc::new(FakeRecommendationGenerator::with_plan(sample_plan(1, 2))),
    );
    let token = token_for(4242, "ghost");

    let (status, resp) = send(
        &app,
        Method::POST,
        "/api/profile",
        Some(&token),
        Some(profile_body()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp["error"], "未授权访问");
}

#[tokio::test]
async fn token_without_user_row_is_unauthorized_in_memory() {
    orphan_token_is_unauthorized(memory_record_store()).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn token_without_user_row_is_unauthorized_on_sqlite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orphan.db");
    let store = folioadvisor_storage_sqlite::open_record_store(path.to_str().unwrap()).unwrap();
    orphan_token_is_unauthorized(store).await;
}

#[tokio::test]
async fn healthz_answers_without_auth() {
    let app = router_over(
        memory_record_store(),
        Arc::new(FakeRecommendationGenerator::with_plan(sample_plan(1, 2))),
    );
    let (status, body) = send(&app, Method::GET, "/api/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
