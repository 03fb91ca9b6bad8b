//! Identity API integration tests
//!
//! Register, login, me and the token guards on protected routes.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{register_user, TestApp};

#[tokio::test]
async fn test_register_returns_token_and_username() {
    let app = TestApp::new().await;
    let response = app
        .server
        .post("/api/register")
        .json(&json!({ "username": "alice", "password": "password123" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new().await;
    register_user(&app.server, "alice", "password123").await;

    let response = app
        .server
        .post("/api/register")
        .json(&json!({ "username": "alice", "password": "other" }))
        .await;

    assert_error_response!(response, StatusCode::CONFLICT, "username_taken");
}

#[tokio::test]
async fn test_register_empty_fields_rejected() {
    let app = TestApp::new().await;
    let response = app
        .server
        .post("/api/register")
        .json(&json!({ "username": "", "password": "password123" }))
        .await;
    assert_error_response!(response, StatusCode::BAD_REQUEST, "bad_request");

    let response = app
        .server
        .post("/api/register")
        .json(&json!({ "username": "bob", "password": "" }))
        .await;
    assert_error_response!(response, StatusCode::BAD_REQUEST, "bad_request");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    register_user(&app.server, "alice", "password123").await;

    let response = app
        .server
        .post("/api/login")
        .json(&json!({ "username": "alice", "password": "password123" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn test_login_failures_look_identical() {
    let app = TestApp::new().await;
    register_user(&app.server, "alice", "password123").await;

    let wrong_password = app
        .server
        .post("/api/login")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;
    let unknown_user = app
        .server
        .post("/api/login")
        .json(&json!({ "username": "mallory", "password": "password123" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text(), unknown_user.text());
}

#[tokio::test]
async fn test_me_returns_identity() {
    let app = TestApp::new().await;
    let user = register_user(&app.server, "alice", "password123").await;

    let response = app.server.get("/api/me").authorization_bearer(&user.token).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    assert!(body["id"].as_str().is_some());
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    for path in ["/api/me", "/api/history", "/api/history/some-id"] {
        let response = app.server.get(path).await;
        assert_error_response!(response, StatusCode::UNAUTHORIZED, "unauthenticated");
    }
    let response = app.server.post("/api/history/save").await;
    assert_error_response!(response, StatusCode::UNAUTHORIZED, "unauthenticated");

    let response = app.server.post("/api/history/some-id/rollback").await;
    assert_error_response!(response, StatusCode::UNAUTHORIZED, "unauthenticated");
}

#[tokio::test]
async fn test_malformed_token_rejected() {
    let app = TestApp::new().await;
    let response = app
        .server
        .get("/api/history")
        .authorization_bearer("not-a-jwt")
        .await;
    assert_error_response!(response, StatusCode::UNAUTHORIZED, "unauthenticated");
}

#[tokio::test]
async fn test_gateway_refuses_unauthenticated_handshake() {
    let app = TestApp::new().await;

    let response = app.server.get("/ws").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.server.get("/ws").add_query_param("token", "garbage").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.state.engine.online_count().await, 0);
}
