//! History API integration tests
//!
//! Save, list, get and rollback driven through the full router.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{login_user, register_user, TestApp};
use syncpad::backend::collab::ConnectionSession;
use syncpad::shared::ServerMessage;

#[tokio::test]
async fn test_save_and_list_history() {
    let app = TestApp::new().await;
    let user = register_user(&app.server, "alice", "password123").await;
    app.state.engine.apply_update("first draft".to_string()).await;

    let response = app
        .server
        .post("/api/history/save")
        .authorization_bearer(&user.token)
        .await;
    response.assert_status_ok();
    let saved: Value = response.json();
    assert_eq!(saved["author"], "alice");
    assert_eq!(saved["content"], "first draft");
    assert!(saved["timestamp"].is_i64());

    let response = app
        .server
        .get("/api/history")
        .authorization_bearer(&user.token)
        .await;
    response.assert_status_ok();
    let entries: Vec<Value> = response.json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], saved["id"]);
    assert!(entries[0].get("content").is_none());

    let id = saved["id"].as_str().unwrap();
    let response = app
        .server
        .get(&format!("/api/history/{}", id))
        .authorization_bearer(&user.token)
        .await;
    response.assert_status_ok();
    let fetched: Value = response.json();
    assert_eq!(fetched["content"], "first draft");
}

#[tokio::test]
async fn test_rollback_restores_document() {
    let app = TestApp::new().await;
    let user = register_user(&app.server, "alice", "password123").await;

    app.state.engine.apply_update("v1".to_string()).await;
    let saved: Value = app
        .server
        .post("/api/history/save")
        .authorization_bearer(&user.token)
        .await
        .json();
    app.state.engine.apply_update("v2".to_string()).await;

    let id = saved["id"].as_str().unwrap();
    let response = app
        .server
        .post(&format!("/api/history/{}/rollback", id))
        .authorization_bearer(&user.token)
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "ok": true }));
    assert_eq!(app.state.engine.current_value().await, "v1");
    assert_eq!(app.state.history.len().await, 2);
}

#[tokio::test]
async fn test_rollback_unknown_snapshot() {
    let app = TestApp::new().await;
    let user = register_user(&app.server, "alice", "password123").await;
    app.state.engine.apply_update("keep me".to_string()).await;

    let response = app
        .server
        .post("/api/history/does-not-exist/rollback")
        .authorization_bearer(&user.token)
        .await;

    assert_error_response!(response, StatusCode::NOT_FOUND, "snapshot_not_found");
    assert_eq!(app.state.engine.current_value().await, "keep me");
    assert_eq!(app.state.history.len().await, 0);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new().await;
    let response = app.server.get("/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

/// Register, save, live edit from a second user, save again
#[tokio::test]
async fn test_two_user_editing_scenario() {
    let app = TestApp::new().await;
    let max = app.state.max_document_bytes;

    let alice = register_user(&app.server, "alice", "password123").await;
    app.server
        .post("/api/history/save")
        .authorization_bearer(&alice.token)
        .await
        .assert_status_ok();

    register_user(&app.server, "bob", "hunter22").await;
    let bob_token = login_user(&app.server, "bob", "hunter22").await;

    let alice_identity = app.state.identity.verify_token(&alice.token).unwrap();
    let bob_identity = app.state.identity.verify_token(&bob_token).unwrap();
    let mut alice_conn = ConnectionSession::open(app.state.engine.clone(), alice_identity, max).await;
    let mut bob_conn = ConnectionSession::open(app.state.engine.clone(), bob_identity, max).await;
    assert_eq!(alice_conn.init, ServerMessage::Init(String::new()));

    bob_conn
        .session
        .handle_text(r#"{"type":"update","data":"hello"}"#)
        .await;

    for opened in [&mut alice_conn, &mut bob_conn] {
        let mut updates = Vec::new();
        while let Ok(event) = opened.events.try_recv() {
            if let Some(ServerMessage::Update(content)) = opened.session.outbound(&event) {
                updates.push(content);
            }
        }
        assert_eq!(updates, vec!["hello".to_string()]);
    }

    app.server
        .post("/api/history/save")
        .authorization_bearer(&alice.token)
        .await
        .assert_status_ok();

    let entries: Vec<Value> = app
        .server
        .get("/api/history")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(entries.len(), 2);

    let latest_id = entries[1]["id"].as_str().unwrap();
    let latest: Value = app
        .server
        .get(&format!("/api/history/{}", latest_id))
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(latest["content"], "hello");
    assert_eq!(latest["author"], "alice");

    alice_conn.session.close().await;
    bob_conn.session.close().await;
    assert_eq!(app.state.engine.online_count().await, 0);
}
