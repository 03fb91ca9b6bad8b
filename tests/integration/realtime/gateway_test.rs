//! WebSocket gateway tests
//!
//! Real sockets against the full router: handshake, frame order, fan-out,
//! cursor exclusion and teardown when a client goes away.

use std::time::Duration;

use axum::http::StatusCode;
use axum_test::{TestServer, TestWebSocket};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{register_user, TestApp};
use syncpad::backend::collab::SyncEngine;

const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

async fn connect(server: &TestServer, token: &str) -> TestWebSocket {
    server
        .get_websocket("/ws")
        .add_query_param("token", token)
        .await
        .into_websocket()
        .await
}

async fn next_frame(socket: &mut TestWebSocket) -> Value {
    tokio::time::timeout(FRAME_TIMEOUT, socket.receive_json::<Value>())
        .await
        .expect("timed out waiting for a frame")
}

fn presence(names: &[&str]) -> Value {
    let users: Vec<Value> = names.iter().map(|n| json!({ "username": n })).collect();
    json!({ "type": "presence", "data": users })
}

async fn wait_for_online(engine: &SyncEngine, expected: usize) {
    for _ in 0..200 {
        if engine.online_count().await == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(engine.online_count().await, expected);
}

#[tokio::test]
async fn test_two_clients_share_document_presence_and_cursors() {
    let app = TestApp::with_http_transport().await;
    let alice = register_user(&app.server, "alice", "password123").await;
    let bob = register_user(&app.server, "bob", "password123").await;

    let mut alice_ws = connect(&app.server, &alice.token).await;
    assert_eq!(next_frame(&mut alice_ws).await, json!({ "type": "init", "data": "" }));
    assert_eq!(next_frame(&mut alice_ws).await, presence(&["alice"]));

    let mut bob_ws = connect(&app.server, &bob.token).await;
    assert_eq!(next_frame(&mut bob_ws).await, json!({ "type": "init", "data": "" }));
    assert_eq!(next_frame(&mut bob_ws).await, presence(&["alice", "bob"]));
    assert_eq!(next_frame(&mut alice_ws).await, presence(&["alice", "bob"]));

    alice_ws
        .send_json(&json!({ "type": "update", "data": "hello" }))
        .await;
    let update = json!({ "type": "update", "data": "hello" });
    assert_eq!(next_frame(&mut alice_ws).await, update);
    assert_eq!(next_frame(&mut bob_ws).await, update);

    alice_ws
        .send_json(&json!({ "type": "cursor", "data": { "offset": 3 } }))
        .await;
    assert_eq!(
        next_frame(&mut bob_ws).await,
        json!({ "type": "cursor", "data": { "username": "alice", "offset": 3 } })
    );

    // Alice's next frame is Bob's edit, not her own cursor.
    bob_ws
        .send_json(&json!({ "type": "update", "data": "hello world" }))
        .await;
    let update = json!({ "type": "update", "data": "hello world" });
    assert_eq!(next_frame(&mut alice_ws).await, update);
    assert_eq!(next_frame(&mut bob_ws).await, update);
    assert_eq!(app.state.engine.current_value().await, "hello world");
}

#[tokio::test]
async fn test_dropped_client_leaves_roster_once() {
    let app = TestApp::with_http_transport().await;
    let alice = register_user(&app.server, "alice", "password123").await;
    let bob = register_user(&app.server, "bob", "password123").await;

    let mut alice_ws = connect(&app.server, &alice.token).await;
    next_frame(&mut alice_ws).await;
    next_frame(&mut alice_ws).await;
    let mut bob_ws = connect(&app.server, &bob.token).await;
    next_frame(&mut bob_ws).await;
    next_frame(&mut bob_ws).await;
    wait_for_online(&app.state.engine, 2).await;

    drop(alice_ws);

    assert_eq!(next_frame(&mut bob_ws).await, presence(&["bob"]));
    wait_for_online(&app.state.engine, 1).await;

    // No second roster change follows the first.
    bob_ws
        .send_json(&json!({ "type": "update", "data": "still here" }))
        .await;
    assert_eq!(
        next_frame(&mut bob_ws).await,
        json!({ "type": "update", "data": "still here" })
    );
}

#[tokio::test]
async fn test_init_carries_existing_document() {
    let app = TestApp::with_http_transport().await;
    app.state.engine.apply_update("already here".to_string()).await;
    let alice = register_user(&app.server, "alice", "password123").await;

    let mut alice_ws = connect(&app.server, &alice.token).await;
    assert_eq!(
        next_frame(&mut alice_ws).await,
        json!({ "type": "init", "data": "already here" })
    );
}

#[tokio::test]
async fn test_unknown_frames_do_not_close_connection() {
    let app = TestApp::with_http_transport().await;
    let alice = register_user(&app.server, "alice", "password123").await;

    let mut alice_ws = connect(&app.server, &alice.token).await;
    next_frame(&mut alice_ws).await;
    next_frame(&mut alice_ws).await;

    alice_ws.send_text("not json").await;
    alice_ws
        .send_json(&json!({ "type": "shout", "data": "hi" }))
        .await;
    alice_ws
        .send_json(&json!({ "type": "update", "data": "ok" }))
        .await;

    assert_eq!(
        next_frame(&mut alice_ws).await,
        json!({ "type": "update", "data": "ok" })
    );
    assert_eq!(app.state.engine.online_count().await, 1);
}

#[tokio::test]
async fn test_bad_token_refused_before_upgrade() {
    let app = TestApp::with_http_transport().await;

    let response = app
        .server
        .get_websocket("/ws")
        .add_query_param("token", "garbage")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.state.engine.online_count().await, 0);
}
