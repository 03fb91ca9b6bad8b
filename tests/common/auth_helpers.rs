//! Authentication test helpers

use axum_test::TestServer;
use serde_json::Value;

/// Registered test user
pub struct TestUser {
    pub username: String,
    pub password: String,
    pub token: String,
}

/// Register through the REST API and return the issued token
pub async fn register_user(server: &TestServer, username: &str, password: &str) -> TestUser {
    let response = server
        .post("/api/register")
        .json(&serde_json::json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    TestUser {
        username: username.to_string(),
        password: password.to_string(),
        token: body["token"].as_str().unwrap().to_string(),
    }
}

/// Log in through the REST API and return the issued token
pub async fn login_user(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/login")
        .json(&serde_json::json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["token"].as_str().unwrap().to_string()
}
