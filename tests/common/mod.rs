//! Common test utilities and helpers
//!
//! - Test configuration and app construction
//! - Authentication helpers
//! - Custom assertion macros
#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod auth_helpers;

pub use auth_helpers::*;

use axum_test::TestServer;
use syncpad::backend::routes::create_router;
use syncpad::backend::server::{build_state, AppState, HistoryBackendConfig, ServerConfig};

pub const TEST_SECRET: &str = "syncpad-test-secret";

/// Fast config: minimum bcrypt cost, in-memory history
pub fn test_config() -> ServerConfig {
    ServerConfig::builder(TEST_SECRET)
        .bcrypt_cost(4)
        .history(HistoryBackendConfig::Memory)
        .build()
}

/// Application state plus a test server sharing it
pub struct TestApp {
    pub state: AppState,
    pub server: TestServer,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: ServerConfig) -> Self {
        let state = build_state(&config).await.unwrap();
        let server = TestServer::new(create_router(state.clone())).unwrap();
        Self { state, server }
    }

    /// Serve over a real TCP listener so WebSocket upgrades work
    pub async fn with_http_transport() -> Self {
        let state = build_state(&test_config()).await.unwrap();
        let server = TestServer::builder()
            .http_transport()
            .build(create_router(state.clone()))
            .unwrap();
        Self { state, server }
    }
}
