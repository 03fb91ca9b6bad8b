/**
 * Server Initialization
 *
 * This module builds the application state and router from a
 * `ServerConfig`.
 *
 * # Initialization Process
 *
 * 1. Open the history store and load every snapshot
 * 2. Seed the document with the newest snapshot's content (or empty)
 * 3. Create the identity service (hashes the dummy password once)
 * 4. Create and configure the router
 *
 * Unlike live edits, a history store that cannot be read is fatal: starting
 * with an empty log would silently overwrite it on the next save.
 */

use axum::Router;

use crate::backend::auth::IdentityService;
use crate::backend::collab::SyncEngine;
use crate::backend::error::BackendError;
use crate::backend::history::{HistoryService, SnapshotStore};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Build the shared state for a configuration
pub async fn build_state(config: &ServerConfig) -> Result<AppState, BackendError> {
    let store = SnapshotStore::open(&config.history).await?;
    let snapshots = store.load().await?;
    tracing::info!("[Server] Loaded {} history snapshot(s)", snapshots.len());

    let initial_document = snapshots
        .last()
        .map(|s| s.content.clone())
        .unwrap_or_default();
    let engine = SyncEngine::new(initial_document, config.broadcast_capacity);
    let history = HistoryService::new(engine.clone(), store, snapshots);
    let identity = IdentityService::from_config(config)?;

    Ok(AppState {
        identity,
        engine,
        history,
        max_document_bytes: config.max_document_bytes,
    })
}

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("[Server] Initializing syncpad backend");
    let app_state = build_state(config).await?;
    Ok(create_router(app_state))
}
