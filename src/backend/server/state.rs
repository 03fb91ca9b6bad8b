/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds one handle per component. Every handle is cheap to
 * clone and shares its underlying state:
 * - `IdentityService` - user table and token keys
 * - `SyncEngine` - canonical document, presence and fan-out channel
 * - `HistoryService` - snapshot log and its durable store
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract just the component
 * they need, e.g. `State<HistoryService>`.
 */

use axum::extract::FromRef;

use crate::backend::auth::IdentityService;
use crate::backend::collab::SyncEngine;
use crate::backend::history::HistoryService;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub identity: IdentityService,
    pub engine: SyncEngine,
    pub history: HistoryService,
    /// Largest accepted document update, in bytes
    pub max_document_bytes: usize,
}

impl FromRef<AppState> for IdentityService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.identity.clone()
    }
}

impl FromRef<AppState> for SyncEngine {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.engine.clone()
    }
}

impl FromRef<AppState> for HistoryService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.history.clone()
    }
}
