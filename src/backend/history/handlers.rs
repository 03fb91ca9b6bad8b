/**
 * History Handlers
 *
 * REST endpoints for the snapshot history. All of them require a bearer
 * token.
 *
 * - `GET /api/history` - list snapshots, oldest first, without content
 * - `GET /api/history/{id}` - one snapshot with content
 * - `POST /api/history/save` - snapshot the current document
 * - `POST /api/history/{id}/rollback` - restore a snapshot
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;

use crate::backend::error::BackendError;
use crate::backend::history::service::HistoryService;
use crate::backend::middleware::AuthUser;
use crate::shared::{HistoryEntry, HistorySnapshot};

/// Body returned by a successful rollback
#[derive(Debug, Serialize)]
pub struct RollbackResponse {
    pub ok: bool,
}

pub async fn list_history(
    AuthUser(_identity): AuthUser,
    State(history): State<HistoryService>,
) -> Json<Vec<HistoryEntry>> {
    Json(history.list().await)
}

pub async fn get_snapshot(
    AuthUser(_identity): AuthUser,
    State(history): State<HistoryService>,
    Path(id): Path<String>,
) -> Result<Json<HistorySnapshot>, BackendError> {
    Ok(Json(history.get(&id).await?))
}

/// Save handler
///
/// # Example Response
///
/// ```json
/// {"id": "0b7c...", "timestamp": 1700000000000, "author": "alice", "content": "hello"}
/// ```
pub async fn save_snapshot(
    AuthUser(identity): AuthUser,
    State(history): State<HistoryService>,
) -> Result<Json<HistorySnapshot>, BackendError> {
    Ok(Json(history.save(&identity.username).await?))
}

/// Rollback handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the token is missing or invalid
/// * `404 Not Found` - If no snapshot has this ID
pub async fn rollback_snapshot(
    AuthUser(identity): AuthUser,
    State(history): State<HistoryService>,
    Path(id): Path<String>,
) -> Result<Json<RollbackResponse>, BackendError> {
    history.rollback(&id, &identity.username).await?;
    Ok(Json(RollbackResponse { ok: true }))
}
