/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Identity
 * - `POST /api/register` - Create a user and return a token
 * - `POST /api/login` - Verify credentials and return a token
 * - `GET /api/me` - Identity carried by the bearer token
 *
 * ## History
 * - `GET /api/history` - List snapshots
 * - `GET /api/history/{id}` - One snapshot with content
 * - `POST /api/history/save` - Snapshot the current document
 * - `POST /api/history/{id}/rollback` - Restore a snapshot
 *
 * Register and login are public; everything else requires
 * `Authorization: Bearer <token>`.
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::history::handlers::{
    get_snapshot, list_history, rollback_snapshot, save_snapshot,
};
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Identity endpoints
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/me", get(get_me))
        // History endpoints
        .route("/api/history", get(list_history))
        .route("/api/history/save", post(save_snapshot))
        .route("/api/history/{id}", get(get_snapshot))
        .route("/api/history/{id}/rollback", post(rollback_snapshot))
}
