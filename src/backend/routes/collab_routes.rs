/**
 * Real-time Routes
 *
 * - `GET /ws` - WebSocket upgrade. The token travels in the
 *   `Authorization` header or, for browsers, the `token` query parameter.
 */

use axum::{routing::get, Router};

use crate::backend::collab::handle_collab_socket;
use crate::backend::server::state::AppState;

/// Configure the real-time gateway route
pub fn configure_collab_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/ws", get(handle_collab_socket))
}
