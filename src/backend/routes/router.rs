/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Real-time gateway (`/ws`)
 * 2. API routes (identity, history)
 * 3. Fallback handler (404)
 */

use axum::{http::StatusCode, Router};
use tower_http::cors::CorsLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::collab_routes::configure_collab_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// Browser clients may be served from another origin, so CORS is permissive.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_collab_routes(Router::new());
    let router = configure_api_routes(router);

    router
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
