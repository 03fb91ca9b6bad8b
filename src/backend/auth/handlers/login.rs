/**
 * Login Handler
 *
 * This module implements the authentication handler for POST /api/login.
 * Unknown usernames and wrong passwords produce the same 401 body.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, CredentialsRequest};
use crate::backend::auth::service::IdentityService;
use crate::backend::error::BackendError;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the user is not found or the password is wrong
pub async fn login(
    State(identity): State<IdentityService>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("[Auth] Login request for: {}", request.username);

    let session = identity.login(&request.username, &request.password).await?;

    Ok(Json(AuthResponse {
        token: session.token,
        username: session.identity.username,
    }))
}
