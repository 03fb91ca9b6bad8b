/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/register.
 *
 * # Registration Process
 *
 * 1. Reject empty usernames or passwords
 * 2. Hash the password and create the user (409 if the username exists)
 * 3. Return a freshly issued token
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, CredentialsRequest};
use crate::backend::auth::service::IdentityService;
use crate::backend::error::BackendError;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - If the username or password is empty
/// * `409 Conflict` - If the username is already taken
///
/// # Example Request
///
/// ```http
/// POST /api/register HTTP/1.1
/// Content-Type: application/json
///
/// {"username": "alice", "password": "correct horse"}
/// ```
///
/// # Example Response
///
/// ```json
/// {"token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...", "username": "alice"}
/// ```
pub async fn register(
    State(identity): State<IdentityService>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("[Auth] Register request for username: {}", request.username);

    if request.username.trim().is_empty() {
        return Err(BackendError::handler(StatusCode::BAD_REQUEST, "Username must not be empty"));
    }
    if request.password.is_empty() {
        return Err(BackendError::handler(StatusCode::BAD_REQUEST, "Password must not be empty"));
    }

    let session = identity.register(&request.username, &request.password).await?;

    Ok(Json(AuthResponse {
        token: session.token,
        username: session.identity.username,
    }))
}
