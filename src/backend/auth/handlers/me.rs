/**
 * Get Current User Handler
 *
 * GET /api/me returns the identity carried by the bearer token.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::middleware::AuthUser;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the Authorization header is missing or the token is invalid
pub async fn get_me(AuthUser(identity): AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        id: identity.id.to_string(),
        username: identity.username,
    })
}
