/**
 * Authentication Handler Types
 *
 * Request and response bodies for the register, login and me endpoints.
 */

use serde::{Deserialize, Serialize};

/// Register or login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CredentialsRequest {
    /// Username (case-sensitive)
    pub username: String,
    /// Plaintext password, hashed before storage and never logged
    pub password: String,
}

/// Auth response
///
/// Returned by register and login.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    /// Signed identity token
    pub token: String,
    pub username: String,
}

/// Current user, without sensitive data
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}
