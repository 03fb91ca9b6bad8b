/**
 * Identity Service
 *
 * Verifies credentials and issues/verifies signed identity tokens. This is
 * the only component that sees passwords; everything downstream works with
 * an `Identity`.
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt on the blocking thread pool
 * - Login failures are uniform: an unknown username still pays for one
 *   bcrypt verification against a dummy hash, and both paths return
 *   `InvalidCredentials`
 * - Token verification failures of any kind map to `Unauthenticated`
 */

use std::sync::Arc;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::auth::users::{Identity, UserStore};
use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;

/// Registration or login outcome
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub identity: Identity,
    pub token: String,
}

/// Credential verification and token issuing
#[derive(Clone)]
pub struct IdentityService {
    users: UserStore,
    keys: SessionKeys,
    bcrypt_cost: u32,
    dummy_hash: Arc<str>,
}

impl IdentityService {
    pub fn new(keys: SessionKeys, bcrypt_cost: u32) -> Result<Self, BackendError> {
        let dummy_hash = bcrypt::hash("syncpad-dummy-password", bcrypt_cost)?;
        Ok(Self {
            users: UserStore::new(),
            keys,
            bcrypt_cost,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, BackendError> {
        let keys = SessionKeys::new(config.jwt_secret.as_bytes(), config.token_ttl);
        Self::new(keys, config.bcrypt_cost)
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Register a new user and issue a token
    pub async fn register(&self, username: &str, password: &str) -> Result<IssuedSession, BackendError> {
        if self.users.contains(username).await {
            tracing::warn!("[Auth] Username already exists: {}", username);
            return Err(BackendError::UsernameTaken);
        }

        let password = password.to_string();
        let cost = self.bcrypt_cost;
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

        // Re-checked under the store's write lock.
        let user = self
            .users
            .create_user(username.to_string(), password_hash)
            .await?;
        let identity = user.identity();
        let token = self.issue(&identity)?;

        tracing::info!("[Auth] Registered user: {}", identity.username);
        Ok(IssuedSession { identity, token })
    }

    /// Verify credentials and issue a token
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedSession, BackendError> {
        let user = self.users.get_user_by_username(username).await;
        let hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.to_string(),
        };

        let password = password.to_string();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;

        let user = match user {
            Some(user) if valid => user,
            _ => {
                tracing::warn!("[Auth] Failed login for: {}", username);
                return Err(BackendError::InvalidCredentials);
            }
        };

        let identity = user.identity();
        let token = self.issue(&identity)?;
        tracing::info!("[Auth] User logged in: {}", identity.username);
        Ok(IssuedSession { identity, token })
    }

    /// Verify a token and return the identity it carries
    pub fn verify_token(&self, token: &str) -> Result<Identity, BackendError> {
        let claims = self.keys.verify_token(token).map_err(|e| {
            tracing::debug!("[Auth] Token rejected: {}", e);
            BackendError::Unauthenticated
        })?;
        claims.identity().ok_or(BackendError::Unauthenticated)
    }

    fn issue(&self, identity: &Identity) -> Result<String, BackendError> {
        self.keys
            .create_token(identity)
            .map_err(|e| BackendError::internal(format!("token signing failed: {}", e)))
    }
}
