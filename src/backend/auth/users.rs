/**
 * User Model and Storage
 *
 * Users live in a process-wide in-memory store owned by the identity
 * service. Records are created on registration and never edited or
 * deleted afterwards.
 */

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::error::BackendError;

/// A registered user
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, case-sensitive)
    pub username: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Authenticated identity carried by tokens and live connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
}

impl User {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// In-memory user table keyed by username
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new user
    ///
    /// The uniqueness check and the insert happen under one write lock, so
    /// two concurrent registrations of the same name cannot both succeed.
    pub async fn create_user(
        &self,
        username: String,
        password_hash: String,
    ) -> Result<User, BackendError> {
        let mut users = self.users.write().await;
        if users.contains_key(&username) {
            return Err(BackendError::UsernameTaken);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.clone(),
            password_hash,
            created_at: Utc::now(),
        };
        users.insert(username, user.clone());
        Ok(user)
    }

    /// Get user by username
    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users.read().await.get(username).cloned()
    }

    pub async fn contains(&self, username: &str) -> bool {
        self.users.read().await.contains_key(username)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}
