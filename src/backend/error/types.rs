/**
 * Backend Error Types
 *
 * This module defines the single error type used across the backend.
 * Every variant maps to an HTTP status code and a stable machine-readable
 * code so REST clients can branch on failures without parsing messages.
 *
 * # Error Categories
 *
 * ## Identity Errors
 *
 * - `UsernameTaken` - registration with an existing username
 * - `InvalidCredentials` - unknown user or wrong password (indistinguishable)
 * - `Unauthenticated` - missing, malformed, forged or expired token
 *
 * ## History Errors
 *
 * - `SnapshotNotFound` - rollback or lookup of an unknown snapshot
 * - `StorageError` - the durable history medium failed
 *
 * ## Everything Else
 *
 * - `HandlerError` - request validation failures with an explicit status
 * - `InternalError` - hashing, signing or task failures
 * - `SerializationError` - JSON encoding failures
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Registration with a username that already exists
    #[error("Username taken")]
    UsernameTaken,

    /// Login failed; never says whether the user exists
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Bad, missing or expired token
    #[error("Unauthenticated")]
    Unauthenticated,

    /// No snapshot with the requested ID
    #[error("Snapshot not found: {id}")]
    SnapshotNotFound {
        /// The snapshot ID that was requested
        id: String,
    },

    /// Handler error (e.g. invalid request body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Durable history storage failed
    #[error("Storage error: {message}")]
    StorageError {
        /// Human-readable error message
        message: String,
    },

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    InternalError {
        /// Human-readable error message
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Create a snapshot-not-found error
    pub fn snapshot_not_found(id: impl Into<String>) -> Self {
        Self::SnapshotNotFound { id: id.into() }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `UsernameTaken` - 409 Conflict
    /// - `InvalidCredentials`, `Unauthenticated` - 401 Unauthorized
    /// - `SnapshotNotFound` - 404 Not Found
    /// - `HandlerError` - Uses the status code from the error
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UsernameTaken => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::SnapshotNotFound { .. } => StatusCode::NOT_FOUND,
            Self::HandlerError { status, .. } => *status,
            Self::StorageError { .. }
            | Self::InternalError { .. }
            | Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UsernameTaken => "username_taken",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unauthenticated => "unauthenticated",
            Self::SnapshotNotFound { .. } => "snapshot_not_found",
            Self::HandlerError { .. } => "bad_request",
            Self::StorageError { .. } => "storage_error",
            Self::InternalError { .. } | Self::SerializationError(_) => "internal_error",
        }
    }

    /// Get the error message
    ///
    /// Storage and internal details are logged, not returned to clients.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StorageError { .. } => "Storage error".to_string(),
            Self::InternalError { .. } | Self::SerializationError(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err.to_string())
    }
}

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        Self::storage(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for BackendError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::storage(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::internal(format!("bcrypt: {}", err))
    }
}

impl From<tokio::task::JoinError> for BackendError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("blocking task failed: {}", err))
    }
}
