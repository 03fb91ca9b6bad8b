//! Authentication Module
//!
//! This module is the identity service: it registers users, verifies
//! credentials and issues and verifies signed identity tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and in-memory store
//! ├── sessions.rs     - JWT token management
//! ├── service.rs      - IdentityService (register/login/verify)
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username and password → user created → token returned
//! 2. **Login**: username and password → credentials verified → token returned
//! 3. **Verify**: token → signature and expiry checked → `Identity`
//!
//! Tokens are stateless and expire after the configured lifetime
//! (two hours by default). There is no refresh.

/// User data model and storage
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Identity service
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use users::{Identity, User, UserStore};
pub use sessions::{Claims, SessionKeys};
pub use service::{IdentityService, IssuedSession};
pub use handlers::{get_me, login, register};
