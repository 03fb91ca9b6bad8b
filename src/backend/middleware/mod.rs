//! Middleware Module
//!
//! Request-processing extractors shared by the route handlers.
//!
//! - **`auth`** - bearer-token and handshake-token authentication

pub mod auth;

pub use auth::{bearer_token, handshake_token, AuthUser, GatewayUser};
