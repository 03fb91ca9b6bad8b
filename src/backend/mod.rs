//! Backend Module
//!
//! Server side of the collaborative editor.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── auth/        - Identity service, users, tokens, REST handlers
//! ├── middleware/  - Token extractors for REST and the gateway
//! ├── collab/      - Sync engine, presence, connection sessions, gateway
//! ├── realtime/    - Broadcast events and fan-out
//! ├── history/     - Snapshot log and durable stores
//! ├── routes/      - Router assembly
//! ├── server/      - Config, state and app creation
//! └── error/       - BackendError and its HTTP mapping
//! ```

pub mod auth;
pub mod collab;
pub mod error;
pub mod history;
pub mod middleware;
pub mod realtime;
pub mod routes;
pub mod server;

pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
