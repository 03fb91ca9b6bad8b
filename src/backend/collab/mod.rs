//! Collaborative Editing Module
//!
//! The real-time side of the server: one canonical document, the roster of
//! admitted connections, cursor relay and the WebSocket gateway.
//!
//! # Architecture
//!
//! - **`state`** - `SyncEngine`, owner of the document and roster
//! - **`presence`** - roster data structure
//! - **`session`** - per-connection message dispatch
//! - **`gateway`** - `GET /ws` handler and connection task
//!
//! # Example
//!
//! ```rust,no_run
//! use syncpad::backend::collab::SyncEngine;
//!
//! # async fn example() {
//! let engine = SyncEngine::new(String::new(), 1024);
//! engine.apply_update("hello".to_string()).await;
//! assert_eq!(engine.current_value().await, "hello");
//! # }
//! ```

/// Document synchronization engine
pub mod state;

/// Presence registry
pub mod presence;

/// Per-connection session
pub mod session;

/// WebSocket gateway
pub mod gateway;

pub use state::{Admission, SyncEngine};
pub use presence::{ConnectionId, PresenceEntry, PresenceRegistry};
pub use session::{ConnectionSession, OpenedSession};
pub use gateway::handle_collab_socket;
