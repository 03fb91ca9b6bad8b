//! History Module
//!
//! Append-only snapshot history of the canonical document.
//!
//! # Module Structure
//!
//! ```text
//! history/
//! ├── mod.rs       - Module exports
//! ├── service.rs   - HistoryService (list/save/rollback)
//! ├── store.rs     - Durable backends (JSON file, SQLite, memory)
//! ├── db.rs        - SQLite queries
//! └── handlers.rs  - REST handlers
//! ```

pub mod service;
pub mod store;
pub mod db;
pub mod handlers;

pub use service::HistoryService;
pub use store::{JsonFileStore, SnapshotStore};
