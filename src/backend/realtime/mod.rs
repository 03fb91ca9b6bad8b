//! Real-time Update Module
//!
//! Fan-out of synchronization events to admitted connections.
//!
//! # Event Types
//!
//! - `Update` - new canonical document
//! - `Presence` - new roster
//! - `Cursor` - relayed cursor position, tagged with its origin connection

/// Event broadcasting utilities
pub mod broadcast;

pub use broadcast::{broadcast_event, roster_message, SyncBroadcast, SyncEvent};
