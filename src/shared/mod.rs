//! Shared Module
//!
//! Types that cross the wire between the server and its clients: the
//! real-time frame protocol and the history snapshot shapes returned by the
//! REST API. Everything here is plain serde data with no server state.

/// Real-time frame protocol
pub mod protocol;

/// History snapshot types
pub mod history;

pub use protocol::{ClientMessage, CursorPosition, CursorState, PresenceUser, ServerMessage};
pub use history::{HistoryEntry, HistorySnapshot};
