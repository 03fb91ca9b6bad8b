//! Syncpad
//!
//! Real-time collaborative plain-text editing: one shared document,
//! last-write-wins sync over WebSockets, presence and cursor relay, and an
//! append-only snapshot history with rollback.

pub mod backend;
pub mod shared;
