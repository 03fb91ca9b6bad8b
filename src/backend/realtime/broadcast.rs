/**
 * Real-time Event Broadcasting
 *
 * Every admitted connection holds a receiver on one process-wide
 * `tokio::sync::broadcast` channel. Events that need a global order
 * (document updates and roster changes) are published while the engine
 * lock is held, so every receiver sees them in the same order.
 *
 * Broadcasting never waits on a receiver. A receiver that falls more than
 * the channel capacity behind observes `Lagged` and resynchronises from the
 * engine instead of stalling the others.
 */

use tokio::sync::broadcast;

use crate::backend::collab::presence::{ConnectionId, PresenceEntry};
use crate::shared::{CursorState, PresenceUser, ServerMessage};

/// Event fanned out to every connection task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// The canonical document changed
    Update(String),
    /// The roster changed
    Presence(Vec<PresenceEntry>),
    /// A participant moved their cursor
    Cursor {
        /// Connection that sent the cursor; it does not receive it back
        origin: ConnectionId,
        cursor: CursorState,
    },
}

impl SyncEvent {
    /// Frame to deliver to `recipient`, or `None` if it should be skipped
    pub fn message_for(&self, recipient: ConnectionId) -> Option<ServerMessage> {
        match self {
            Self::Update(content) => Some(ServerMessage::Update(content.clone())),
            Self::Presence(entries) => Some(roster_message(entries)),
            Self::Cursor { origin, .. } if *origin == recipient => None,
            Self::Cursor { cursor, .. } => Some(ServerMessage::Cursor(cursor.clone())),
        }
    }
}

/// Project roster entries to the client-visible presence frame
pub fn roster_message(entries: &[PresenceEntry]) -> ServerMessage {
    ServerMessage::Presence(
        entries
            .iter()
            .map(|entry| PresenceUser {
                username: entry.username.clone(),
            })
            .collect(),
    )
}

/// Broadcast channel shared by the engine and all connection tasks
pub type SyncBroadcast = broadcast::Sender<SyncEvent>;

/// Broadcast an event to all subscribers
///
/// Returns the number of receivers (0 if no connection is admitted).
pub fn broadcast_event(broadcast_tx: &SyncBroadcast, event: SyncEvent) -> usize {
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::trace!("[Realtime] Event broadcast to {} subscribers", subscriber_count);
            subscriber_count
        }
        Err(_) => {
            tracing::trace!("[Realtime] No subscribers to receive event");
            0
        }
    }
}
