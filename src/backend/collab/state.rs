/**
 * Document Synchronization Engine
 *
 * Owns the single canonical document and the presence registry. All
 * mutations go through one `tokio::sync::Mutex`, and every event they
 * produce is published before the lock is released, which gives one global
 * order over updates and roster changes.
 *
 * Conflict policy is last-write-wins: an update replaces the whole document
 * with no diffing or merging, and the update serialized last is the one
 * every connection converges on.
 */

use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use crate::backend::auth::users::Identity;
use crate::backend::collab::presence::{ConnectionId, PresenceEntry, PresenceRegistry};
use crate::backend::realtime::broadcast::{broadcast_event, SyncBroadcast, SyncEvent};
use crate::shared::CursorState;

#[derive(Debug)]
struct EngineState {
    document: String,
    presence: PresenceRegistry,
    next_connection_id: ConnectionId,
}

/// A freshly admitted connection
#[derive(Debug)]
pub struct Admission {
    pub connection_id: ConnectionId,
    /// Document value at admission; send as `init` before draining `events`
    pub document: String,
    /// Every event published after admission, starting with the roster
    pub events: broadcast::Receiver<SyncEvent>,
}

/// Shared handle to the canonical document and the roster
#[derive(Debug, Clone)]
pub struct SyncEngine {
    state: Arc<Mutex<EngineState>>,
    events: SyncBroadcast,
}

impl SyncEngine {
    pub fn new(initial_document: String, broadcast_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(broadcast_capacity.max(1));
        Self {
            state: Arc::new(Mutex::new(EngineState {
                document: initial_document,
                presence: PresenceRegistry::new(),
                next_connection_id: 1,
            })),
            events,
        }
    }

    /// Register an authenticated connection
    ///
    /// The receiver is subscribed under the lock, so nothing published
    /// after `document` was read can be missed.
    pub async fn admit(&self, identity: &Identity) -> Admission {
        let mut state = self.state.lock().await;
        let connection_id = state.next_connection_id;
        state.next_connection_id += 1;

        let events = self.events.subscribe();
        state.presence.add(connection_id, identity.username.clone());
        let document = state.document.clone();
        broadcast_event(&self.events, SyncEvent::Presence(state.presence.snapshot()));

        tracing::info!(
            "[Sync] Admitted connection {} for {} ({} online)",
            connection_id,
            identity.username,
            state.presence.len()
        );

        Admission {
            connection_id,
            document,
            events,
        }
    }

    /// Remove a connection from the roster
    ///
    /// Returns false (and broadcasts nothing) if it was already removed.
    pub async fn disconnect(&self, connection_id: ConnectionId) -> bool {
        let mut state = self.state.lock().await;
        if !state.presence.remove(connection_id) {
            return false;
        }
        broadcast_event(&self.events, SyncEvent::Presence(state.presence.snapshot()));
        tracing::info!(
            "[Sync] Connection {} left ({} online)",
            connection_id,
            state.presence.len()
        );
        true
    }

    /// Replace the canonical document and broadcast it to everyone
    pub async fn apply_update(&self, content: String) {
        let mut state = self.state.lock().await;
        state.document.clone_from(&content);
        let receivers = broadcast_event(&self.events, SyncEvent::Update(content));
        tracing::debug!(
            "[Sync] Document updated ({} bytes, {} receivers)",
            state.document.len(),
            receivers
        );
    }

    pub async fn current_value(&self) -> String {
        self.state.lock().await.document.clone()
    }

    /// Relay a cursor position to every connection except its origin
    ///
    /// Nothing is stored; the event is fire-and-forget.
    pub fn relay_cursor(&self, origin: ConnectionId, username: &str, offset: usize) {
        broadcast_event(
            &self.events,
            SyncEvent::Cursor {
                origin,
                cursor: CursorState {
                    username: username.to_string(),
                    offset,
                },
            },
        );
    }

    pub async fn roster(&self) -> Vec<PresenceEntry> {
        self.state.lock().await.presence.snapshot()
    }

    pub async fn online_count(&self) -> usize {
        self.state.lock().await.presence.len()
    }
}
