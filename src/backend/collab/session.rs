/**
 * Connection Session
 *
 * One `ConnectionSession` exists per admitted real-time connection. It holds
 * the authenticated identity and the connection ID, and dispatches decoded
 * client messages to the engine. It knows nothing about sockets, which
 * keeps the protocol logic testable without a transport.
 *
 * Teardown happens exactly once: `close` removes the connection from the
 * roster, and if a session is dropped without `close` (task aborted or
 * panicked) the drop path schedules the same removal.
 */

use tokio::sync::broadcast;

use crate::backend::auth::users::Identity;
use crate::backend::collab::presence::ConnectionId;
use crate::backend::collab::state::SyncEngine;
use crate::backend::realtime::broadcast::{roster_message, SyncEvent};
use crate::shared::{ClientMessage, ServerMessage};

pub struct ConnectionSession {
    engine: SyncEngine,
    identity: Identity,
    connection_id: ConnectionId,
    max_document_bytes: usize,
    closed: bool,
}

/// What a connection task needs right after admission
pub struct OpenedSession {
    pub session: ConnectionSession,
    /// First frame to send
    pub init: ServerMessage,
    pub events: broadcast::Receiver<SyncEvent>,
}

impl ConnectionSession {
    /// Admit `identity` into the engine and open a session for it
    pub async fn open(engine: SyncEngine, identity: Identity, max_document_bytes: usize) -> OpenedSession {
        let admission = engine.admit(&identity).await;
        OpenedSession {
            session: Self {
                engine,
                identity,
                connection_id: admission.connection_id,
                max_document_bytes,
                closed: false,
            },
            init: ServerMessage::Init(admission.document),
            events: admission.events,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn username(&self) -> &str {
        &self.identity.username
    }

    /// Decode and dispatch one text frame; unknown frames are ignored
    pub async fn handle_text(&self, text: &str) {
        if let Some(message) = ClientMessage::decode(text) {
            self.dispatch(message).await;
        }
    }

    pub async fn dispatch(&self, message: ClientMessage) {
        match message {
            ClientMessage::Update(content) => {
                if content.len() > self.max_document_bytes {
                    tracing::warn!(
                        "[Gateway] Dropping oversized update from {} ({} bytes)",
                        self.identity.username,
                        content.len()
                    );
                    return;
                }
                self.engine.apply_update(content).await;
            }
            ClientMessage::Cursor(position) => {
                self.engine
                    .relay_cursor(self.connection_id, &self.identity.username, position.offset);
            }
        }
    }

    /// Frame for a broadcast event, if this connection should receive it
    pub fn outbound(&self, event: &SyncEvent) -> Option<ServerMessage> {
        event.message_for(self.connection_id)
    }

    /// Frames that bring a lagged receiver back to the current state
    pub async fn resync(&self) -> Vec<ServerMessage> {
        let document = self.engine.current_value().await;
        let roster = self.engine.roster().await;
        vec![ServerMessage::Update(document), roster_message(&roster)]
    }

    /// De-register the connection and broadcast the new roster
    pub async fn close(mut self) {
        self.closed = true;
        self.engine.disconnect(self.connection_id).await;
    }
}

impl Drop for ConnectionSession {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        let engine = self.engine.clone();
        let connection_id = self.connection_id;
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                engine.disconnect(connection_id).await;
            });
        }
    }
}
