/**
 * Real-time Wire Protocol
 *
 * This module defines the messages exchanged over the `/ws` channel.
 * Every frame is a JSON text frame, adjacently tagged:
 *
 * ```json
 * {"type": "update", "data": "hello"}
 * {"type": "cursor", "data": {"username": "alice", "offset": 3}}
 * ```
 *
 * Server → client: `init`, `update`, `presence`, `cursor`.
 * Client → server: `update`, `cursor`. Anything else is ignored.
 */
use serde::{Deserialize, Serialize};

/// Cursor position of a participant, tagged with their username
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CursorState {
    /// Username of the participant who owns the cursor
    pub username: String,
    /// Character offset into the document
    pub offset: usize,
}

/// Cursor report sent by a client
///
/// The `username` field is accepted for compatibility but never trusted;
/// the server relays the authenticated username instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CursorPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(alias = "position")]
    pub offset: usize,
}

/// One roster entry as seen by clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresenceUser {
    pub username: String,
}

/// Messages sent from the server to a connected client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Current document, sent once right after admission
    Init(String),
    /// New canonical document after any accepted update (including one's own)
    Update(String),
    /// Full roster of admitted connections
    Presence(Vec<PresenceUser>),
    /// Another participant's cursor
    Cursor(CursorState),
}

/// Messages accepted from a connected client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ClientMessage {
    /// Replace the whole document
    Update(String),
    /// Report the local cursor position
    Cursor(CursorPosition),
}

impl ServerMessage {
    /// Serialize to the JSON text carried in a WebSocket frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ClientMessage {
    /// Decode a text frame, returning `None` for unknown or malformed frames
    pub fn decode(text: &str) -> Option<Self> {
        match serde_json::from_str(text) {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::debug!("[Protocol] Ignoring undecodable frame: {}", e);
                None
            }
        }
    }
}
