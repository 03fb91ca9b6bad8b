/**
 * Presence Registry
 *
 * Tracks the live connection → username mapping. Entries keep insertion
 * order so roster broadcasts are deterministic. The registry is plain data;
 * the sync engine owns it and publishes a roster after every change.
 */

use serde::Serialize;

/// Identifier of one admitted real-time connection
pub type ConnectionId = u64;

/// One live connection as seen by the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceEntry {
    pub connection_id: ConnectionId,
    pub username: String,
}

#[derive(Debug, Clone, Default)]
pub struct PresenceRegistry {
    entries: Vec<PresenceEntry>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection; returns false if the ID is already present
    pub fn add(&mut self, connection_id: ConnectionId, username: impl Into<String>) -> bool {
        if self.contains(connection_id) {
            return false;
        }
        self.entries.push(PresenceEntry {
            connection_id,
            username: username.into(),
        });
        true
    }

    /// Remove a connection; returns false if it was not registered
    pub fn remove(&mut self, connection_id: ConnectionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.connection_id != connection_id);
        self.entries.len() != before
    }

    pub fn contains(&self, connection_id: ConnectionId) -> bool {
        self.entries.iter().any(|entry| entry.connection_id == connection_id)
    }

    /// Current roster in insertion order
    pub fn snapshot(&self) -> Vec<PresenceEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
