/**
 * History Snapshot Types
 *
 * Snapshots are immutable, authored copies of the canonical document.
 * Timestamps serialize as milliseconds since the Unix epoch so that
 * history files written by earlier deployments load unchanged.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored copy of the document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistorySnapshot {
    /// Unique snapshot ID (UUID v4)
    pub id: String,
    /// Creation time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Username that saved (or rolled back to) this content
    #[serde(default)]
    pub author: String,
    /// Full document content
    pub content: String,
}

/// Snapshot listing entry, content omitted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub author: String,
}

impl HistorySnapshot {
    /// Create a new snapshot stamped with the current time
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            author: author.into(),
            content: content.into(),
        }
    }

    pub fn entry(&self) -> HistoryEntry {
        HistoryEntry {
            id: self.id.clone(),
            timestamp: self.timestamp,
            author: self.author.clone(),
        }
    }
}
