/**
 * History & Versioning Service
 *
 * Append-only ordered log of document snapshots. `save` captures the
 * canonical document; `rollback` pushes an old snapshot's content through
 * the engine's normal update path and records that as a new snapshot.
 * Nothing is ever edited or removed.
 *
 * # Ordering and Failure
 *
 * Save and rollback are serialized by the history lock, which is held across
 * the durable write. The engine lock is only taken briefly (to read or to
 * apply), so live edits keep flowing while a write is in progress. If the
 * write fails the in-memory sequence is restored and the document is left
 * untouched.
 */

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::backend::collab::state::SyncEngine;
use crate::backend::error::BackendError;
use crate::backend::history::store::SnapshotStore;
use crate::shared::{HistoryEntry, HistorySnapshot};

#[derive(Debug, Clone)]
pub struct HistoryService {
    engine: SyncEngine,
    store: SnapshotStore,
    snapshots: Arc<Mutex<Vec<HistorySnapshot>>>,
}

impl HistoryService {
    /// Wrap an already-loaded sequence
    pub fn new(engine: SyncEngine, store: SnapshotStore, snapshots: Vec<HistorySnapshot>) -> Self {
        Self {
            engine,
            store,
            snapshots: Arc::new(Mutex::new(snapshots)),
        }
    }

    /// All snapshots, oldest first, without content
    pub async fn list(&self) -> Vec<HistoryEntry> {
        self.snapshots.lock().await.iter().map(HistorySnapshot::entry).collect()
    }

    /// One snapshot with content
    pub async fn get(&self, id: &str) -> Result<HistorySnapshot, BackendError> {
        self.snapshots
            .lock()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| BackendError::snapshot_not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.snapshots.lock().await.len()
    }

    /// Capture the current document as a new snapshot
    pub async fn save(&self, author: &str) -> Result<HistorySnapshot, BackendError> {
        let mut snapshots = self.snapshots.lock().await;
        let content = self.engine.current_value().await;
        let snapshot = HistorySnapshot::new(author, content);

        self.append_durably(&mut snapshots, snapshot.clone()).await?;
        tracing::info!("[History] {} saved snapshot {}", author, snapshot.id);
        Ok(snapshot)
    }

    /// Restore an earlier snapshot's content
    ///
    /// Broadcasts the restored content to every connection as a normal
    /// update and appends a new snapshot authored by `author`.
    pub async fn rollback(&self, id: &str, author: &str) -> Result<HistorySnapshot, BackendError> {
        let mut snapshots = self.snapshots.lock().await;
        let content = snapshots
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.content.clone())
            .ok_or_else(|| {
                tracing::warn!("[History] Rollback to unknown snapshot {}", id);
                BackendError::snapshot_not_found(id)
            })?;

        let snapshot = HistorySnapshot::new(author, content.clone());
        self.append_durably(&mut snapshots, snapshot.clone()).await?;
        self.engine.apply_update(content).await;

        tracing::info!("[History] {} rolled back to {} (new snapshot {})", author, id, snapshot.id);
        Ok(snapshot)
    }

    async fn append_durably(
        &self,
        snapshots: &mut Vec<HistorySnapshot>,
        snapshot: HistorySnapshot,
    ) -> Result<(), BackendError> {
        snapshots.push(snapshot);
        if let Err(e) = self.store.append(snapshots).await {
            snapshots.pop();
            tracing::error!("[History] Failed to persist history: {}", e);
            return Err(e);
        }
        Ok(())
    }
}
