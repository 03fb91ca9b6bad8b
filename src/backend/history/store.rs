/**
 * Snapshot Store
 *
 * Durable medium for the ordered snapshot sequence. The history service
 * calls `append` with the full sequence, new snapshot last, and does not
 * report success until it returns.
 *
 * - `JsonFile` rewrites the whole sequence to `<file>.tmp`, fsyncs it and
 *   renames it over the target, then fsyncs the directory. A crash leaves
 *   either the old or the new file, never a torn one.
 * - `Sqlite` inserts the new row.
 * - `Memory` keeps nothing; the in-memory sequence in the service is all
 *   there is.
 */

use std::path::{Path, PathBuf};

use sqlx::SqlitePool;
use tokio::io::AsyncWriteExt;

use crate::backend::error::BackendError;
use crate::backend::history::db;
use crate::backend::server::config::HistoryBackendConfig;
use crate::shared::HistorySnapshot;

/// History file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the sequence; a missing or empty file is an empty history
    pub async fn load(&self) -> Result<Vec<HistorySnapshot>, BackendError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            BackendError::storage(format!("{}: corrupt history file: {}", self.path.display(), e))
        })
    }

    /// Atomically replace the file with `snapshots`
    ///
    /// Returns only once the rename itself is durable. On failure the
    /// temp file is removed and the previous file is left as it was.
    pub async fn write_all(&self, snapshots: &[HistorySnapshot]) -> Result<(), BackendError> {
        let json = serde_json::to_vec_pretty(snapshots)?;
        let tmp_path = self.tmp_path();

        if let Err(e) = self.replace_with(&tmp_path, &json).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("[History] Could not remove {}: {}", tmp_path.display(), cleanup);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    async fn replace_with(&self, tmp_path: &Path, json: &[u8]) -> Result<(), BackendError> {
        let mut file = tokio::fs::File::create(tmp_path).await?;
        file.write_all(json).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(tmp_path, &self.path).await?;

        // fsync the directory so the rename survives a crash
        #[cfg(unix)]
        tokio::fs::File::open(self.parent_dir()).await?.sync_all().await?;

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        PathBuf::from(tmp_name)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// Configured history backend
#[derive(Debug, Clone)]
pub enum SnapshotStore {
    Memory,
    JsonFile(JsonFileStore),
    Sqlite(SqlitePool),
}

impl SnapshotStore {
    pub async fn open(config: &HistoryBackendConfig) -> Result<Self, BackendError> {
        Ok(match config {
            HistoryBackendConfig::Memory => Self::Memory,
            HistoryBackendConfig::JsonFile(path) => Self::JsonFile(JsonFileStore::new(path.clone())),
            HistoryBackendConfig::Sqlite(url) => Self::Sqlite(db::connect(url).await?),
        })
    }

    pub async fn load(&self) -> Result<Vec<HistorySnapshot>, BackendError> {
        match self {
            Self::Memory => Ok(Vec::new()),
            Self::JsonFile(store) => store.load().await,
            Self::Sqlite(pool) => db::load_snapshots(pool).await,
        }
    }

    /// Persist `sequence`, whose last element is the newly appended snapshot
    pub async fn append(&self, sequence: &[HistorySnapshot]) -> Result<(), BackendError> {
        match self {
            Self::Memory => Ok(()),
            Self::JsonFile(store) => store.write_all(sequence).await,
            Self::Sqlite(pool) => match sequence.last() {
                Some(snapshot) => Ok(db::insert_snapshot(pool, snapshot).await?),
                None => Ok(()),
            },
        }
    }
}
