/**
 * SQLite Persistence for History Snapshots
 *
 * Snapshots are stored one row each in the `snapshots` table, ordered by an
 * autoincrement `seq` column so that load order equals insertion order.
 * The schema is created by the embedded migrations.
 */

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::backend::error::BackendError;
use crate::shared::HistorySnapshot;

/// Open (creating if needed) the history database and run migrations
pub async fn connect(database_url: &str) -> Result<SqlitePool, BackendError> {
    tracing::info!("[History] Connecting to history database...");

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    // A single connection also keeps `sqlite::memory:` databases shared.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("[History] Database migrations completed successfully");

    Ok(pool)
}

/// Append one snapshot
pub async fn insert_snapshot(pool: &SqlitePool, snapshot: &HistorySnapshot) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO snapshots (id, timestamp_ms, author, content)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(&snapshot.id)
    .bind(snapshot.timestamp.timestamp_millis())
    .bind(&snapshot.author)
    .bind(&snapshot.content)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load all snapshots in insertion order
pub async fn load_snapshots(pool: &SqlitePool) -> Result<Vec<HistorySnapshot>, BackendError> {
    #[derive(sqlx::FromRow)]
    struct SnapshotRow {
        id: String,
        timestamp_ms: i64,
        author: String,
        content: String,
    }

    let rows = sqlx::query_as::<_, SnapshotRow>(
        r#"
        SELECT id, timestamp_ms, author, content
        FROM snapshots
        ORDER BY seq ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let timestamp = DateTime::<Utc>::from_timestamp_millis(row.timestamp_ms).ok_or_else(|| {
                BackendError::storage(format!("snapshot {} has invalid timestamp", row.id))
            })?;
            Ok(HistorySnapshot {
                id: row.id,
                timestamp,
                author: row.author,
                content: row.content,
            })
        })
        .collect()
}
