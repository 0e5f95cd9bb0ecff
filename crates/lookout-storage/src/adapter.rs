// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of [`DurableStore`].

use async_trait::async_trait;
use tracing::{debug, warn};

use lookout_config::model::StorageConfig;
use lookout_core::{
    Adapter, ConfigKey, DurableStore, HealthStatus, LookoutError, QueueItem, QueuedOp,
    RemoteConfig, SeenRecord,
};

use crate::database::{map_tr_err, Database};
use crate::queries;

/// SQLite-backed durable store.
///
/// Opened once at startup and shared by every task; [`Adapter::shutdown`]
/// checkpoints the WAL.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open the database named by `config`, creating and migrating it as needed.
    pub async fn open(config: &StorageConfig) -> Result<Self, LookoutError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "sqlite store opened");
        Ok(Self { db })
    }

    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Checkpoint and release the connection.
    pub async fn close(self) -> Result<(), LookoutError> {
        self.db.close().await
    }
}

#[async_trait]
impl Adapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        let status = self
            .db
            .connection()
            .call(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .await
            .map_err(map_tr_err);
        Ok(match status {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        })
    }

    async fn shutdown(&self) -> Result<(), LookoutError> {
        self.db.checkpoint().await
    }
}

#[async_trait]
impl DurableStore for SqliteStore {
    async fn remote_config(&self) -> Result<Option<RemoteConfig>, LookoutError> {
        queries::config::get(&self.db, ConfigKey::FirebaseConfig)
            .await?
            .map(|raw| serde_json::from_str(&raw).map_err(LookoutError::store))
            .transpose()
    }

    async fn put_remote_config(&self, config: &RemoteConfig) -> Result<(), LookoutError> {
        let raw = serde_json::to_string(config).map_err(LookoutError::store)?;
        queries::config::put(&self.db, ConfigKey::FirebaseConfig, raw).await
    }

    async fn last_checked(&self) -> Result<Option<i64>, LookoutError> {
        queries::config::get(&self.db, ConfigKey::LastCheckedTs)
            .await?
            .map(|raw| serde_json::from_str(&raw).map_err(LookoutError::store))
            .transpose()
    }

    async fn put_last_checked(&self, ts: i64) -> Result<(), LookoutError> {
        queries::config::put(&self.db, ConfigKey::LastCheckedTs, ts.to_string()).await
    }

    async fn get_seen(&self, id: &str) -> Result<Option<SeenRecord>, LookoutError> {
        queries::seen::get(&self.db, id).await
    }

    async fn put_seen(&self, record: &SeenRecord) -> Result<(), LookoutError> {
        queries::seen::put(&self.db, record).await
    }

    async fn all_seen(&self) -> Result<Vec<SeenRecord>, LookoutError> {
        queries::seen::all(&self.db).await
    }

    async fn delete_seen(&self, id: &str) -> Result<(), LookoutError> {
        queries::seen::delete(&self.db, id).await
    }

    async fn enqueue(&self, op: &QueuedOp, ts: i64) -> Result<i64, LookoutError> {
        let payload = serde_json::to_string(op).map_err(LookoutError::store)?;
        queries::queue::enqueue(&self.db, payload, ts).await
    }

    async fn get_queue_item(&self, id: i64) -> Result<Option<QueueItem>, LookoutError> {
        match queries::queue::get(&self.db, id).await? {
            Some(row) => {
                let payload = serde_json::from_str(&row.payload).map_err(LookoutError::store)?;
                Ok(Some(QueueItem {
                    id: row.id,
                    payload,
                    ts: row.ts,
                }))
            }
            None => Ok(None),
        }
    }

    /// Rows whose payload no longer decodes are skipped and left in place.
    async fn all_queue_items(&self) -> Result<Vec<QueueItem>, LookoutError> {
        let rows = queries::queue::all(&self.db).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match serde_json::from_str::<QueuedOp>(&row.payload) {
                Ok(payload) => Some(QueueItem {
                    id: row.id,
                    payload,
                    ts: row.ts,
                }),
                Err(e) => {
                    warn!(id = row.id, error = %e, "skipping undecodable queue item");
                    None
                }
            })
            .collect())
    }

    async fn delete_queue_item(&self, id: i64) -> Result<(), LookoutError> {
        queries::queue::delete(&self.db, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn store() -> SqliteStore {
        SqliteStore::new(Database::open(":memory:", false).await.unwrap())
    }

    #[tokio::test]
    async fn open_uses_configured_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");
        let store = SqliteStore::open(&StorageConfig {
            database_path: path.to_str().unwrap().to_string(),
            wal_mode: true,
        })
        .await
        .unwrap();
        assert!(path.exists());
        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
        store.shutdown().await.unwrap();
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn unconfigured_store_reads_absent() {
        let store = store().await;
        assert_eq!(store.remote_config().await.unwrap(), None);
        assert_eq!(store.last_checked().await.unwrap(), None);
        assert!(store.all_seen().await.unwrap().is_empty());
        assert!(store.all_queue_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn config_round_trips_through_json() {
        let store = store().await;
        let cfg = RemoteConfig::new("https://db.example.test", Some("tok".into()));
        store.put_remote_config(&cfg).await.unwrap();
        store.put_last_checked(1_700_000_000_000).await.unwrap();

        assert_eq!(store.remote_config().await.unwrap(), Some(cfg));
        assert_eq!(store.last_checked().await.unwrap(), Some(1_700_000_000_000));
    }

    #[tokio::test]
    async fn queue_items_keep_method_url_and_body() {
        let store = store().await;
        let op = QueuedOp {
            method: Some("PUT".into()),
            url: "https://db.example.test/inquiries/a.json".into(),
            body: Some(serde_json::json!({"status": "contacted"})),
        };
        let id = store.enqueue(&op, 42).await.unwrap();

        let item = store.get_queue_item(id).await.unwrap().unwrap();
        assert_eq!(item.payload, op);
        assert_eq!(item.ts, 42);

        store.delete_queue_item(id).await.unwrap();
        assert_eq!(store.get_queue_item(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn undecodable_queue_rows_are_skipped() {
        let store = store().await;
        queries::queue::enqueue(store.database(), "not json".into(), 1)
            .await
            .unwrap();
        let good = QueuedOp {
            method: None,
            url: "https://db.example.test/x.json".into(),
            body: None,
        };
        store.enqueue(&good, 2).await.unwrap();

        let items = store.all_queue_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].payload, good);
    }
}
