// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable store trait over the `config`, `seen`, and `queue` tables.

use async_trait::async_trait;

use crate::error::LookoutError;
use crate::traits::adapter::Adapter;
use crate::types::{QueueItem, QueuedOp, RemoteConfig, SeenRecord};

/// Local transactional persistence that survives across wakes.
///
/// Every method is one transaction on one key (or one full-table read).
/// Nothing here spans tables, so callers never need a lock to use a shared
/// handle concurrently. All failures surface as [`LookoutError::Store`].
#[async_trait]
pub trait DurableStore: Adapter {
    // --- config ---

    /// `Config[firebaseConfig]`, or `None` when not configured yet.
    async fn remote_config(&self) -> Result<Option<RemoteConfig>, LookoutError>;

    /// Upserts `Config[firebaseConfig]`.
    async fn put_remote_config(&self, config: &RemoteConfig) -> Result<(), LookoutError>;

    /// `Config[lastCheckedTs]` in epoch millis.
    async fn last_checked(&self) -> Result<Option<i64>, LookoutError>;

    /// Upserts `Config[lastCheckedTs]`.
    async fn put_last_checked(&self, ts: i64) -> Result<(), LookoutError>;

    // --- seen ---

    async fn get_seen(&self, id: &str) -> Result<Option<SeenRecord>, LookoutError>;

    /// Inserts or refreshes a seen record.
    async fn put_seen(&self, record: &SeenRecord) -> Result<(), LookoutError>;

    async fn all_seen(&self) -> Result<Vec<SeenRecord>, LookoutError>;

    async fn delete_seen(&self, id: &str) -> Result<(), LookoutError>;

    // --- queue ---

    /// Appends an operation and returns its assigned id.
    async fn enqueue(&self, op: &QueuedOp, ts: i64) -> Result<i64, LookoutError>;

    async fn get_queue_item(&self, id: i64) -> Result<Option<QueueItem>, LookoutError>;

    /// All queued items in id order.
    async fn all_queue_items(&self) -> Result<Vec<QueueItem>, LookoutError>;

    async fn delete_queue_item(&self, id: i64) -> Result<(), LookoutError>;
}
