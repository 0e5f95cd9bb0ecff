// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store wrapper that can be told to fail individual operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lookout_core::{
    Adapter, DurableStore, HealthStatus, LookoutError, QueueItem, QueuedOp, RemoteConfig,
    SeenRecord,
};

/// Operations a [`FaultyStore`] can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFault {
    AllSeen,
    PutSeen,
    DeleteSeen,
    AllQueueItems,
}

/// Delegates to an inner store unless a fault is armed for the operation.
pub struct FaultyStore {
    inner: Arc<dyn DurableStore>,
    all_seen: AtomicBool,
    put_seen: AtomicBool,
    delete_seen: AtomicBool,
    all_queue_items: AtomicBool,
}

impl FaultyStore {
    pub fn new(inner: Arc<dyn DurableStore>) -> Self {
        Self {
            inner,
            all_seen: AtomicBool::new(false),
            put_seen: AtomicBool::new(false),
            delete_seen: AtomicBool::new(false),
            all_queue_items: AtomicBool::new(false),
        }
    }

    fn flag(&self, fault: StoreFault) -> &AtomicBool {
        match fault {
            StoreFault::AllSeen => &self.all_seen,
            StoreFault::PutSeen => &self.put_seen,
            StoreFault::DeleteSeen => &self.delete_seen,
            StoreFault::AllQueueItems => &self.all_queue_items,
        }
    }

    pub fn fail(&self, fault: StoreFault) {
        self.flag(fault).store(true, Ordering::SeqCst);
    }

    pub fn heal(&self, fault: StoreFault) {
        self.flag(fault).store(false, Ordering::SeqCst);
    }

    fn check(&self, fault: StoreFault) -> Result<(), LookoutError> {
        if self.flag(fault).load(Ordering::SeqCst) {
            return Err(LookoutError::store(std::io::Error::other(format!(
                "injected {fault:?} failure"
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl Adapter for FaultyStore {
    fn name(&self) -> &str {
        "faulty-store"
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        self.inner.health_check().await
    }

    async fn shutdown(&self) -> Result<(), LookoutError> {
        self.inner.shutdown().await
    }
}

#[async_trait]
impl DurableStore for FaultyStore {
    async fn remote_config(&self) -> Result<Option<RemoteConfig>, LookoutError> {
        self.inner.remote_config().await
    }

    async fn put_remote_config(&self, config: &RemoteConfig) -> Result<(), LookoutError> {
        self.inner.put_remote_config(config).await
    }

    async fn last_checked(&self) -> Result<Option<i64>, LookoutError> {
        self.inner.last_checked().await
    }

    async fn put_last_checked(&self, ts: i64) -> Result<(), LookoutError> {
        self.inner.put_last_checked(ts).await
    }

    async fn get_seen(&self, id: &str) -> Result<Option<SeenRecord>, LookoutError> {
        self.inner.get_seen(id).await
    }

    async fn put_seen(&self, record: &SeenRecord) -> Result<(), LookoutError> {
        self.check(StoreFault::PutSeen)?;
        self.inner.put_seen(record).await
    }

    async fn all_seen(&self) -> Result<Vec<SeenRecord>, LookoutError> {
        self.check(StoreFault::AllSeen)?;
        self.inner.all_seen().await
    }

    async fn delete_seen(&self, id: &str) -> Result<(), LookoutError> {
        self.check(StoreFault::DeleteSeen)?;
        self.inner.delete_seen(id).await
    }

    async fn enqueue(&self, op: &QueuedOp, ts: i64) -> Result<i64, LookoutError> {
        self.inner.enqueue(op, ts).await
    }

    async fn get_queue_item(&self, id: i64) -> Result<Option<QueueItem>, LookoutError> {
        self.inner.get_queue_item(id).await
    }

    async fn all_queue_items(&self) -> Result<Vec<QueueItem>, LookoutError> {
        self.check(StoreFault::AllQueueItems)?;
        self.inner.all_queue_items().await
    }

    async fn delete_queue_item(&self, id: i64) -> Result<(), LookoutError> {
        self.inner.delete_queue_item(id).await
    }
}
