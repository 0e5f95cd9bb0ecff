// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Replays queued writes against the remote.
//!
//! Every item is attempted concurrently and independently. A 2xx removes the
//! item; anything else leaves it for the next pass. One item's failure never
//! affects another.
//!
//! Passes never overlap. A pass that starts while another is in flight waits
//! for it, then reloads the queue, so an item is never replayed by two passes
//! at once.

use std::sync::Arc;

use futures::future::join_all;
use lookout_core::{OutboundEvent, QueueItem, SyncReport};
use lookout_remote::RemoteClient;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::context::AgentContext;

/// What one reconciliation pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The queue was empty. Nothing was published.
    Empty,
    /// The queue could not be read. The pass is abandoned silently.
    LoadFailed,
    Completed(SyncReport),
}

impl ReconcileOutcome {
    /// True when nothing is left to retry.
    pub fn is_settled(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::LoadFailed => false,
            Self::Completed(report) => report.failed == 0,
        }
    }
}

/// Clones share one pass lock.
#[derive(Clone)]
pub struct Reconciler {
    ctx: AgentContext,
    remote: RemoteClient,
    pass: Arc<Mutex<()>>,
}

impl Reconciler {
    pub fn new(ctx: AgentContext, remote: RemoteClient) -> Self {
        Self {
            ctx,
            remote,
            pass: Arc::new(Mutex::new(())),
        }
    }

    /// Run one pass over the whole queue.
    ///
    /// Publishes `SYNC_COMPLETE` to observers when at least one item was
    /// attempted.
    pub async fn run_once(&self) -> ReconcileOutcome {
        let _pass = self.pass.lock().await;
        let items = match self.ctx.store.all_queue_items().await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "could not load write queue");
                return ReconcileOutcome::LoadFailed;
            }
        };
        if items.is_empty() {
            debug!("write queue empty");
            return ReconcileOutcome::Empty;
        }

        let total = items.len();
        let results = join_all(items.iter().map(|item| self.replay(item))).await;
        let synced = results.iter().filter(|ok| **ok).count();
        let report = SyncReport {
            synced,
            failed: total - synced,
        };

        info!(synced = report.synced, failed = report.failed, "sync pass complete");
        self.ctx.bus.publish(OutboundEvent::from(report));
        ReconcileOutcome::Completed(report)
    }

    /// True when the queue holds at least one item.
    pub async fn has_pending(&self) -> bool {
        match self.ctx.store.all_queue_items().await {
            Ok(items) => !items.is_empty(),
            Err(e) => {
                warn!(error = %e, "could not inspect write queue");
                false
            }
        }
    }

    /// Replay one item and drop it on success.
    async fn replay(&self, item: &QueueItem) -> bool {
        if let Err(e) = self.remote.execute(&item.payload).await {
            warn!(id = item.id, error = %e, "queued write failed, keeping for retry");
            return false;
        }
        if let Err(e) = self.ctx.store.delete_queue_item(item.id).await {
            warn!(id = item.id, error = %e, "queued write applied but could not be removed");
        }
        true
    }
}
