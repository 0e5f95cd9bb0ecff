// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messages from the foreground application.

use lookout_core::{InboundMessage, LookoutError, QueuedOp, RemoteConfig, SeenRecord};
use lookout_notify::InquiryAlert;
use tracing::{debug, info, warn};

use crate::connectivity::SyncRegistration;
use crate::context::AgentContext;

/// Routes each inbound message to the store, the emitter, or the sync
/// registration.
#[derive(Clone)]
pub struct Ingress {
    ctx: AgentContext,
    registration: SyncRegistration,
}

impl Ingress {
    pub fn new(ctx: AgentContext, registration: SyncRegistration) -> Self {
        Self { ctx, registration }
    }

    pub async fn handle(&self, message: InboundMessage) -> Result<(), LookoutError> {
        debug!(kind = message.kind(), "inbound message");
        match message {
            InboundMessage::FirebaseConfig {
                base_url,
                auth_token,
            } => self.configure(RemoteConfig::new(base_url, auth_token)).await,
            InboundMessage::NewInquiry {
                id,
                name,
                project_type,
                budget,
            } => {
                self.notify_live(InquiryAlert {
                    id,
                    name,
                    project_type,
                    budget,
                })
                .await
            }
            InboundMessage::QueueFirebaseOp(op) => self.queue(op).await,
            InboundMessage::SkipWaiting => Ok(()),
        }
    }

    /// Upsert the remote connection details. The next poll uses them.
    async fn configure(&self, config: RemoteConfig) -> Result<(), LookoutError> {
        if config.base_url().is_none() {
            return Err(LookoutError::Config("FIREBASE_CONFIG requires a baseUrl".into()));
        }
        self.ctx.store.put_remote_config(&config).await?;
        info!(base_url = config.base_url().unwrap_or_default(), "remote config updated");
        Ok(())
    }

    /// Alert about an inquiry the foreground saw live.
    ///
    /// The id is marked seen first so a concurrent poll cannot alert about it
    /// a second time. If it cannot be marked, no alert is shown here and the
    /// next poll picks the inquiry up instead.
    async fn notify_live(&self, alert: InquiryAlert) -> Result<(), LookoutError> {
        let record = SeenRecord::new(alert.id.clone(), self.ctx.clock.now_millis());
        if let Err(e) = self.ctx.store.put_seen(&record).await {
            warn!(id = %alert.id, error = %e, "could not mark live inquiry seen, leaving it to the poll");
            return Err(e);
        }
        self.ctx.emitter.emit(&alert).await?;
        Ok(())
    }

    /// Persist a write for later replay and request a deferred sync.
    async fn queue(&self, op: QueuedOp) -> Result<(), LookoutError> {
        let id = self.ctx.store.enqueue(&op, self.ctx.clock.now_millis()).await?;
        info!(id, method = op.method(), "write queued");
        self.registration.register();
        Ok(())
    }
}
