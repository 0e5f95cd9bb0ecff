// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routes each wake trigger to its handler.

use async_trait::async_trait;
use lookout_core::{InboundMessage, IngressHandler, LookoutError};
use tracing::debug;

use crate::connectivity::SyncRegistration;
use crate::ingress::Ingress;
use crate::poll::{PollEngine, PollOutcome};
use crate::reconcile::{ReconcileOutcome, Reconciler};

/// Everything that can wake the daemon.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// The periodic poll timer fired.
    Poll,
    /// A deferred sync is pending and the remote became reachable.
    ConnectivityRestored,
    /// A message from the foreground application.
    Inbound(InboundMessage),
}

impl Trigger {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Poll => "poll",
            Self::ConnectivityRestored => "sync",
            Self::Inbound(message) => message.kind(),
        }
    }
}

#[derive(Debug)]
pub enum TriggerOutcome {
    Polled(PollOutcome),
    Reconciled(ReconcileOutcome),
    Inbound(Result<(), LookoutError>),
}

/// Runs each trigger to completion against the shared handlers.
///
/// Triggers are independent; the daemon may run several at once.
#[derive(Clone)]
pub struct Dispatcher {
    poll: PollEngine,
    reconciler: Reconciler,
    ingress: Ingress,
    registration: SyncRegistration,
}

impl Dispatcher {
    pub fn new(
        poll: PollEngine,
        reconciler: Reconciler,
        ingress: Ingress,
        registration: SyncRegistration,
    ) -> Self {
        Self {
            poll,
            reconciler,
            ingress,
            registration,
        }
    }

    pub fn registration(&self) -> &SyncRegistration {
        &self.registration
    }

    pub async fn dispatch(&self, trigger: Trigger) -> TriggerOutcome {
        debug!(trigger = trigger.kind(), "dispatching");
        match trigger {
            Trigger::Poll => TriggerOutcome::Polled(self.poll.run_once().await),
            Trigger::ConnectivityRestored => TriggerOutcome::Reconciled(self.sync().await),
            Trigger::Inbound(message) => TriggerOutcome::Inbound(self.ingress.handle(message).await),
        }
    }

    /// One reconciliation pass. Settles the registrations that existed
    /// before the pass when nothing is left to retry.
    pub async fn sync(&self) -> ReconcileOutcome {
        let generation = self.registration.generation();
        let outcome = self.reconciler.run_once().await;
        if outcome.is_settled() {
            self.registration.complete(generation);
        }
        outcome
    }

    /// Register a deferred sync when writes survived a restart.
    pub async fn resume_pending(&self) -> bool {
        let pending = self.reconciler.has_pending().await;
        if pending {
            self.registration.register();
        }
        pending
    }

    pub async fn poll(&self) -> PollOutcome {
        self.poll.run_once().await
    }
}

#[async_trait]
impl IngressHandler for Dispatcher {
    async fn handle(&self, message: InboundMessage) -> Result<(), LookoutError> {
        self.ingress.handle(message).await
    }
}
