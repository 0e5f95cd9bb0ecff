// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wake handlers and the trigger loop for the Lookout daemon.
//!
//! - [`PollEngine`] fetches inquiries, notifies about new ones, and prunes
//!   the seen set
//! - [`Reconciler`] replays the offline write queue
//! - [`Ingress`] handles messages from the foreground application
//! - [`Daemon`] wakes on the poll timer and on connectivity changes and runs
//!   each wake in its own task
//!
//! No handler keeps state between wakes beyond what the store holds.

pub mod connectivity;
pub mod context;
pub mod daemon;
pub mod dispatch;
pub mod ingress;
pub mod poll;
pub mod reconcile;
pub mod shutdown;

use std::sync::Arc;
use std::time::Duration;

use lookout_config::LookoutConfig;
use lookout_core::LookoutError;
use lookout_remote::RemoteClient;

pub use connectivity::{ConnectivityMonitor, HttpProbe, Reachability, SyncRegistration};
pub use context::AgentContext;
pub use daemon::Daemon;
pub use dispatch::{Dispatcher, Trigger, TriggerOutcome};
pub use ingress::Ingress;
pub use poll::{AbortReason, PollEngine, PollOutcome, PollSettings};
pub use reconcile::{ReconcileOutcome, Reconciler};

/// Wire the handlers for `ctx` using the timeouts and windows in `config`.
pub fn build_dispatcher(
    config: &LookoutConfig,
    ctx: AgentContext,
    registration: SyncRegistration,
) -> Result<Dispatcher, LookoutError> {
    let poll_remote = RemoteClient::new(Duration::from_secs(config.poll.request_timeout_secs))?;
    let sync_remote = RemoteClient::new(Duration::from_secs(config.sync.request_timeout_secs))?;

    Ok(Dispatcher::new(
        PollEngine::new(ctx.clone(), poll_remote, PollSettings::from(&config.poll)),
        Reconciler::new(ctx.clone(), sync_remote),
        Ingress::new(ctx, registration.clone()),
        registration,
    ))
}

/// Assemble the full daemon: handlers, connectivity monitor, and timers.
pub fn build_daemon(config: &LookoutConfig, ctx: AgentContext) -> Result<Daemon, LookoutError> {
    let registration = SyncRegistration::new();
    let probe_remote = RemoteClient::new(Duration::from_secs(config.sync.request_timeout_secs))?;
    let probe = HttpProbe::new(probe_remote, ctx.store.clone(), config.sync.probe_url.clone());
    let monitor = ConnectivityMonitor::new(
        registration.clone(),
        Arc::new(probe),
        Duration::from_secs(config.sync.probe_interval_secs),
        Duration::from_secs(config.sync.retry_interval_secs),
    );
    let dispatcher = build_dispatcher(config, ctx, registration)?;

    Ok(Daemon::new(
        dispatcher,
        monitor,
        Duration::from_secs(config.poll.interval_secs),
        Duration::from_secs(config.daemon.drain_timeout_secs),
    ))
}
