// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared startup wiring for every subcommand.

use std::sync::Arc;
use std::time::Duration;

use lookout_agent::AgentContext;
use lookout_bus::EventBus;
use lookout_config::{LookoutConfig, NotifyConfig, RemoteSeedConfig};
use lookout_core::{DurableStore, LookoutError, RemoteConfig, SystemClock};
use lookout_notify::{BusSink, Emitter, LogSink, WebhookSink};
use lookout_storage::SqliteStore;
use tracing::{debug, info};

/// Open the store named in `[storage]`.
pub async fn open_store(config: &LookoutConfig) -> Result<Arc<SqliteStore>, LookoutError> {
    let store = SqliteStore::open(&config.storage).await?;
    Ok(Arc::new(store))
}

/// Write `[remote]` into the store when the store has no usable remote yet.
///
/// Returns `true` when the seed was written. A remote set by the foreground
/// application always wins over the file.
pub async fn seed_remote(
    store: &dyn DurableStore,
    seed: &RemoteSeedConfig,
) -> Result<bool, LookoutError> {
    let Some(base_url) = seed.base_url.as_deref().filter(|u| !u.trim().is_empty()) else {
        return Ok(false);
    };
    let existing = store.remote_config().await?;
    if existing.as_ref().and_then(|c| c.base_url()).is_some() {
        debug!("remote already configured, ignoring [remote] seed");
        return Ok(false);
    }

    store
        .put_remote_config(&RemoteConfig::new(base_url, seed.auth_token.clone()))
        .await?;
    info!(base_url, "remote config seeded from configuration file");
    Ok(true)
}

/// Build the emitter with the sinks `[notify]` enables.
pub fn build_emitter(
    notify: &NotifyConfig,
    bus: &EventBus,
    webhook_timeout: Duration,
) -> Result<Emitter, LookoutError> {
    let mut emitter = Emitter::new(notify.title.clone());
    if notify.log {
        emitter = emitter.with_sink(Arc::new(LogSink::new()));
    }
    if notify.observers {
        emitter = emitter.with_sink(Arc::new(BusSink::new(bus.clone())));
    }
    if let Some(url) = &notify.webhook_url {
        emitter = emitter.with_sink(Arc::new(WebhookSink::new(url.clone(), webhook_timeout)?));
    }
    debug!(sinks = emitter.sink_count(), "emitter ready");
    Ok(emitter)
}

/// Open the store, seed it, and assemble the handler context.
pub async fn context(config: &LookoutConfig) -> Result<(AgentContext, Arc<SqliteStore>), LookoutError> {
    let store = open_store(config).await?;
    seed_remote(store.as_ref(), &config.remote).await?;

    let bus = EventBus::default();
    let emitter = build_emitter(
        &config.notify,
        &bus,
        Duration::from_secs(config.poll.request_timeout_secs),
    )?;
    let ctx = AgentContext::new(store.clone(), emitter, Arc::new(SystemClock), bus);
    Ok((ctx, store))
}
