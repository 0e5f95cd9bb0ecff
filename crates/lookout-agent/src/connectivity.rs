// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deferred-sync registration and the connectivity monitor.
//!
//! Enqueuing a write registers a deferred sync. The monitor wakes on every
//! registration and on a fixed probe interval; while a sync is pending and
//! the remote is reachable it asks the dispatcher for a reconciliation pass.
//! A pass that leaves failures behind keeps the registration pending, so the
//! monitor retries on its own schedule.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lookout_core::DurableStore;
use lookout_remote::RemoteClient;
use tokio::sync::{mpsc, Notify};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::dispatch::Trigger;

/// Generation counters for deferred sync requests.
///
/// Cheap to clone; every clone shares the same counters.
#[derive(Debug, Clone, Default)]
pub struct SyncRegistration {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    registered: AtomicU64,
    completed: AtomicU64,
    wake: Notify,
}

impl SyncRegistration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a sync once connectivity allows.
    pub fn register(&self) {
        let generation = self.inner.registered.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "deferred sync registered");
        self.inner.wake.notify_one();
    }

    pub fn is_pending(&self) -> bool {
        self.inner.registered.load(Ordering::SeqCst) > self.inner.completed.load(Ordering::SeqCst)
    }

    /// Latest registered generation. Capture before a pass starts.
    pub fn generation(&self) -> u64 {
        self.inner.registered.load(Ordering::SeqCst)
    }

    /// Mark everything up to `generation` as satisfied. Registrations that
    /// arrived during the pass stay pending.
    pub fn complete(&self, generation: u64) {
        self.inner.completed.fetch_max(generation, Ordering::SeqCst);
    }

    async fn registered(&self) {
        self.inner.wake.notified().await;
    }
}

/// Answers whether the remote can currently be reached.
#[async_trait]
pub trait Reachability: Send + Sync + 'static {
    async fn is_reachable(&self) -> bool;
}

/// Probes over HTTP.
///
/// Uses the configured probe URL, falling back to the stored remote base
/// URL. With neither available the remote is assumed reachable and the
/// replay itself decides.
pub struct HttpProbe {
    remote: RemoteClient,
    store: Arc<dyn DurableStore>,
    probe_url: Option<String>,
}

impl HttpProbe {
    pub fn new(remote: RemoteClient, store: Arc<dyn DurableStore>, probe_url: Option<String>) -> Self {
        Self {
            remote,
            store,
            probe_url,
        }
    }

    async fn target(&self) -> Option<String> {
        if let Some(url) = &self.probe_url {
            return Some(url.clone());
        }
        match self.store.remote_config().await {
            Ok(Some(config)) => config.base_url().map(|base| format!("{base}/")),
            _ => None,
        }
    }
}

#[async_trait]
impl Reachability for HttpProbe {
    async fn is_reachable(&self) -> bool {
        match self.target().await {
            Some(url) => self.remote.probe(&url).await,
            None => true,
        }
    }
}

/// Why the monitor woke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Registered,
    Tick,
}

/// Decide whether a wake should trigger a reconciliation pass.
///
/// Nothing fires unless a sync is pending and the remote is reachable. A
/// fresh registration fires at once. A tick fires on an offline-to-online
/// transition, on the first attempt, or once `retry` has elapsed since the
/// previous attempt.
pub fn should_fire(
    wake: Wake,
    pending: bool,
    online: bool,
    was_online: bool,
    since_attempt: Option<Duration>,
    retry: Duration,
) -> bool {
    if !pending || !online {
        return false;
    }
    match wake {
        Wake::Registered => true,
        Wake::Tick => !was_online || since_attempt.is_none_or(|elapsed| elapsed >= retry),
    }
}

pub struct ConnectivityMonitor {
    registration: SyncRegistration,
    probe: Arc<dyn Reachability>,
    probe_interval: Duration,
    retry_interval: Duration,
}

impl ConnectivityMonitor {
    pub fn new(
        registration: SyncRegistration,
        probe: Arc<dyn Reachability>,
        probe_interval: Duration,
        retry_interval: Duration,
    ) -> Self {
        Self {
            registration,
            probe,
            probe_interval,
            retry_interval,
        }
    }

    /// Run until `cancel` fires or the trigger channel closes.
    pub async fn run(self, triggers: mpsc::Sender<Trigger>, cancel: CancellationToken) {
        let mut was_online = false;
        let mut last_attempt: Option<Instant> = None;

        loop {
            let wake = tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.registration.registered() => Wake::Registered,
                _ = tokio::time::sleep(self.probe_interval) => Wake::Tick,
            };

            let pending = self.registration.is_pending();
            if !pending {
                continue;
            }

            let online = self.probe.is_reachable().await;
            if online != was_online {
                info!(online, "connectivity changed");
            }

            let since = last_attempt.map(|at| at.elapsed());
            if should_fire(wake, pending, online, was_online, since, self.retry_interval) {
                last_attempt = Some(Instant::now());
                if triggers.send(Trigger::ConnectivityRestored).await.is_err() {
                    break;
                }
            }
            was_online = online;
        }

        debug!("connectivity monitor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    const RETRY: Duration = Duration::from_secs(120);

    #[test]
    fn registration_generations() {
        let reg = SyncRegistration::new();
        assert!(!reg.is_pending());

        reg.register();
        let generation = reg.generation();
        assert!(reg.is_pending());

        reg.register();
        reg.complete(generation);
        assert!(reg.is_pending(), "later registration stays pending");

        reg.complete(reg.generation());
        assert!(!reg.is_pending());

        reg.complete(generation);
        assert!(!reg.is_pending(), "completion never moves backwards");
    }

    #[test]
    fn nothing_fires_without_pending_or_connectivity() {
        assert!(!should_fire(Wake::Registered, false, true, true, None, RETRY));
        assert!(!should_fire(Wake::Registered, true, false, false, None, RETRY));
        assert!(!should_fire(Wake::Tick, true, false, true, None, RETRY));
    }

    #[test]
    fn registration_fires_immediately_when_online() {
        let recent = Some(Duration::from_secs(1));
        assert!(should_fire(Wake::Registered, true, true, true, recent, RETRY));
    }

    #[test]
    fn tick_fires_on_transition_or_after_retry() {
        let recent = Some(Duration::from_secs(1));
        assert!(should_fire(Wake::Tick, true, true, false, recent, RETRY));
        assert!(!should_fire(Wake::Tick, true, true, true, recent, RETRY));
        assert!(should_fire(Wake::Tick, true, true, true, Some(RETRY), RETRY));
        assert!(should_fire(Wake::Tick, true, true, true, None, RETRY));
    }

    struct Toggle(AtomicBool);

    #[async_trait]
    impl Reachability for Toggle {
        async fn is_reachable(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn monitor_fires_when_connectivity_returns() {
        let reg = SyncRegistration::new();
        let probe = Arc::new(Toggle(AtomicBool::new(false)));
        let monitor = ConnectivityMonitor::new(
            reg.clone(),
            probe.clone(),
            Duration::from_millis(10),
            RETRY,
        );
        let (tx, mut rx) = mpsc::channel(4);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(monitor.run(tx, cancel.clone()));

        reg.register();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err(), "offline must not fire");

        probe.0.store(true, Ordering::SeqCst);
        let trigger = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(trigger, Trigger::ConnectivityRestored));

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn http_probe_assumes_reachable_without_target() {
        let db = lookout_storage::Database::open(":memory:", false).await.unwrap();
        let probe = HttpProbe::new(
            RemoteClient::new(Duration::from_secs(1)).unwrap(),
            Arc::new(lookout_storage::SqliteStore::new(db)),
            None,
        );
        assert!(probe.is_reachable().await);
    }

    #[tokio::test]
    async fn http_probe_uses_configured_url() {
        let db = lookout_storage::Database::open(":memory:", false).await.unwrap();
        let probe = HttpProbe::new(
            RemoteClient::new(Duration::from_secs(1)).unwrap(),
            Arc::new(lookout_storage::SqliteStore::new(db)),
            Some("http://127.0.0.1:9/".into()),
        );
        assert!(!probe.is_reachable().await);
    }
}
