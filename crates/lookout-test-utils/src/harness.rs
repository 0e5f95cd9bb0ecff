// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end handler testing.
//!
//! `TestHarness` assembles the poll, reconcile, and ingress handlers over a
//! temp SQLite database, a [`ManualClock`], a [`MockSink`], and a `wiremock`
//! server standing in for the remote database. Handlers reach the database
//! through a [`FaultyStore`] so tests can fail single operations.

use std::sync::Arc;
use std::time::Duration;

use lookout_agent::{
    AgentContext, Dispatcher, Ingress, PollEngine, PollOutcome, PollSettings, ReconcileOutcome,
    Reconciler, SyncRegistration,
};
use lookout_bus::EventBus;
use lookout_core::{DurableStore, InboundMessage, LookoutError, ManualClock, RemoteConfig};
use lookout_notify::Emitter;
use lookout_remote::RemoteClient;
use lookout_storage::{Database, SqliteStore};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::faulty_store::FaultyStore;
use crate::mock_sink::MockSink;

/// Token the harness stores with the remote config.
pub const TEST_TOKEN: &str = "test-token";

/// Default harness start time, in epoch millis.
pub const TEST_EPOCH: i64 = 1_700_000_000_000;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    now: i64,
    settings: PollSettings,
    configured: bool,
    title: String,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            now: TEST_EPOCH,
            settings: PollSettings::default(),
            configured: true,
            title: "New inquiry".to_string(),
        }
    }

    /// Start the manual clock at `now` epoch millis.
    pub fn starting_at(mut self, now: i64) -> Self {
        self.now = now;
        self
    }

    pub fn with_settings(mut self, settings: PollSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Leave `Config[firebaseConfig]` unset.
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Build the harness, creating the temp store and mock remote.
    pub async fn build(self) -> Result<TestHarness, LookoutError> {
        let temp_dir = tempfile::TempDir::new().map_err(LookoutError::store)?;
        let db_path = temp_dir.path().join("test.db");
        let db = Database::open(&db_path.to_string_lossy(), true).await?;
        let store = Arc::new(SqliteStore::new(db));

        let remote = MockServer::start().await;
        if self.configured {
            store
                .put_remote_config(&RemoteConfig::new(remote.uri(), Some(TEST_TOKEN.into())))
                .await?;
        }

        let clock = Arc::new(ManualClock::new(self.now));
        let sink = Arc::new(MockSink::new());
        let bus = EventBus::default();
        let emitter = Emitter::new(self.title).with_sink(sink.clone());

        let faults = Arc::new(FaultyStore::new(store.clone()));
        let ctx = AgentContext::new(faults.clone(), emitter, clock.clone(), bus.clone());
        let client = RemoteClient::new(Duration::from_secs(5))?;
        let registration = SyncRegistration::new();
        let dispatcher = Dispatcher::new(
            PollEngine::new(ctx.clone(), client.clone(), self.settings),
            Reconciler::new(ctx.clone(), client),
            Ingress::new(ctx, registration.clone()),
            registration.clone(),
        );

        Ok(TestHarness {
            store,
            faults,
            clock,
            sink,
            bus,
            remote,
            registration,
            dispatcher,
            _temp_dir: temp_dir,
        })
    }
}

/// A wired handler set with every collaborator exposed for assertions.
pub struct TestHarness {
    /// SQLite store (temp DB, cleaned up on drop).
    pub store: Arc<SqliteStore>,
    /// The store the handlers see. Arm faults here; reads through `store`
    /// bypass them.
    pub faults: Arc<FaultyStore>,
    pub clock: Arc<ManualClock>,
    /// The only notification sink.
    pub sink: Arc<MockSink>,
    pub bus: EventBus,
    /// Stands in for the remote database.
    pub remote: MockServer,
    pub registration: SyncRegistration,
    pub dispatcher: Dispatcher,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Serve `body` as the inquiry collection, replacing earlier mocks.
    pub async fn serve_inquiries(&self, body: Value) {
        self.remote.reset().await;
        Mock::given(method("GET"))
            .and(path("/inquiries.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.remote)
            .await;
    }

    /// Answer the inquiry collection with `status`, replacing earlier mocks.
    pub async fn fail_inquiries(&self, status: u16) {
        self.remote.reset().await;
        Mock::given(method("GET"))
            .and(path("/inquiries.json"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.remote)
            .await;
    }

    /// Absolute URL of `path` on the mock remote.
    pub fn remote_url(&self, path: &str) -> String {
        format!("{}{path}", self.remote.uri())
    }

    pub async fn poll(&self) -> PollOutcome {
        self.dispatcher.poll().await
    }

    pub async fn sync(&self) -> ReconcileOutcome {
        self.dispatcher.sync().await
    }

    pub async fn send(&self, message: InboundMessage) -> Result<(), LookoutError> {
        lookout_core::IngressHandler::handle(&self.dispatcher, message).await
    }

    /// Ids currently in the seen table.
    pub async fn seen_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .store
            .all_seen()
            .await
            .map(|records| records.into_iter().map(|r| r.id).collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }
}
