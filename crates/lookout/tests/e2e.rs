// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end flows: the foreground app talks to the gateway, the daemon
//! polls and replays, observers see the results.
//!
//! Each test creates an isolated TestHarness with a temp store and its own
//! mock remote. Tests are independent and order-insensitive.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use lookout_core::{DurableStore, IngressHandler, OutboundEvent};
use lookout_gateway::{router, AuthConfig, GatewayState};
use lookout_test_utils::harness::TEST_EPOCH;
use lookout_test_utils::TestHarness;
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const TOKEN: &str = "e2e-token";

fn gateway(h: &TestHarness) -> axum::Router {
    let handler: Arc<dyn IngressHandler> = Arc::new(h.dispatcher.clone());
    router(GatewayState::new(
        handler,
        h.bus.clone(),
        h.store.clone(),
        AuthConfig::new(Some(TOKEN.into())),
    ))
}

fn message(body: serde_json::Value) -> Request<Body> {
    Request::post("/v1/messages")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {TOKEN}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ---- Configure through the gateway, then poll ----

#[tokio::test]
async fn configured_remote_is_polled() {
    let h = TestHarness::builder().unconfigured().build().await.unwrap();
    let response = gateway(&h)
        .oneshot(message(json!({
            "type": "FIREBASE_CONFIG",
            "baseUrl": h.remote.uri(),
            "authToken": "remote-secret"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    h.serve_inquiries(json!({
        "A": {"fullName": "Ada", "status": "new", "submittedAt": TEST_EPOCH - 1_000},
        "B": {"fullName": "Bob", "status": "closed", "submittedAt": TEST_EPOCH - 1_000}
    }))
    .await;
    h.poll().await;

    assert_eq!(h.sink.displayed_tags().await, vec!["A"]);
    let requests = h.remote.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("auth=remote-secret"));
}

// ---- Live inquiry through the gateway suppresses the poll alert ----

#[tokio::test]
async fn live_inquiry_then_poll_alerts_once() {
    let h = TestHarness::builder().build().await.unwrap();
    let response = gateway(&h)
        .oneshot(message(json!({"type": "NEW_INQUIRY", "id": "A", "name": "Ada"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    h.serve_inquiries(json!({
        "A": {"fullName": "Ada", "status": "new", "submittedAt": TEST_EPOCH - 1_000}
    }))
    .await;
    h.poll().await;
    h.poll().await;

    assert_eq!(h.sink.show_count().await, 1);
}

// ---- Offline writes queued through the gateway replay on sync ----

#[tokio::test]
async fn queued_writes_replay_and_observers_hear_about_it() {
    let h = TestHarness::builder().build().await.unwrap();
    Mock::given(method("PATCH"))
        .and(path("/inquiries/A.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&h.remote)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/inquiries/B.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&h.remote)
        .await;

    let app = gateway(&h);
    for (verb, target) in [("PATCH", "/inquiries/A.json"), ("DELETE", "/inquiries/B.json")] {
        let response = app
            .clone()
            .oneshot(message(json!({
                "type": "QUEUE_FIREBASE_OP",
                "method": verb,
                "url": h.remote_url(target),
                "body": {"status": "contacted"}
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
    assert_eq!(h.store.all_queue_items().await.unwrap().len(), 2);

    let mut events = h.bus.subscribe();
    h.sync().await;
    assert_eq!(
        events.recv().await.unwrap(),
        OutboundEvent::SyncComplete { synced: 1, failed: 1 }
    );

    let left = h.store.all_queue_items().await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].payload.method.as_deref(), Some("DELETE"));
}

// ---- Status over the gateway reflects the store ----

#[tokio::test]
async fn status_endpoint_tracks_progress() {
    let h = TestHarness::builder().build().await.unwrap();
    h.serve_inquiries(json!({
        "A": {"status": "new", "submittedAt": TEST_EPOCH - 1_000}
    }))
    .await;
    h.poll().await;

    let response = gateway(&h)
        .oneshot(
            Request::get("/v1/status")
                .header("authorization", format!("Bearer {TOKEN}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["configured"], true);
    assert_eq!(body["seen"], 1);
    assert_eq!(body["lastChecked"], TEST_EPOCH);
}

// ---- Environment overrides reach the loaded configuration ----

#[test]
#[serial]
fn env_overrides_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("lookout.toml");
    std::fs::write(&file, "[poll]\ninterval_secs = 600\n").unwrap();

    // SAFETY: serialized with every other env-mutating test in this binary.
    unsafe { std::env::set_var("LOOKOUT_POLL_INTERVAL_SECS", "900") };
    let config = lookout_config::load_and_validate_path(&file);
    unsafe { std::env::remove_var("LOOKOUT_POLL_INTERVAL_SECS") };

    assert_eq!(config.unwrap().poll.interval_secs, 900);
}

#[test]
#[serial]
fn env_override_is_still_validated() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("lookout.toml");
    std::fs::write(&file, "").unwrap();

    // SAFETY: serialized with every other env-mutating test in this binary.
    unsafe { std::env::set_var("LOOKOUT_POLL_INTERVAL_SECS", "5") };
    let config = lookout_config::load_and_validate_path(&file);
    unsafe { std::env::remove_var("LOOKOUT_POLL_INTERVAL_SECS") };

    assert!(config.is_err());
}
