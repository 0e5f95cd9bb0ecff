// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway routes driven in-process through the router.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lookout_bus::EventBus;
use lookout_core::{InboundMessage, IngressHandler, LookoutError};
use lookout_gateway::{router, AuthConfig, GatewayState};
use lookout_storage::{Database, SqliteStore};
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

const TOKEN: &str = "gateway-token";

#[derive(Default)]
struct RecordingHandler {
    received: Mutex<Vec<InboundMessage>>,
}

#[async_trait]
impl IngressHandler for RecordingHandler {
    async fn handle(&self, message: InboundMessage) -> Result<(), LookoutError> {
        if let InboundMessage::FirebaseConfig { base_url, .. } = &message
            && base_url.trim().is_empty()
        {
            return Err(LookoutError::Config("baseUrl required".into()));
        }
        self.received.lock().await.push(message);
        Ok(())
    }
}

async fn app(token: Option<&str>) -> (Router, Arc<RecordingHandler>) {
    let handler = Arc::new(RecordingHandler::default());
    let store = SqliteStore::new(Database::open(":memory:", false).await.unwrap());
    let state = GatewayState::new(
        handler.clone(),
        EventBus::default(),
        Arc::new(store),
        AuthConfig::new(token.map(str::to_string)),
    );
    (router(state), handler)
}

fn post(body: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/v1/messages")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let (app, _) = app(None).await;
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["observers"], 0);
}

#[tokio::test]
async fn messages_require_token() {
    let (app, handler) = app(Some(TOKEN)).await;
    let response = app
        .oneshot(post(r#"{"type":"SKIP_WAITING"}"#, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(handler.received.lock().await.is_empty());
}

#[tokio::test]
async fn unconfigured_token_rejects_everything() {
    let (app, _) = app(None).await;
    let response = app
        .oneshot(post(r#"{"type":"SKIP_WAITING"}"#, Some("anything")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn accepted_message_reaches_handler() {
    let (app, handler) = app(Some(TOKEN)).await;
    let body = r#"{"type":"NEW_INQUIRY","id":"A","name":"Ada","projectType":"Web"}"#;
    let response = app.oneshot(post(body, Some(TOKEN))).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(json_body(response).await["type"], "NEW_INQUIRY");

    let received = handler.received.lock().await;
    assert_eq!(
        received.as_slice(),
        &[InboundMessage::NewInquiry {
            id: "A".into(),
            name: Some("Ada".into()),
            project_type: Some("Web".into()),
            budget: None,
        }]
    );
}

#[tokio::test]
async fn malformed_message_is_bad_request() {
    let (app, _) = app(Some(TOKEN)).await;
    let response = app
        .oneshot(post(r#"{"type":"UNKNOWN_THING"}"#, Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn handler_config_error_is_bad_request() {
    let (app, _) = app(Some(TOKEN)).await;
    let response = app
        .oneshot(post(
            r#"{"type":"FIREBASE_CONFIG","baseUrl":" "}"#,
            Some(TOKEN),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_reports_store_contents() {
    let (app, _) = app(Some(TOKEN)).await;
    let response = app
        .oneshot(
            Request::get("/v1/status")
                .header("authorization", format!("Bearer {TOKEN}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["configured"], false);
    assert_eq!(body["queued"], 0);
    assert_eq!(body["storeHealth"], "healthy");
}
