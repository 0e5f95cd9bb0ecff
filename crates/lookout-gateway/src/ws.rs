// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket endpoint for foreground observers.
//!
//! Server -> Client: every outbound event as JSON, e.g.
//! ```json
//! {"type": "SYNC_COMPLETE", "synced": 2, "failed": 1}
//! ```
//!
//! Client -> Server: any inbound message, e.g.
//! ```json
//! {"type": "QUEUE_FIREBASE_OP", "method": "PATCH", "url": "...", "body": {}}
//! ```
//! A message that fails to parse or to apply is answered with
//! `{"type": "ERROR", "error": "..."}`.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use lookout_core::{InboundMessage, OutboundEvent};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};

use crate::server::GatewayState;

/// Query parameters accepted on the upgrade request.
#[derive(Debug, Default, Deserialize)]
pub struct WsParams {
    /// Bearer token, for clients that cannot set headers.
    #[serde(default)]
    pub token: Option<String>,
}

/// Error frame sent back to the client.
#[derive(Debug, Serialize)]
struct WsError {
    #[serde(rename = "type")]
    kind: &'static str,
    error: String,
}

impl WsError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            kind: "ERROR",
            error: error.into(),
        }
    }
}

/// WebSocket upgrade handler.
///
/// Accepts the token from the `Authorization` header or the `token` query
/// parameter.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    headers: HeaderMap,
    State(state): State<GatewayState>,
) -> Response {
    let authorized = state.auth.accepts_headers(&headers)
        || params.token.as_deref().is_some_and(|t| state.auth.accepts(t));
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle one connection.
///
/// A sender task forwards bus events and error replies to the client; the
/// receive loop hands client messages to the ingress handler.
async fn handle_socket(socket: WebSocket, state: GatewayState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let mut events = state.bus.subscribe();
    let (reply_tx, mut reply_rx) = mpsc::channel::<String>(16);

    let sender_task = tokio::spawn(async move {
        loop {
            let frame = tokio::select! {
                event = events.recv() => match event {
                    Ok(event) => match encode_event(&event) {
                        Some(frame) => frame,
                        None => continue,
                    },
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "observer lagged, events dropped");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                reply = reply_rx.recv() => match reply {
                    Some(frame) => frame,
                    None => break,
                },
            };
            if ws_sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = ws_receiver.next().await {
        match msg {
            Message::Text(text) => {
                let text_str: &str = &text;
                let reply = match serde_json::from_str::<InboundMessage>(text_str) {
                    Ok(message) => {
                        let kind = message.kind();
                        match state.handler.handle(message).await {
                            Ok(()) => None,
                            Err(e) => {
                                tracing::warn!(kind, error = %e, "inbound message failed");
                                Some(WsError::new(e.to_string()))
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!("invalid WebSocket message: {e}");
                        Some(WsError::new(format!("invalid message: {e}")))
                    }
                };
                if let Some(reply) = reply
                    && let Ok(frame) = serde_json::to_string(&reply)
                    && reply_tx.send(frame).await.is_err()
                {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    sender_task.abort();
}

fn encode_event(event: &OutboundEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(frame) => Some(frame),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode outbound event");
            None
        }
    }
}
