// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lookout_core::{InboundMessage, LookoutError, StatusReport};
use serde::Serialize;

use crate::server::GatewayState;

/// Response body for an accepted inbound message.
#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub status: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Connected WebSocket observers.
    pub observers: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// HTTP status for a failed inbound message.
pub(crate) fn status_for(err: &LookoutError) -> StatusCode {
    match err {
        LookoutError::Config(_) => StatusCode::BAD_REQUEST,
        LookoutError::Notification { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// POST /v1/messages
///
/// Hands one inbound message to the daemon and waits for it to be handled.
pub async fn post_messages(
    State(state): State<GatewayState>,
    payload: Result<Json<InboundMessage>, JsonRejection>,
) -> Response {
    let message = match payload {
        Ok(Json(message)) => message,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected inbound message");
            return error(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let kind = message.kind();
    match state.handler.handle(message).await {
        Ok(()) => (
            StatusCode::ACCEPTED,
            Json(AcceptedResponse {
                status: "accepted",
                kind,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(kind, error = %e, "inbound message failed");
            error(status_for(&e), e.to_string())
        }
    }
}

/// GET /health
///
/// Unauthenticated. Reports the store's health; 503 when it is unhealthy.
pub async fn get_public_health(State(state): State<GatewayState>) -> Response {
    let health = match state.store.health_check().await {
        Ok(health) => health,
        Err(e) => lookout_core::HealthStatus::Unhealthy(e.to_string()),
    };
    let code = match health {
        lookout_core::HealthStatus::Unhealthy(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };

    let body = HealthResponse {
        status: health.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        observers: state.bus.observer_count(),
    };
    (code, Json(body)).into_response()
}

/// GET /v1/status
pub async fn get_status(State(state): State<GatewayState>) -> Response {
    match StatusReport::collect(state.store.as_ref()).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => error(StatusCode::SERVICE_UNAVAILABLE, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(
            status_for(&LookoutError::Config("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&LookoutError::Notification {
                message: "down".into(),
                source: None
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&LookoutError::Internal("x".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn accepted_response_serializes() {
        let json = serde_json::to_value(AcceptedResponse {
            status: "accepted",
            kind: "NEW_INQUIRY",
        })
        .unwrap();
        assert_eq!(json["type"], "NEW_INQUIRY");
    }
}
