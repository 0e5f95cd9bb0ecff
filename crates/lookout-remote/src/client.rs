// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the remote database.
//!
//! Reads the inquiry collection, replays queued writes, and probes
//! reachability. Every failure maps onto [`LookoutError::Transport`] or
//! [`LookoutError::RemoteStatus`]; callers decide what a failure means.

use std::time::Duration;

use lookout_core::{Inquiry, LookoutError, QueuedOp, RemoteConfig};
use reqwest::{Method, Url};
use tracing::debug;

use crate::inquiry::parse_collection;

/// Path of the inquiry collection under the base URL.
const INQUIRIES_PATH: &str = "inquiries.json";

/// Shared HTTP client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
}

impl RemoteClient {
    /// Build a client whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, LookoutError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookoutError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client })
    }

    /// `{base}/inquiries.json?auth={token}`. The `auth` pair is omitted when
    /// no token is configured.
    pub fn inquiries_url(config: &RemoteConfig) -> Result<Url, LookoutError> {
        let base = config
            .base_url()
            .ok_or_else(|| LookoutError::Config("remote base URL is not set".into()))?;
        let mut url = Url::parse(&format!("{base}/{INQUIRIES_PATH}"))
            .map_err(|e| LookoutError::Config(format!("invalid remote base URL `{base}`: {e}")))?;
        if let Some(token) = config.auth_token() {
            url.query_pairs_mut().append_pair("auth", token);
        }
        Ok(url)
    }

    /// Fetch the whole inquiry collection in one request, in remote order.
    pub async fn fetch_inquiries(&self, config: &RemoteConfig) -> Result<Vec<Inquiry>, LookoutError> {
        let url = Self::inquiries_url(config)?;
        let shown = redact(&url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport(&shown, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookoutError::RemoteStatus {
                status: status.as_u16(),
                url: shown,
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| transport(&shown, e))?;
        let inquiries = parse_collection(body).ok_or_else(|| LookoutError::Transport {
            message: format!("unexpected inquiry collection shape from {shown}"),
            source: None,
        })?;
        debug!(url = %shown, count = inquiries.len(), "fetched inquiries");
        Ok(inquiries)
    }

    /// Replay one queued write. Succeeds only on a 2xx response.
    pub async fn execute(&self, op: &QueuedOp) -> Result<(), LookoutError> {
        let method = Method::from_bytes(op.method().to_ascii_uppercase().as_bytes())
            .map_err(|e| LookoutError::Config(format!("invalid HTTP method `{}`: {e}", op.method())))?;
        let url = Url::parse(&op.url)
            .map_err(|e| LookoutError::Config(format!("invalid queued URL: {e}")))?;
        let shown = redact(&url);

        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = &op.body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| transport(&shown, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookoutError::RemoteStatus {
                status: status.as_u16(),
                url: shown,
            });
        }
        debug!(method = %method, url = %shown, status = %status, "queued write replayed");
        Ok(())
    }

    /// True when `url` answers at all. Any HTTP status counts as reachable.
    pub async fn probe(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => {
                debug!(url, status = %response.status(), "probe reachable");
                true
            }
            Err(e) => {
                debug!(url, error = %e, "probe unreachable");
                false
            }
        }
    }
}

/// The URL without its query string, safe to log.
fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}

fn transport(url: &str, e: reqwest::Error) -> LookoutError {
    LookoutError::Transport {
        message: format!("request to {url} failed: {e}"),
        source: Some(Box::new(e)),
    }
}
