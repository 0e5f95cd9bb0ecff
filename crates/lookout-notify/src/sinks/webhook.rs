// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! POSTs each notification as JSON to a configured URL.

use std::time::Duration;

use async_trait::async_trait;
use lookout_core::{Adapter, HealthStatus, LookoutError, Notification, NotificationSink};
use tracing::debug;

/// Delivers notifications to an HTTP endpoint. The receiver is expected to
/// collapse on the `tag` field.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LookoutError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookoutError::Notification {
                message: format!("failed to build webhook client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Adapter for WebhookSink {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LookoutError> {
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    async fn show(&self, notification: &Notification) -> Result<(), LookoutError> {
        let response = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await
            .map_err(|e| LookoutError::Notification {
                message: format!("webhook request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookoutError::Notification {
                message: format!("webhook returned {status}"),
                source: None,
            });
        }
        debug!(tag = %notification.tag, status = %status, "webhook delivered");
        Ok(())
    }
}
