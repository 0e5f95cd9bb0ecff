// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Point-in-time summary of the durable state.

use serde::Serialize;

use crate::error::LookoutError;
use crate::traits::DurableStore;

/// What `lookout status` and `GET /v1/status` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    /// A remote base URL is stored.
    pub configured: bool,
    pub base_url: Option<String>,
    /// `lastCheckedTs`, epoch millis.
    pub last_checked: Option<i64>,
    pub seen: usize,
    pub queued: usize,
    pub store_health: String,
}

impl StatusReport {
    /// Read everything from `store`. Any read failure fails the report.
    pub async fn collect(store: &dyn DurableStore) -> Result<Self, LookoutError> {
        let remote = store.remote_config().await?;
        let base_url = remote
            .as_ref()
            .and_then(|config| config.base_url())
            .map(str::to_string);

        Ok(Self {
            configured: base_url.is_some(),
            base_url,
            last_checked: store.last_checked().await?,
            seen: store.all_seen().await?.len(),
            queued: store.all_queue_items().await?.len(),
            store_health: store.health_check().await?.to_string(),
        })
    }
}
