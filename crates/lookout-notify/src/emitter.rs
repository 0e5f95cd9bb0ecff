// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The notification emitter: composes an alert and hands it to every sink.

use std::sync::Arc;

use lookout_core::{LookoutError, Notification, NotificationSink};
use tracing::{debug, warn};

use crate::compose::{compose, InquiryAlert};

/// Fans one alert out to all configured sinks.
///
/// Sinks are shown the notification concurrently. Emission succeeds if at
/// least one sink accepted it; it persists nothing.
#[derive(Clone)]
pub struct Emitter {
    title: String,
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl Emitter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sinks: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn sinks(&self) -> &[Arc<dyn NotificationSink>] {
        &self.sinks
    }

    /// Surface `alert`. Returns the notification that was shown.
    pub async fn emit(&self, alert: &InquiryAlert) -> Result<Notification, LookoutError> {
        let notification = compose(&self.title, alert);
        if self.sinks.is_empty() {
            debug!(id = %alert.id, "no notification sinks configured");
            return Ok(notification);
        }

        let outcomes = futures::future::join_all(self.sinks.iter().map(|sink| {
            let notification = &notification;
            async move { (sink.name().to_string(), sink.show(notification).await) }
        }))
        .await;

        let mut errors = Vec::new();
        for (sink, outcome) in outcomes {
            if let Err(e) = outcome {
                warn!(sink = %sink, id = %alert.id, error = %e, "notification sink failed");
                errors.push(format!("{sink}: {e}"));
            }
        }

        if errors.len() == self.sinks.len() {
            return Err(LookoutError::Notification {
                message: format!("every sink failed: {}", errors.join("; ")),
                source: None,
            });
        }
        debug!(id = %alert.id, failed = errors.len(), "notification emitted");
        Ok(notification)
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("title", &self.title)
            .field(
                "sinks",
                &self.sinks.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
