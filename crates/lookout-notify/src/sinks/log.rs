// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writes notifications to the tracing log.

use async_trait::async_trait;
use dashmap::DashMap;
use lookout_core::{Adapter, HealthStatus, LookoutError, Notification, NotificationSink};
use tracing::info;

/// Logs each notification and keeps the latest one per tag, so a repeat for
/// the same inquiry is reported as a replacement.
#[derive(Debug, Default)]
pub struct LogSink {
    displayed: DashMap<String, Notification>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently displayed notifications, one per tag.
    pub fn displayed(&self) -> Vec<Notification> {
        self.displayed.iter().map(|e| e.value().clone()).collect()
    }

    /// Forget a displayed notification, as when the operator dismisses it.
    pub fn dismiss(&self, tag: &str) -> bool {
        self.displayed.remove(tag).is_some()
    }
}

#[async_trait]
impl Adapter for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LookoutError> {
        self.displayed.clear();
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for LogSink {
    async fn show(&self, notification: &Notification) -> Result<(), LookoutError> {
        let replaced = self
            .displayed
            .insert(notification.tag.clone(), notification.clone())
            .is_some();
        info!(
            tag = %notification.tag,
            title = %notification.title,
            body = %notification.body.replace('\n', " | "),
            replaced,
            "notification"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{compose, InquiryAlert};
    use tracing_test::traced_test;

    #[tokio::test]
    #[traced_test]
    async fn same_tag_replaces() {
        let sink = LogSink::new();
        let first = compose("t", &InquiryAlert::new("A"));
        let mut second = first.clone();
        second.body = "updated".into();

        sink.show(&first).await.unwrap();
        sink.show(&second).await.unwrap();
        sink.show(&compose("t", &InquiryAlert::new("B"))).await.unwrap();

        let mut shown = sink.displayed();
        shown.sort_by(|a, b| a.tag.cmp(&b.tag));
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].body, "updated");
        assert!(logs_contain("replaced=true"));
    }

    #[tokio::test]
    async fn dismiss_removes_tag() {
        let sink = LogSink::new();
        sink.show(&compose("t", &InquiryAlert::new("A"))).await.unwrap();
        assert!(sink.dismiss("A"));
        assert!(!sink.dismiss("A"));
        assert!(sink.displayed().is_empty());
    }
}
