// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notification sink for deterministic testing.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use lookout_core::{Adapter, HealthStatus, LookoutError, Notification, NotificationSink};
use tokio::sync::Mutex;

/// Records every notification it is asked to show.
///
/// `shown()` keeps the full history; `displayed()` collapses it by tag the
/// way a notification surface would. Call `set_failing(true)` to make every
/// `show` fail.
#[derive(Default)]
pub struct MockSink {
    shown: Mutex<Vec<Notification>>,
    failing: AtomicBool,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every successful `show`, in call order.
    pub async fn shown(&self) -> Vec<Notification> {
        self.shown.lock().await.clone()
    }

    pub async fn show_count(&self) -> usize {
        self.shown.lock().await.len()
    }

    /// Tags shown at least once, in first-shown order.
    pub async fn displayed_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for notification in self.shown.lock().await.iter() {
            if !tags.contains(&notification.tag) {
                tags.push(notification.tag.clone());
            }
        }
        tags
    }

    pub async fn clear(&self) {
        self.shown.lock().await.clear();
    }
}

#[async_trait]
impl Adapter for MockSink {
    fn name(&self) -> &str {
        "mock-sink"
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LookoutError> {
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for MockSink {
    async fn show(&self, notification: &Notification) -> Result<(), LookoutError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(LookoutError::Notification {
                message: "mock sink failure".into(),
                source: None,
            });
        }
        self.shown.lock().await.push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_notify::{compose, InquiryAlert};

    #[tokio::test]
    async fn records_and_collapses_by_tag() {
        let sink = MockSink::new();
        sink.show(&compose("t", &InquiryAlert::new("A"))).await.unwrap();
        sink.show(&compose("t", &InquiryAlert::new("A"))).await.unwrap();
        sink.show(&compose("t", &InquiryAlert::new("B"))).await.unwrap();

        assert_eq!(sink.show_count().await, 3);
        assert_eq!(sink.displayed_tags().await, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn failing_sink_records_nothing() {
        let sink = MockSink::new();
        sink.set_failing(true);
        assert!(sink.show(&compose("t", &InquiryAlert::new("A"))).await.is_err());
        assert_eq!(sink.show_count().await, 0);
    }
}
