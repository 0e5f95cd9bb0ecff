// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pushes notifications to connected foreground observers.

use async_trait::async_trait;
use lookout_bus::EventBus;
use lookout_core::{
    Adapter, HealthStatus, LookoutError, Notification, NotificationSink, OutboundEvent,
};
use tracing::debug;

/// Publishes each notification as a `NOTIFICATION` event.
///
/// Observers collapse on the tag. With nobody connected the event is dropped
/// and the show still counts as delivered.
#[derive(Debug, Clone)]
pub struct BusSink {
    bus: EventBus,
}

impl BusSink {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl Adapter for BusSink {
    fn name(&self) -> &str {
        "observers"
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LookoutError> {
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for BusSink {
    async fn show(&self, notification: &Notification) -> Result<(), LookoutError> {
        let observers = self
            .bus
            .publish(OutboundEvent::Notification(notification.clone()));
        debug!(tag = %notification.tag, observers, "notification pushed to observers");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{compose, InquiryAlert};

    #[tokio::test]
    async fn observers_receive_notification_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        let sink = BusSink::new(bus);

        let n = compose("t", &InquiryAlert::new("A"));
        sink.show(&n).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), OutboundEvent::Notification(n));
    }

    #[tokio::test]
    async fn no_observers_is_not_a_failure() {
        let sink = BusSink::new(EventBus::default());
        assert!(sink.show(&compose("t", &InquiryAlert::new("A"))).await.is_ok());
    }
}
