// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fan-out of [`OutboundEvent`]s to every connected foreground observer.
//!
//! Delivery is best-effort: an event published while nobody is subscribed is
//! dropped, and a subscriber that falls more than the channel capacity behind
//! loses the oldest events.

use lookout_core::OutboundEvent;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Events buffered per subscriber before the slowest one starts lagging.
pub const DEFAULT_CAPACITY: usize = 64;

/// Cloneable handle to the broadcast channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<OutboundEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Register a new observer. It receives events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<OutboundEvent> {
        self.tx.subscribe()
    }

    /// Send `event` to every current observer. Returns how many received it.
    pub fn publish(&self, event: OutboundEvent) -> usize {
        match self.tx.send(event) {
            Ok(n) => {
                trace!(observers = n, "event published");
                n
            }
            Err(_) => {
                debug!("no observers connected, event dropped");
                0
            }
        }
    }

    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_core::SyncReport;

    #[test]
    fn publish_without_observers_drops() {
        let bus = EventBus::default();
        assert_eq!(bus.observer_count(), 0);
        assert_eq!(bus.publish(SyncReport::default().into()), 0);
    }

    #[tokio::test]
    async fn every_observer_receives_each_event() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        let event = OutboundEvent::from(SyncReport {
            synced: 3,
            failed: 1,
        });
        assert_eq!(bus.publish(event.clone()), 2);

        assert_eq!(a.recv().await.unwrap(), event);
        assert_eq!(b.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_events() {
        let bus = EventBus::default();
        let _early = bus.subscribe();
        bus.publish(SyncReport::default().into());

        let mut late = bus.subscribe();
        assert!(matches!(
            late.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn dropped_receivers_stop_counting() {
        let bus = EventBus::default();
        let rx = bus.subscribe();
        assert_eq!(bus.observer_count(), 1);
        drop(rx);
        assert_eq!(bus.observer_count(), 0);
    }
}
