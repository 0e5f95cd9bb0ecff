// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lookout daemon.
//!
//! Provides the error type, the shared data model (config, seen, and queue
//! records, inquiries, wire messages), the injected clock, and the traits the
//! store and notification sinks implement.

pub mod clock;
pub mod error;
pub mod status;
pub mod traits;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::LookoutError;
pub use status::StatusReport;
pub use types::{
    ConfigKey, HealthStatus, InboundMessage, Inquiry, Notification, OutboundEvent, QueueItem,
    QueuedOp, RemoteConfig, SeenRecord, SyncReport,
};

pub use traits::{Adapter, DurableStore, IngressHandler, NotificationSink};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_has_all_variants() {
        let _config = LookoutError::Config("test".into());
        let _store = LookoutError::Store {
            source: Box::new(std::io::Error::other("test")),
        };
        let _transport = LookoutError::Transport {
            message: "test".into(),
            source: None,
        };
        let _status = LookoutError::RemoteStatus {
            status: 500,
            url: "http://x".into(),
        };
        let _notify = LookoutError::Notification {
            message: "test".into(),
            source: None,
        };
        let _gateway = LookoutError::Gateway {
            message: "test".into(),
            source: None,
        };
        let _internal = LookoutError::Internal("test".into());
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_adapter<T: Adapter>() {}
        fn _assert_store<T: DurableStore>() {}
        fn _assert_sink<T: NotificationSink>() {}
        fn _assert_ingress<T: IngressHandler>() {}
    }

    #[test]
    fn health_status_display() {
        assert_eq!(HealthStatus::Healthy.to_string(), "healthy");
        assert_eq!(
            HealthStatus::Unhealthy("disk".into()).to_string(),
            "unhealthy: disk"
        );
        assert!(!HealthStatus::Degraded("slow".into()).is_healthy());
    }

    #[test]
    fn health_status_variants() {
        assert_eq!(HealthStatus::Healthy, HealthStatus::Healthy);
        assert_ne!(HealthStatus::Degraded("slow".into()), HealthStatus::Healthy);
        assert_ne!(HealthStatus::Unhealthy("down".into()), HealthStatus::Healthy);
    }
}
