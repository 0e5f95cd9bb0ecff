// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification sink trait for the surfaces that display alerts.

use async_trait::async_trait;

use crate::error::LookoutError;
use crate::traits::adapter::Adapter;
use crate::types::Notification;

/// A surface that can display a notification.
///
/// Implementations must honor `notification.tag` as a collapse key: showing a
/// notification whose tag is already displayed replaces it instead of adding a
/// second alert. Sinks never persist "has been notified" state.
#[async_trait]
pub trait NotificationSink: Adapter {
    async fn show(&self, notification: &Notification) -> Result<(), LookoutError>;
}
