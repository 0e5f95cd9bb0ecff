// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification emitter for the Lookout daemon.
//!
//! [`Emitter`] composes an alert for one inquiry (title, up to three body
//! lines, `view`/`dismiss` actions, the inquiry id as collapse tag) and shows
//! it on every configured [`NotificationSink`](lookout_core::NotificationSink).

pub mod compose;
pub mod emitter;
pub mod sinks;

pub use compose::{compose, InquiryAlert, GENERIC_BODY};
pub use emitter::Emitter;
pub use sinks::{BusSink, LogSink, WebhookSink};
