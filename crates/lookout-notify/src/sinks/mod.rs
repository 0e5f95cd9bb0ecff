// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in notification sinks.

pub mod bus;
pub mod log;
pub mod webhook;

pub use bus::BusSink;
pub use log::LogSink;
pub use webhook::WebhookSink;
