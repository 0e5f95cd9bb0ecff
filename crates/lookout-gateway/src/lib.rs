// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/WebSocket ingress for the Lookout daemon.
//!
//! The foreground application posts inbound messages here instead of calling
//! into the daemon directly, and subscribes over WebSocket to the events the
//! daemon publishes. Every inbound message goes to one
//! [`lookout_core::IngressHandler`].

pub mod auth;
pub mod handlers;
pub mod server;
pub mod ws;

pub use auth::AuthConfig;
pub use server::{router, start_server, GatewayState, ServerConfig};
