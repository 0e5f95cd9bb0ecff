// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the pluggable components.
//!
//! Store and sink traits extend [`Adapter`]. All use `#[async_trait]` for
//! dynamic dispatch compatibility.

pub mod adapter;
pub mod ingress;
pub mod notify;
pub mod store;

pub use adapter::Adapter;
pub use ingress::IngressHandler;
pub use notify::NotificationSink;
pub use store::DurableStore;
