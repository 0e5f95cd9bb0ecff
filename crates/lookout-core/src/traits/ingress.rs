// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam between the transport that receives foreground messages and the
//! daemon logic that acts on them.

use async_trait::async_trait;

use crate::error::LookoutError;
use crate::types::InboundMessage;

/// Accepts one inbound message and applies its effect before returning.
#[async_trait]
pub trait IngressHandler: Send + Sync + 'static {
    async fn handle(&self, message: InboundMessage) -> Result<(), LookoutError>;
}
