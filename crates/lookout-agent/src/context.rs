// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handles injected into every wake handler.

use std::sync::Arc;

use lookout_bus::EventBus;
use lookout_core::{Clock, DurableStore};
use lookout_notify::Emitter;

/// The store, emitter, clock, and observer bus a handler works with.
///
/// Opened once at startup and cloned into each task. Nothing here caches
/// persisted state; every wake re-reads what it needs from the store.
#[derive(Clone)]
pub struct AgentContext {
    pub store: Arc<dyn DurableStore>,
    pub emitter: Emitter,
    pub clock: Arc<dyn Clock>,
    pub bus: EventBus,
}

impl AgentContext {
    pub fn new(
        store: Arc<dyn DurableStore>,
        emitter: Emitter,
        clock: Arc<dyn Clock>,
        bus: EventBus,
    ) -> Self {
        Self {
            store,
            emitter,
            clock,
            bus,
        }
    }
}
