// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Lookout integration tests.
//!
//! Provides a recording notification sink and a harness that wires the poll,
//! reconcile, and ingress handlers against a temp SQLite store, a manual
//! clock, and a `wiremock` remote.
//!
//! # Components
//!
//! - [`MockSink`] - Notification sink that records and collapses by tag
//! - [`FaultyStore`] - Store wrapper that fails chosen operations on demand
//! - [`TestHarness`] - Fully wired dispatcher with inspectable collaborators

pub mod faulty_store;
pub mod harness;
pub mod mock_sink;

pub use faulty_store::{FaultyStore, StoreFault};
pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_sink::MockSink;
