// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Lookout daemon.
//!
//! WAL-mode SQLite with embedded migrations and a single serialized
//! connection via `tokio-rusqlite`. Exposes the `config`, `seen`, and `queue`
//! tables through [`SqliteStore`], which implements
//! [`lookout_core::DurableStore`].

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStore;
pub use database::Database;
