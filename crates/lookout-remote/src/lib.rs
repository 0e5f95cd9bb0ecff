// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote database access for the Lookout daemon.

pub mod client;
pub mod inquiry;

pub use client::RemoteClient;
pub use inquiry::parse_collection;
