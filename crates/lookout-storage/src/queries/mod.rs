// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One module per table. Each function is a single statement, so each is its
//! own transaction.

pub mod config;
pub mod queue;
pub mod seen;
