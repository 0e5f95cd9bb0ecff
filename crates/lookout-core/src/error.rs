// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Lookout daemon.

use thiserror::Error;

/// The primary error type used across all Lookout components.
#[derive(Debug, Error)]
pub enum LookoutError {
    /// Configuration errors (invalid TOML, bad values, unusable remote config).
    #[error("configuration error: {0}")]
    Config(String),

    /// Local persistence failure (I/O, query failure, schema mismatch, serialization).
    #[error("storage error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Network-level failure talking to a remote endpoint (connect, timeout, body read).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A remote endpoint answered with a non-success HTTP status.
    #[error("remote returned {status} for {url}")]
    RemoteStatus { status: u16, url: String },

    /// A notification sink could not surface an alert.
    #[error("notification error: {message}")]
    Notification {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The ingress gateway failed to bind or serve.
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LookoutError {
    /// Wraps any error as a storage failure.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store {
            source: Box::new(err),
        }
    }

    /// True for local persistence failures.
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store { .. })
    }

    /// True for failures that a later attempt may not see: network errors and
    /// non-success remote statuses.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::RemoteStatus { .. })
    }
}
