// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Lookout daemon.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Lookout configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LookoutConfig {
    /// Process-level settings.
    #[serde(default)]
    pub daemon: DaemonConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Poll-and-notify engine settings.
    #[serde(default)]
    pub poll: PollConfig,

    /// Write-queue reconciliation settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Notification sink settings.
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Ingress gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Remote connection seed, applied when the store has none.
    #[serde(default)]
    pub remote: RemoteSeedConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DaemonConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Seconds to wait for in-flight wakes during shutdown.
    #[serde(default = "default_drain_timeout_secs")]
    pub drain_timeout_secs: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            drain_timeout_secs: default_drain_timeout_secs(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_drain_timeout_secs() -> u64 {
    10
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("lookout").join("lookout.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("lookout.db"))
        .to_string_lossy()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Poll-and-notify engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PollConfig {
    /// Seconds between recurring poll wakes.
    #[serde(default = "default_poll_interval_secs")]
    pub interval_secs: u64,

    /// How far back the first poll looks when no `lastCheckedTs` exists.
    #[serde(default = "default_initial_lookback_hours")]
    pub initial_lookback_hours: u64,

    /// Seen records older than this many days are pruned.
    #[serde(default = "default_seen_retention_days")]
    pub seen_retention_days: u64,

    /// Timeout for the inquiry collection request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval_secs(),
            initial_lookback_hours: default_initial_lookback_hours(),
            seen_retention_days: default_seen_retention_days(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    300
}

fn default_initial_lookback_hours() -> u64 {
    24
}

fn default_seen_retention_days() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Write-queue reconciliation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Seconds between reachability probes.
    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,

    /// Minimum seconds between reconciliation attempts while items stay queued.
    #[serde(default = "default_retry_interval_secs")]
    pub retry_interval_secs: u64,

    /// URL probed for reachability. Falls back to the stored remote base URL.
    #[serde(default)]
    pub probe_url: Option<String>,

    /// Timeout for each replayed request and for the probe.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            probe_interval_secs: default_probe_interval_secs(),
            retry_interval_secs: default_retry_interval_secs(),
            probe_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_probe_interval_secs() -> u64 {
    15
}

fn default_retry_interval_secs() -> u64 {
    120
}

/// Notification sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyConfig {
    /// Write every notification to the log.
    #[serde(default = "default_true")]
    pub log: bool,

    /// Push notifications to connected gateway observers.
    #[serde(default = "default_true")]
    pub observers: bool,

    /// POST each notification as JSON to this URL.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Title shown on every inquiry notification.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            log: true,
            observers: true,
            webhook_url: None,
            title: default_title(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_title() -> String {
    "New inquiry".to_string()
}

/// Ingress gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Serve the HTTP/WebSocket ingress.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token required on every authenticated route. `None` rejects all.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_host(),
            port: default_port(),
            bearer_token: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7341
}

/// Remote connection seed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteSeedConfig {
    /// Base URL of the remote database.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Auth token appended to remote reads.
    #[serde(default)]
    pub auth_token: Option<String>,
}
