// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the store, the engines, and the ingress surface.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Milliseconds in one hour.
pub const HOUR_MILLIS: i64 = 60 * 60 * 1000;

/// Milliseconds in one day.
pub const DAY_MILLIS: i64 = 24 * HOUR_MILLIS;

/// HTTP method used for a queued operation that does not name one.
pub const DEFAULT_QUEUE_METHOD: &str = "PATCH";

/// Health status reported by component health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Component is fully operational.
    Healthy,
    /// Component is operational but experiencing issues.
    Degraded(String),
    /// Component is not operational.
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => f.write_str("healthy"),
            Self::Degraded(reason) => write!(f, "degraded: {reason}"),
            Self::Unhealthy(reason) => write!(f, "unhealthy: {reason}"),
        }
    }
}

/// Keys of the `config` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum ConfigKey {
    /// Remote base URL and auth token.
    #[strum(serialize = "firebaseConfig")]
    FirebaseConfig,
    /// Epoch millis of the last completed poll.
    #[strum(serialize = "lastCheckedTs")]
    LastCheckedTs,
}

/// Connection details for the remote inquiry collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            auth_token,
        }
    }

    /// The base URL with surrounding whitespace and trailing slashes removed,
    /// or `None` when unset or blank.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(|u| u.trim().trim_end_matches('/'))
            .filter(|u| !u.is_empty())
    }

    /// The auth token, or `None` when unset or blank.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// A row of the `seen` table: the operator has already been alerted about `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenRecord {
    pub id: String,
    /// Epoch millis at which the id was marked seen.
    pub ts: i64,
}

impl SeenRecord {
    pub fn new(id: impl Into<String>, ts: i64) -> Self {
        Self { id: id.into(), ts }
    }

    /// True when the record was marked more than `retention_millis` before `now`.
    pub fn is_expired(&self, now: i64, retention_millis: i64) -> bool {
        self.ts < now - retention_millis
    }
}

/// A write operation captured while offline, replayed by the reconciler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedOp {
    #[serde(default)]
    pub method: Option<String>,
    pub url: String,
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

impl QueuedOp {
    /// The HTTP method to replay with, defaulting to a partial update.
    pub fn method(&self) -> &str {
        self.method
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_QUEUE_METHOD)
    }
}

/// A row of the `queue` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Monotonically assigned by the store.
    pub id: i64,
    pub payload: QueuedOp,
    /// Epoch millis at enqueue time.
    pub ts: i64,
}

/// One inquiry from the remote collection. Read-only snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub id: String,
    pub full_name: Option<String>,
    pub project_type: Option<String>,
    pub budget: Option<String>,
    pub status: Option<String>,
    /// Epoch millis; `None` when missing or unparseable.
    pub submitted_at: Option<i64>,
}

impl Inquiry {
    /// An inquiry is open when its status is `"new"` or absent.
    pub fn is_open(&self) -> bool {
        match self.status.as_deref() {
            None => true,
            Some(s) => s.trim().is_empty() || s == "new",
        }
    }

    /// True when the inquiry was submitted strictly after `ts`.
    pub fn submitted_after(&self, ts: i64) -> bool {
        self.submitted_at.is_some_and(|at| at > ts)
    }
}

/// Aggregate outcome of one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub synced: usize,
    pub failed: usize,
}

/// A user action offered on a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

/// Opaque routing data attached to a notification for the click handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub inquiry_id: String,
}

/// A rendered alert ready for a sink. `tag` is the collapse key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub tag: String,
    pub title: String,
    pub body: String,
    pub actions: Vec<NotificationAction>,
    pub data: NotificationData,
}

/// Messages the foreground application sends into the daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum InboundMessage {
    /// Upserts the remote connection details.
    FirebaseConfig {
        base_url: String,
        #[serde(default)]
        auth_token: Option<String>,
    },
    /// An inquiry the foreground already observed live.
    NewInquiry {
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        project_type: Option<String>,
        #[serde(default)]
        budget: Option<String>,
    },
    /// A write to replay once connectivity returns.
    QueueFirebaseOp(QueuedOp),
    /// Lifecycle control; accepted and ignored.
    SkipWaiting,
}

impl InboundMessage {
    /// Wire name of the message type, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FirebaseConfig { .. } => "FIREBASE_CONFIG",
            Self::NewInquiry { .. } => "NEW_INQUIRY",
            Self::QueueFirebaseOp(_) => "QUEUE_FIREBASE_OP",
            Self::SkipWaiting => "SKIP_WAITING",
        }
    }
}

/// Events the daemon broadcasts to connected foreground observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundEvent {
    /// Emitted after every reconciliation pass.
    SyncComplete { synced: usize, failed: usize },
    /// A notification surfaced to observers that render alerts themselves.
    Notification(Notification),
}

impl From<SyncReport> for OutboundEvent {
    fn from(report: SyncReport) -> Self {
        Self::SyncComplete {
            synced: report.synced,
            failed: report.failed,
        }
    }
}
