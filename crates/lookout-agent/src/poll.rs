// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The poll-and-notify engine.
//!
//! One wake fetches the remote inquiry collection, alerts the operator about
//! every open inquiry that is newer than the last poll and not yet seen, then
//! advances `lastCheckedTs` and prunes old seen records.
//!
//! Emission happens before the id is marked seen. A crash between the two
//! re-notifies once on the next wake, which the collapse tag absorbs.

use std::collections::HashSet;
use std::sync::Arc;

use lookout_config::PollConfig;
use lookout_core::types::{DAY_MILLIS, HOUR_MILLIS};
use lookout_core::{Inquiry, SeenRecord};
use lookout_notify::InquiryAlert;
use lookout_remote::RemoteClient;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::context::AgentContext;

/// Windows the engine works with, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// How far back the first poll looks when `lastCheckedTs` is absent.
    pub initial_lookback_millis: i64,
    /// Seen records older than this are pruned.
    pub seen_retention_millis: i64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            initial_lookback_millis: 24 * HOUR_MILLIS,
            seen_retention_millis: 30 * DAY_MILLIS,
        }
    }
}

impl From<&PollConfig> for PollSettings {
    fn from(config: &PollConfig) -> Self {
        Self {
            initial_lookback_millis: hours(config.initial_lookback_hours),
            seen_retention_millis: days(config.seen_retention_days),
        }
    }
}

fn hours(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX / HOUR_MILLIS).saturating_mul(HOUR_MILLIS)
}

fn days(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX / DAY_MILLIS).saturating_mul(DAY_MILLIS)
}

/// Why a cycle stopped before advancing `lastCheckedTs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Transport failure or non-success status from the remote.
    Fetch,
    /// The seen set could not be read.
    SeenUnreadable,
    /// Every notification sink failed.
    Emit,
    /// A notified id could not be marked seen.
    MarkSeen,
}

/// What one wake did. Polling never raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No remote base URL is configured; nothing was fetched.
    NotConfigured,
    Aborted(AbortReason),
    Completed { notified: usize, pruned: usize },
}

/// Candidate filter: not seen, still open, and submitted strictly after the
/// last completed poll.
pub fn is_candidate(inquiry: &Inquiry, seen: &HashSet<&str>, last_checked: i64) -> bool {
    !seen.contains(inquiry.id.as_str()) && inquiry.is_open() && inquiry.submitted_after(last_checked)
}

/// Runs poll cycles against the injected context.
///
/// Clones share one cycle lock; cycles never overlap.
#[derive(Clone)]
pub struct PollEngine {
    ctx: AgentContext,
    remote: RemoteClient,
    settings: PollSettings,
    cycle: Arc<Mutex<()>>,
}

impl PollEngine {
    pub fn new(ctx: AgentContext, remote: RemoteClient, settings: PollSettings) -> Self {
        Self {
            ctx,
            remote,
            settings,
            cycle: Arc::new(Mutex::new(())),
        }
    }

    /// Run one cycle to completion.
    pub async fn run_once(&self) -> PollOutcome {
        let _cycle = self.cycle.lock().await;
        let store = &self.ctx.store;

        let config = match store.remote_config().await {
            Ok(Some(config)) if config.base_url().is_some() => config,
            Ok(_) => {
                debug!("remote not configured, skipping poll");
                return PollOutcome::NotConfigured;
            }
            Err(e) => {
                warn!(error = %e, "could not read remote config, treating as not configured");
                return PollOutcome::NotConfigured;
            }
        };

        let now = self.ctx.clock.now_millis();
        let default_since = now.saturating_sub(self.settings.initial_lookback_millis);
        let last_checked = match store.last_checked().await {
            Ok(Some(ts)) => ts,
            Ok(None) => default_since,
            Err(e) => {
                warn!(error = %e, "could not read lastCheckedTs, using default window");
                default_since
            }
        };

        let inquiries = match self.remote.fetch_inquiries(&config).await {
            Ok(inquiries) => inquiries,
            Err(e) => {
                warn!(error = %e, "inquiry fetch failed, will retry next wake");
                return PollOutcome::Aborted(AbortReason::Fetch);
            }
        };

        let snapshot = match store.all_seen().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "could not load seen set, aborting poll");
                return PollOutcome::Aborted(AbortReason::SeenUnreadable);
            }
        };
        let seen: HashSet<&str> = snapshot.iter().map(|r| r.id.as_str()).collect();

        let mut notified = 0;
        for inquiry in inquiries
            .iter()
            .filter(|i| is_candidate(i, &seen, last_checked))
        {
            if let Err(e) = self.ctx.emitter.emit(&InquiryAlert::from(inquiry)).await {
                warn!(id = %inquiry.id, error = %e, "notification failed, aborting poll");
                return PollOutcome::Aborted(AbortReason::Emit);
            }
            let record = SeenRecord::new(inquiry.id.clone(), self.ctx.clock.now_millis());
            if let Err(e) = store.put_seen(&record).await {
                warn!(id = %inquiry.id, error = %e, "could not mark seen, aborting poll");
                return PollOutcome::Aborted(AbortReason::MarkSeen);
            }
            notified += 1;
        }

        // lastCheckedTs never decreases, even when the clock steps back.
        if let Err(e) = store.put_last_checked(now.max(last_checked)).await {
            warn!(error = %e, "could not advance lastCheckedTs");
        }

        let mut pruned = 0;
        for record in snapshot
            .iter()
            .filter(|r| r.is_expired(now, self.settings.seen_retention_millis))
        {
            match store.delete_seen(&record.id).await {
                Ok(()) => pruned += 1,
                Err(e) => warn!(id = %record.id, error = %e, "could not prune seen record"),
            }
        }

        info!(
            fetched = inquiries.len(),
            notified,
            pruned,
            since = last_checked,
            "poll complete"
        );
        PollOutcome::Completed { notified, pruned }
    }
}
