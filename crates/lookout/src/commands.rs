// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot subcommands: `poll`, `sync`, and `configure`.

use lookout_agent::{PollOutcome, ReconcileOutcome, SyncRegistration};
use lookout_config::LookoutConfig;
use lookout_core::{DurableStore, LookoutError, RemoteConfig};

use crate::runtime;

/// Run a single poll cycle and print what it did.
pub async fn run_poll(config: &LookoutConfig) -> Result<(), LookoutError> {
    let (ctx, store) = runtime::context(config).await?;
    let dispatcher = lookout_agent::build_dispatcher(config, ctx, SyncRegistration::new())?;

    let outcome = dispatcher.poll().await;
    println!("{}", describe_poll(&outcome));
    store.database().checkpoint().await?;
    Ok(())
}

/// Run a single reconciliation pass and print the report.
pub async fn run_sync(config: &LookoutConfig) -> Result<(), LookoutError> {
    let (ctx, store) = runtime::context(config).await?;
    let dispatcher = lookout_agent::build_dispatcher(config, ctx, SyncRegistration::new())?;

    let outcome = dispatcher.sync().await;
    println!("{}", describe_sync(&outcome));
    store.database().checkpoint().await?;
    if matches!(outcome, ReconcileOutcome::LoadFailed) {
        return Err(LookoutError::Internal("write queue could not be read".into()));
    }
    Ok(())
}

/// Store the remote connection details, as the foreground app would.
pub async fn run_configure(
    config: &LookoutConfig,
    base_url: String,
    auth_token: Option<String>,
) -> Result<(), LookoutError> {
    let remote = RemoteConfig::new(base_url, auth_token);
    let Some(base) = remote.base_url() else {
        return Err(LookoutError::Config("--base-url must not be empty".into()));
    };
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(LookoutError::Config(format!(
            "--base-url must start with http:// or https://, got `{base}`"
        )));
    }

    let store = runtime::open_store(config).await?;
    store.put_remote_config(&remote).await?;
    println!("remote set to {base}");
    store.database().checkpoint().await?;
    Ok(())
}

pub fn describe_poll(outcome: &PollOutcome) -> String {
    match outcome {
        PollOutcome::NotConfigured => {
            "remote not configured; run `lookout configure --base-url <url>`".to_string()
        }
        PollOutcome::Aborted(reason) => format!("poll aborted ({reason:?}); nothing recorded"),
        PollOutcome::Completed { notified, pruned } => {
            format!("poll complete: {notified} notified, {pruned} seen records pruned")
        }
    }
}

pub fn describe_sync(outcome: &ReconcileOutcome) -> String {
    match outcome {
        ReconcileOutcome::Empty => "write queue empty".to_string(),
        ReconcileOutcome::LoadFailed => "write queue could not be read".to_string(),
        ReconcileOutcome::Completed(report) => format!(
            "sync complete: {} synced, {} failed",
            report.synced, report.failed
        ),
    }
}
