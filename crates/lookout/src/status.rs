// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lookout status` command implementation.
//!
//! Reads the store directly, so it works whether or not the daemon is
//! running. `--json` prints the raw report for scripting.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use lookout_config::LookoutConfig;
use lookout_core::{LookoutError, StatusReport};

use crate::runtime;

pub async fn run_status(config: &LookoutConfig, json: bool, plain: bool) -> Result<(), LookoutError> {
    let store = runtime::open_store(config).await?;
    let report = StatusReport::collect(store.as_ref()).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_report(&report, &config.storage.database_path, use_color);
    }
    Ok(())
}

/// Render epoch millis as RFC 3339, or `never`.
fn format_checked(ts: Option<i64>) -> String {
    ts.and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|at| at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        .unwrap_or_else(|| "never".to_string())
}

fn print_report(report: &StatusReport, database_path: &str, use_color: bool) {
    println!();
    println!("  lookout status");
    println!("  {}", "-".repeat(35));

    let remote = report.base_url.as_deref().unwrap_or("not configured");
    if use_color {
        use colored::Colorize;
        let mark = if report.configured { "✓".green() } else { "✗".red() };
        println!("    Remote:   {mark} {remote}");
    } else {
        let mark = if report.configured { "[OK]" } else { "[--]" };
        println!("    Remote:   {mark} {remote}");
    }

    println!("    Checked:  {}", format_checked(report.last_checked));
    println!("    Seen:     {}", report.seen);
    println!("    Queued:   {}", report.queued);
    println!("    Store:    {} ({database_path})", report.store_health);

    if !report.configured {
        println!();
        println!("  Configure with: lookout configure --base-url <url>");
    }
    println!();
}
