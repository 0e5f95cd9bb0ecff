// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lookout.toml` > `~/.config/lookout/lookout.toml` > `/etc/lookout/lookout.toml`
//! with environment variable overrides via `LOOKOUT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LookoutConfig;

/// Config sections addressable from `LOOKOUT_<SECTION>_<KEY>` variables.
const ENV_SECTIONS: &[&str] = &[
    "daemon", "storage", "poll", "sync", "notify", "gateway", "remote",
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lookout/lookout.toml` (system-wide)
/// 3. `~/.config/lookout/lookout.toml` (user XDG config)
/// 4. `./lookout.toml` (local directory)
/// 5. `LOOKOUT_*` environment variables
pub fn load_config() -> Result<LookoutConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LookoutConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LookoutConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LookoutConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LookoutConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LookoutConfig::default()))
        .merge(Toml::file("/etc/lookout/lookout.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("lookout/lookout.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("lookout.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")`: `LOOKOUT_POLL_INTERVAL_SECS` must
/// map to `poll.interval_secs`, not `poll.interval.secs`.
fn env_provider() -> Env {
    Env::prefixed("LOOKOUT_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env key to its dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
