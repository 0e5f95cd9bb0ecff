// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Lookout daemon.
//!
//! Layered TOML files plus `LOOKOUT_*` environment overrides, strict key
//! checking, semantic validation, and miette diagnostics with typo hints.
//!
//! ```no_run
//! let config = lookout_config::load_and_validate().expect("config errors");
//! println!("polling every {}s", config.poll.interval_secs);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    DaemonConfig, GatewayConfig, LookoutConfig, NotifyConfig, PollConfig, RemoteSeedConfig,
    StorageConfig, SyncConfig,
};

/// Load from the XDG hierarchy and validate.
pub fn load_and_validate() -> Result<LookoutConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load from an explicit file (plus env overrides) and validate.
pub fn load_and_validate_path(path: &Path) -> Result<LookoutConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(absolute(path), content)])
            .unwrap_or_default()
    })
}

/// Load from a TOML string and validate. No files or env are consulted.
pub fn load_and_validate_str(toml_content: &str) -> Result<LookoutConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<LookoutConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<LookoutConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

fn absolute(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

/// Read every config file figment may have merged, for span lookup.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from("lookout.toml")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("lookout/lookout.toml"));
    }
    candidates.push("/etc/lookout/lookout.toml".into());

    candidates
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((absolute(&path), content))
        })
        .collect()
}
