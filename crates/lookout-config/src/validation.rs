// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks run after deserialization.
//!
//! Every rule is evaluated; the caller receives all failures at once.

use crate::diagnostic::ConfigError;
use crate::model::LookoutConfig;

/// Shortest recurring poll period accepted.
pub const MIN_POLL_INTERVAL_SECS: u64 = 60;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
pub fn validate_config(config: &LookoutConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.daemon.log_level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "daemon.log_level `{}` must be one of {}",
            config.daemon.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    if config.poll.interval_secs < MIN_POLL_INTERVAL_SECS {
        errors.push(ConfigError::validation(format!(
            "poll.interval_secs must be at least {MIN_POLL_INTERVAL_SECS}, got {}",
            config.poll.interval_secs
        )));
    }
    for (key, value) in [
        ("poll.initial_lookback_hours", config.poll.initial_lookback_hours),
        ("poll.seen_retention_days", config.poll.seen_retention_days),
        ("poll.request_timeout_secs", config.poll.request_timeout_secs),
        ("sync.probe_interval_secs", config.sync.probe_interval_secs),
        ("sync.retry_interval_secs", config.sync.retry_interval_secs),
        ("sync.request_timeout_secs", config.sync.request_timeout_secs),
    ] {
        if value == 0 {
            errors.push(ConfigError::validation(format!("{key} must be at least 1")));
        }
    }

    let host = config.gateway.host.trim();
    let host_ok = host.parse::<std::net::IpAddr>().is_ok()
        || (!host.is_empty()
            && host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-'));
    if !host_ok {
        errors.push(ConfigError::validation(format!(
            "gateway.host `{host}` is not a valid IP address or hostname"
        )));
    }
    if config.gateway.port == 0 {
        errors.push(ConfigError::validation("gateway.port must not be 0"));
    }

    for (key, url) in [
        ("notify.webhook_url", config.notify.webhook_url.as_deref()),
        ("sync.probe_url", config.sync.probe_url.as_deref()),
        ("remote.base_url", config.remote.base_url.as_deref()),
    ] {
        if let Some(url) = url
            && !is_http_url(url)
        {
            errors.push(ConfigError::validation(format!(
                "{key} `{url}` must start with http:// or https://"
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.len() > scheme.len() && url.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &LookoutConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&LookoutConfig::default()).is_ok());
    }

    #[test]
    fn poll_interval_below_minimum_fails() {
        let mut config = LookoutConfig::default();
        config.poll.interval_secs = 59;
        let msgs = messages(&config);
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("poll.interval_secs"));
    }

    #[test]
    fn poll_interval_at_minimum_passes() {
        let mut config = LookoutConfig::default();
        config.poll.interval_secs = MIN_POLL_INTERVAL_SECS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn all_failures_are_collected() {
        let mut config = LookoutConfig::default();
        config.storage.database_path = "  ".to_string();
        config.poll.seen_retention_days = 0;
        config.gateway.port = 0;
        config.notify.webhook_url = Some("ftp://hooks.example".to_string());
        let msgs = messages(&config);
        assert_eq!(msgs.len(), 4, "{msgs:?}");
        assert!(msgs.iter().any(|m| m.contains("database_path")));
        assert!(msgs.iter().any(|m| m.contains("seen_retention_days")));
        assert!(msgs.iter().any(|m| m.contains("gateway.port")));
        assert!(msgs.iter().any(|m| m.contains("notify.webhook_url")));
    }

    #[test]
    fn bad_log_level_fails() {
        let mut config = LookoutConfig::default();
        config.daemon.log_level = "loud".to_string();
        assert!(messages(&config)[0].contains("daemon.log_level"));
    }

    #[test]
    fn hostnames_and_ips_accepted() {
        let mut config = LookoutConfig::default();
        for host in ["0.0.0.0", "::1", "localhost", "lookout.internal"] {
            config.gateway.host = host.to_string();
            assert!(validate_config(&config).is_ok(), "{host}");
        }
        config.gateway.host = "bad host!".to_string();
        assert!(messages(&config)[0].contains("gateway.host"));
    }

    #[test]
    fn remote_base_url_needs_scheme() {
        let mut config = LookoutConfig::default();
        config.remote.base_url = Some("example.firebaseio.com".to_string());
        assert!(messages(&config)[0].contains("remote.base_url"));
        config.remote.base_url = Some("https://example.firebaseio.com".to_string());
        assert!(validate_config(&config).is_ok());
    }
}
