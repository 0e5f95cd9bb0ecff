// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for Lookout configuration loading.

use lookout_config::diagnostic::ConfigError;
use lookout_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[daemon]
log_level = "debug"
drain_timeout_secs = 3

[storage]
database_path = "/tmp/lookout-test.db"
wal_mode = false

[poll]
interval_secs = 120
initial_lookback_hours = 48
seen_retention_days = 7
request_timeout_secs = 10

[sync]
probe_interval_secs = 5
retry_interval_secs = 60
probe_url = "https://status.example.test/ping"
request_timeout_secs = 8

[notify]
log = false
observers = true
webhook_url = "https://hooks.example.test/lookout"
title = "Inquiry!"

[gateway]
enabled = false
host = "0.0.0.0"
port = 9000
bearer_token = "tok"

[remote]
base_url = "https://demo.firebaseio.test"
auth_token = "abc"
"#;

    let config = load_and_validate_str(toml).expect("valid config");
    assert_eq!(config.daemon.log_level, "debug");
    assert_eq!(config.daemon.drain_timeout_secs, 3);
    assert_eq!(config.storage.database_path, "/tmp/lookout-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.poll.interval_secs, 120);
    assert_eq!(config.poll.initial_lookback_hours, 48);
    assert_eq!(config.poll.seen_retention_days, 7);
    assert_eq!(config.sync.retry_interval_secs, 60);
    assert_eq!(
        config.sync.probe_url.as_deref(),
        Some("https://status.example.test/ping")
    );
    assert!(!config.notify.log);
    assert_eq!(config.notify.title, "Inquiry!");
    assert!(!config.gateway.enabled);
    assert_eq!(config.gateway.port, 9000);
    assert_eq!(config.gateway.bearer_token.as_deref(), Some("tok"));
    assert_eq!(
        config.remote.base_url.as_deref(),
        Some("https://demo.firebaseio.test")
    );
    assert_eq!(config.remote.auth_token.as_deref(), Some("abc"));
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("defaults");
    assert_eq!(config.daemon.log_level, "info");
    assert_eq!(config.poll.interval_secs, 300);
    assert_eq!(config.poll.initial_lookback_hours, 24);
    assert_eq!(config.poll.seen_retention_days, 30);
    assert_eq!(config.sync.probe_interval_secs, 15);
    assert_eq!(config.sync.retry_interval_secs, 120);
    assert!(config.sync.probe_url.is_none());
    assert!(config.notify.log);
    assert!(config.notify.observers);
    assert!(config.notify.webhook_url.is_none());
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.gateway.port, 7341);
    assert!(config.gateway.bearer_token.is_none());
    assert!(config.remote.base_url.is_none());
    assert!(config.storage.database_path.ends_with("lookout.db"));
}

#[test]
fn unknown_key_gets_suggestion_and_span() {
    let toml = "[poll]\nintervl_secs = 600\n";

    let errors = load_and_validate_str(toml).expect_err("unknown key");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, span, .. } if {
            key == "intervl_secs"
                && suggestion.as_deref() == Some("interval_secs")
                && valid_keys.contains("seen_retention_days")
                && span.is_some()
        })
    });
    assert!(found, "got: {errors:?}");
}

#[test]
fn unknown_top_level_section_rejected() {
    let errors = load_and_validate_str("[metrics]\nenabled = true\n").expect_err("unknown section");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "metrics")
    ));
}

#[test]
fn invalid_type_reports_key_path() {
    let errors =
        load_and_validate_str("[gateway]\nport = \"eighty\"\n").expect_err("wrong type");
    assert!(
        errors.iter().any(
            |e| matches!(e, ConfigError::InvalidType { key, .. } if key.ends_with("port"))
        ),
        "got: {errors:?}"
    );
}

#[test]
fn validation_failures_surface_after_parse() {
    let errors = load_and_validate_str("[poll]\ninterval_secs = 10\n").expect_err("too short");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ConfigError::Validation { message } if message.contains("poll.interval_secs")
    ));
}

#[test]
fn errors_render_with_code_and_help() {
    use miette::Diagnostic;

    let error = ConfigError::UnknownKey {
        key: "bearer_tokn".to_string(),
        suggestion: Some("bearer_token".to_string()),
        valid_keys: "enabled, host, port, bearer_token".to_string(),
        span: None,
        src: None,
    };
    assert_eq!(
        error.code().map(|c| c.to_string()).as_deref(),
        Some("lookout::config::unknown_key")
    );
    let help = error.help().map(|h| h.to_string()).unwrap_or_default();
    assert!(help.contains("did you mean `bearer_token`"), "{help}");

    let mut buf = String::new();
    miette::GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("render");
    assert!(buf.contains("bearer_tokn"));
}

#[test]
fn explicit_path_loads_and_validates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lookout.toml");
    std::fs::write(&path, "[gateway]\nport = 8088\n").expect("write config");

    let config = load_and_validate_path(&path).expect("valid file");
    assert_eq!(config.gateway.port, 8088);
}

#[test]
fn explicit_path_unknown_key_points_into_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lookout.toml");
    std::fs::write(&path, "[sync]\nretry_intervl_secs = 5\n").expect("write config");

    let errors = load_and_validate_path(&path).expect_err("unknown key");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion, .. }
            if key == "retry_intervl_secs" && suggestion.as_deref() == Some("retry_interval_secs")
    )));
}
