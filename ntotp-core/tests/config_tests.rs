//! Unit tests for configuration parsing and validation

use ntotp_core::config::toml_config::{load_config_from_path, load_config_or_default};
use ntotp_core::config::{Config, DEFAULT_NTP_SERVERS};
use ntotp_core::error::{ConfigError, NtotpError};
use ntotp_core::ntp::NtpTimeSource;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.ntp.servers.len(), DEFAULT_NTP_SERVERS.len());
    assert_eq!(config.ntp.servers[0], "ntp.aliyun.com:123");
    assert_eq!(config.ntp.timeout_secs, 2);
    assert!(!config.ntp.allow_local_clock_fallback);
    assert_eq!(config.totp.skew_steps, 0);
    assert!(config.storage.write_qr);
}

#[test]
fn test_empty_server_list() {
    let mut config = Config::default();
    config.ntp.servers.clear();
    assert_eq!(
        config.validate().unwrap_err(),
        "At least one NTP server is required"
    );
}

#[test]
fn test_blank_server_entry() {
    let mut config = Config::default();
    config.ntp.servers.push("  ".to_string());
    assert_eq!(
        config.validate().unwrap_err(),
        "NTP server entries cannot be empty"
    );
}

#[test]
fn test_zero_timeout() {
    let mut config = Config::default();
    config.ntp.timeout_secs = 0;
    assert_eq!(config.validate().unwrap_err(), "NTP timeout cannot be zero");
}

#[test]
fn test_skew_limit() {
    let mut config = Config::default();
    config.totp.skew_steps = 10;
    assert!(config.validate().is_ok());
    config.totp.skew_steps = 11;
    assert!(config.validate().is_err());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
            [ntp]
            servers = ["127.0.0.1:1123", "pool.ntp.org:123"]

            [totp]
            skew_steps = 1
        "#,
    )
    .unwrap();

    let config = load_config_from_path(&path).unwrap();

    assert_eq!(config.ntp.servers, vec!["127.0.0.1:1123", "pool.ntp.org:123"]);
    assert_eq!(config.ntp.timeout_secs, 2);
    assert_eq!(config.totp.skew_steps, 1);
    assert_eq!(config.storage.output_dir, ".");

    let source = NtpTimeSource::from_config(&config.ntp);
    assert_eq!(source.servers(), config.ntp.servers.as_slice());
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[ntp]\ntimeout_secs = 0\n").unwrap();

    let result = load_config_from_path(&path);
    assert!(matches!(
        result,
        Err(NtotpError::Config(ConfigError::ValidationError { .. }))
    ));
}

#[test]
fn test_malformed_toml_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[ntp\nservers = ").unwrap();

    let error = load_config_or_default(&path).unwrap_err();
    assert!(matches!(error, NtotpError::Toml(_)));
    assert!(error.to_string().starts_with("TOML parsing error"));
}
