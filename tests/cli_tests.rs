//! Integration tests for the ntotp binary
//!
//! Each test points the binary at a config file whose only NTP server is
//! an in-process fake, so codes are reproducible.

#[path = "../ntotp-core/tests/common/mod.rs"]
mod common;

use common::server_response;
use std::fs;
use std::net::UdpSocket;
use std::path::Path;
use std::process::{Command, Output};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const NTOTP_BINARY: &str = env!("CARGO_BIN_EXE_ntotp");
const FIXED_TIME: i64 = 1_700_000_000;

/// Start a fake NTP server answering with `FIXED_TIME`; returns its endpoint
fn spawn_fake_ntp() -> String {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("bind fake server");
    socket
        .set_read_timeout(Some(Duration::from_secs(10)))
        .expect("set read timeout");
    let endpoint = socket.local_addr().expect("local addr").to_string();

    thread::spawn(move || {
        let mut buf = [0u8; 48];
        while let Ok((_, peer)) = socket.recv_from(&mut buf) {
            let _ = socket.send_to(&server_response(FIXED_TIME), peer);
        }
    });

    endpoint
}

fn closed_endpoint() -> String {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.local_addr().unwrap().to_string()
}

fn write_config(dir: &Path, server: &str) -> String {
    let path = dir.join("config.toml");
    let contents = format!(
        "[ntp]\nservers = ['{}']\ntimeout_secs = 1\n\n[storage]\noutput_dir = '{}'\n",
        server,
        dir.display()
    );
    fs::write(&path, contents).expect("write config");
    path.to_string_lossy().to_string()
}

fn run(config: &str, args: &[&str]) -> Output {
    Command::new(NTOTP_BINARY)
        .arg("--config")
        .arg(config)
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("JOURNAL_STREAM")
        .output()
        .expect("Failed to run ntotp")
}

fn field<'a>(stdout: &'a str, label: &str) -> &'a str {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(label))
        .unwrap_or_else(|| panic!("missing {label} in output:\n{stdout}"))
        .trim()
}

#[test]
fn test_usage_exits_zero() {
    let output = Command::new(NTOTP_BINARY).output().expect("Failed to run ntotp");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ntotp init <username>"));
    assert!(stdout.contains("ntotp <secret> <code>"));

    let output = Command::new(NTOTP_BINARY)
        .args(["a", "b", "c"])
        .output()
        .expect("Failed to run ntotp");
    assert!(output.status.success());
}

#[test]
fn test_init_then_verify() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &spawn_fake_ntp());

    let output = run(&config, &["init", "alice"]);
    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();

    let secret = field(&stdout, "Secret:");
    let code = field(&stdout, "Code:");
    let uri = field(&stdout, "URI:");
    assert_eq!(secret.len(), 32);
    assert_eq!(code.len(), 6);
    assert_eq!(uri, format!("otpauth://totp/alice?secret={}", secret));

    let saved = fs::read_to_string(dir.path().join("secret_alice.txt")).unwrap();
    assert_eq!(saved, format!("{}\n", secret));
    assert!(dir.path().join("qrcode_alice.png").exists());

    let output = run(&config, &[secret, code]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains('✓'));

    // Lower-case secrets are accepted like authenticator apps accept them
    let lower = secret.to_lowercase();
    let output = run(&config, &[lower.as_str(), code]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_verify_wrong_code_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &spawn_fake_ntp());

    let output = run(&config, &["init", "bob", "--no-qr"]);
    assert!(output.status.success());
    assert!(!dir.path().join("qrcode_bob.png").exists());
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let secret = field(&stdout, "Secret:");
    let code = field(&stdout, "Code:");

    let mut wrong = code.as_bytes().to_vec();
    wrong[0] = b'0' + (wrong[0] - b'0' + 1) % 10;
    let wrong = String::from_utf8(wrong).unwrap();

    let output = run(&config, &[secret, wrong.as_str()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains('✗'));
}

#[test]
fn test_malformed_secret_never_passes() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &spawn_fake_ntp());

    let output = run(&config, &["NOT!BASE32", "123456"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains('✗'));
    assert!(!stdout.contains('✓'));
}

#[test]
fn test_unreachable_ntp_is_a_hard_failure() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &closed_endpoint());

    let output = run(&config, &["init", "carol"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unreachable"), "stderr: {stderr}");
    assert!(!dir.path().join("secret_carol.txt").exists());
}

#[test]
fn test_local_clock_fallback_is_flagged() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &closed_endpoint());

    let output = run(&config, &["--allow-local-clock", "init", "dave"]);
    assert!(output.status.success(), "{:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("using the local clock"), "stderr: {stderr}");
}

#[test]
fn test_invalid_username_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &spawn_fake_ntp());

    let output = run(&config, &["init", "../escape"]);
    assert_eq!(output.status.code(), Some(1));
}
