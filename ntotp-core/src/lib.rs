//! Core library for the ntotp CLI tool
//!
//! This crate provides TOTP secret derivation, code generation and
//! verification, driven by a time reference fetched from NTP servers
//! instead of the local clock.

pub mod error;
pub mod types;

pub mod auth;
pub mod config;
pub mod ntp;
pub mod storage;

pub use tracing_subscriber::filter::LevelFilter;

/// Initialize logging infrastructure
///
/// Sets up tracing with systemd journal logging when running under systemd.
/// Otherwise logs go to stderr so stdout stays reserved for command output.
pub fn init_logging(level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    #[cfg(target_os = "linux")]
    {
        if std::env::var("JOURNAL_STREAM").is_ok() {
            let journal_layer = tracing_journald::layer()?;
            tracing_subscriber::registry()
                .with(journal_layer)
                .with(level)
                .init();
            return Ok(());
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(level)
        .init();

    Ok(())
}
