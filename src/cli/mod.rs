//! CLI command implementations
//!
//! Both commands share the same setup: load configuration, then fetch the
//! time reference exactly once before any TOTP operation.

use colored::{ColoredString, Colorize};
use ntotp_core::auth::totp::TotpEngine;
use ntotp_core::config::{toml_config, Config};
use ntotp_core::error::NtotpError;
use ntotp_core::ntp::{self, NtpTimeSource, TimeReference};
use std::path::PathBuf;
use tracing::debug;

pub mod init;
pub mod verify;

/// Options shared by every command
pub struct Options {
    pub config_path: Option<PathBuf>,
    pub allow_local_clock: bool,
    pub no_qr: bool,
}

/// Print the usage banner for an unrecognized argument list
pub fn print_usage() {
    println!("init:   ntotp init <username>");
    println!("verify: ntotp <secret> <code>");
}

/// Load the configuration named by the options, or the default one
pub fn load_config(options: &Options) -> Result<Config, NtotpError> {
    match &options.config_path {
        Some(path) => toml_config::load_config_from_path(path),
        None => toml_config::load_config(),
    }
}

/// Fetch the run's time reference and build the engine around it
///
/// A degraded (local clock) reference is announced on stderr.
pub fn prepare_engine(options: &Options, config: &Config) -> Result<TotpEngine, NtotpError> {
    let source = NtpTimeSource::from_config(&config.ntp);
    let allow_fallback = options.allow_local_clock || config.ntp.allow_local_clock_fallback;
    let reference = ntp::establish_reference(&source, allow_fallback)?;

    match degraded_warning(&reference) {
        Some(warning) => eprintln!("{}", warning),
        None => debug!(origin = ?reference.origin(), time = %reference.instant(), "Using time reference"),
    }

    Ok(TotpEngine::with_skew(reference, config.totp.skew_steps))
}

/// Stderr banner for a reference that did not come from NTP or a fixed time
fn degraded_warning(reference: &TimeReference) -> Option<ColoredString> {
    reference.is_degraded().then(|| {
        "WARNING: NTP unreachable, using the local clock. Codes are not protected against clock tampering."
            .yellow()
            .bold()
    })
}
