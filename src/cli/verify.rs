//! Verify command implementation
//!
//! Prints a single pass/fail mark. A malformed secret is reported as a
//! failure, never as a match.

use super::{load_config, prepare_engine, Options};
use colored::Colorize;
use ntotp_core::error::NtotpError;
use ntotp_core::types::OtpSecret;
use tracing::warn;

/// Run `ntotp <secret> <code>`, returning whether the code matched
pub fn run_verify(options: &Options, secret: &str, code: &str) -> Result<bool, NtotpError> {
    let config = load_config(options)?;
    let engine = prepare_engine(options, &config)?;

    let secret = OtpSecret::from(secret);
    let matched = match engine.verify_code(&secret, code) {
        Ok(matched) => matched,
        Err(e) => {
            warn!(error = %e, "Verification failed");
            false
        }
    };

    if matched {
        println!("{}", "✓".green().bold());
    } else {
        println!("{}", "✗".red().bold());
    }

    Ok(matched)
}
