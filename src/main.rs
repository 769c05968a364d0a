//! ntotp - TOTP CLI backed by NTP time
//!
//! Generates and verifies Google-Authenticator compatible codes using a
//! time reference fetched from NTP servers instead of the local clock.

use clap::Parser;
use ntotp_core::{error::NtotpError, init_logging, LevelFilter};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "ntotp")]
#[command(about = "TOTP generation and verification against NTP time")]
#[command(override_usage = "ntotp init <USERNAME>\n       ntotp <SECRET> <CODE>")]
struct Cli {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Fall back to the local clock if every NTP server fails
    #[arg(long)]
    allow_local_clock: bool,

    /// Do not write the QR code image during init
    #[arg(long)]
    no_qr: bool,

    /// `init <USERNAME>` or `<SECRET> <CODE>`
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    if let Err(e) = init_logging(level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    let options = cli::Options {
        config_path: cli.config,
        allow_local_clock: cli.allow_local_clock,
        no_qr: cli.no_qr,
    };

    let result = match cli.args.as_slice() {
        [command, username] if command == "init" => {
            cli::init::run_init(&options, username).map(|_| true)
        }
        [secret, code] => cli::verify::run_verify(&options, secret, code),
        _ => {
            cli::print_usage();
            Ok(true)
        }
    };

    match result {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            let exit_code = match e {
                // Configuration and secret format errors (exit code 2)
                NtotpError::Config(_) | NtotpError::Toml(_) => 2,
                NtotpError::Otp(_) => 2,
                // Runtime failures (exit code 1)
                NtotpError::Ntp(_) => 1,
                NtotpError::Storage(_) => 1,
                NtotpError::Io(_) => 1,
            };

            eprintln!("{}", e);
            std::process::exit(exit_code);
        }
    }
}
