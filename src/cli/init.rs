//! Init command implementation
//!
//! Derives a new secret for a user, prints it with the current code and
//! provisioning URI, then persists the secret and its QR code.

use super::{load_config, prepare_engine, Options};
use ntotp_core::error::NtotpError;
use ntotp_core::storage;
use std::path::Path;

/// Run `ntotp init <username>`
pub fn run_init(options: &Options, username: &str) -> Result<(), NtotpError> {
    let config = load_config(options)?;
    // Fail before touching the network if the name is unusable
    storage::validate_username(username)?;

    let engine = prepare_engine(options, &config)?;

    let secret = engine.generate_secret();
    let code = engine.compute_code(&secret)?;
    let uri = engine.provisioning_uri(username, &secret);

    println!("Secret: {}", secret.expose());
    println!("Code: {}", code.expose());
    println!("URI: {}", uri);

    let output_dir = Path::new(&config.storage.output_dir);
    std::fs::create_dir_all(output_dir)?;

    let secret_path = storage::append_secret(output_dir, username, &secret)?;
    println!("Saved secret to {}", secret_path.display());

    if config.storage.write_qr && !options.no_qr {
        let qr_path = storage::write_qr_png(output_dir, username, &uri)?;
        println!("Saved QR code to {}", qr_path.display());
    }

    Ok(())
}
