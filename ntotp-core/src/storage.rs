//! Persistence of provisioned secrets
//!
//! Secrets are appended one per line to `secret_<user>.txt`; the
//! provisioning URI is rendered to `qrcode_<user>.png` for scanning.

use crate::error::{NtotpError, StorageError};
use crate::types::{qr_file_name, secret_file_name, OtpSecret};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::fs::OpenOptions;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Minimum side of the rendered QR image in pixels
const MIN_QR_SIZE: u32 = 256;

/// Reject usernames that would escape the output directory
pub fn validate_username(username: &str) -> Result<(), StorageError> {
    let invalid = username.is_empty()
        || username.contains('/')
        || username.contains('\\')
        || username.contains("..")
        || username.contains('\0');

    if invalid {
        return Err(StorageError::InvalidUsername {
            username: username.to_string(),
        });
    }
    Ok(())
}

/// Append `secret` as a new line of the user's secret file
///
/// The file is created if it does not exist yet.
pub fn append_secret(dir: &Path, username: &str, secret: &OtpSecret) -> Result<PathBuf, NtotpError> {
    validate_username(username)?;
    let path = dir.join(secret_file_name(username));

    let write_failed = || StorageError::WriteFailed {
        path: path.to_string_lossy().to_string(),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|_| write_failed())?;
    writeln!(file, "{}", secret.expose()).map_err(|_| write_failed())?;

    info!(path = ?path, "Appended secret");
    Ok(path)
}

/// Render `text` as a PNG QR code of at least `MIN_QR_SIZE` pixels
///
/// The renderer keeps the standard four-module quiet zone.
pub fn render_qr_png(text: &str) -> Result<Vec<u8>, StorageError> {
    let code = QrCode::new(text.as_bytes()).map_err(|e| StorageError::QrEncodeFailed {
        reason: e.to_string(),
    })?;

    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_QR_SIZE, MIN_QR_SIZE)
        .build();

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| StorageError::QrEncodeFailed {
            reason: e.to_string(),
        })?;

    Ok(png)
}

/// Write the user's provisioning QR code next to the secret file
pub fn write_qr_png(dir: &Path, username: &str, uri: &str) -> Result<PathBuf, NtotpError> {
    validate_username(username)?;
    let path = dir.join(qr_file_name(username));
    let png = render_qr_png(uri)?;

    std::fs::write(&path, png).map_err(|_| StorageError::WriteFailed {
        path: path.to_string_lossy().to_string(),
    })?;

    info!(path = ?path, "Wrote QR code");
    Ok(path)
}
