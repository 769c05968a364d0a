//! Base32 encoding and lenient decoding of TOTP secrets
//!
//! Secrets are written with the RFC 4648 alphabet, padded and upper-case.
//! Decoding accepts what authenticator apps accept:
//! 1. Remove all spaces
//! 2. Restore padding to 8-character boundaries
//! 3. Fold to upper case

use crate::error::OtpError;
use data_encoding::BASE32;

/// Clean whitespace from input string
fn clean(input: &str) -> String {
    input.replace(' ', "")
}

/// Pad input string to 8-character boundaries
///
/// Formula: padding_length = (8 - (len % 8)) % 8
fn pad(input: &str) -> String {
    let padding_len = (8 - (input.len() % 8)) % 8;
    format!("{}{}", input, "=".repeat(padding_len))
}

/// Encode bytes as an upper-case, padded Base32 string
pub fn encode_base32(bytes: &[u8]) -> String {
    BASE32.encode(bytes).to_uppercase()
}

/// Decode a Base32 secret to bytes
pub fn decode_base32(input: &str) -> Result<Vec<u8>, OtpError> {
    let cleaned = clean(input);
    let padded = pad(&cleaned);

    BASE32
        .decode(padded.to_uppercase().as_bytes())
        .map_err(|_| OtpError::InvalidBase32)
}
