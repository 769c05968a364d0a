//! TOTP (Time-based One-Time Password) generation and verification
//!
//! Implements RFC 6238 with SHA-1, 6 digits and a 30 second step, keyed
//! by a [`TimeReference`] that is fixed for the lifetime of the engine.

use crate::auth::{base32, hmac};
use crate::error::OtpError;
use crate::ntp::TimeReference;
use crate::types::{OtpSecret, TotpToken};
use tracing::debug;

/// RFC 6238 default step
pub const TIME_STEP_SECS: i64 = 30;

/// Number of digits in a code
pub const CODE_DIGITS: usize = 6;

const CODE_MODULUS: u32 = 1_000_000;

/// Compute the HOTP value for `counter` (RFC 4226 dynamic truncation)
///
/// The counter is encoded as a big-endian signed 64-bit integer.
pub fn hotp(key: &[u8], counter: i64) -> String {
    let digest = hmac::hmac_sha1(key, &counter.to_be_bytes());
    let offset = (digest[hmac::DIGEST_LEN - 1] & 0x0F) as usize;
    let value = u32::from_be_bytes([
        digest[offset] & 0x7F,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);
    format!("{:0width$}", value % CODE_MODULUS, width = CODE_DIGITS)
}

/// TOTP operations bound to a single time reference
#[derive(Debug, Clone)]
pub struct TotpEngine {
    reference: TimeReference,
    skew_steps: u32,
}

impl TotpEngine {
    /// Create an engine that only accepts the current step
    pub fn new(reference: TimeReference) -> Self {
        Self::with_skew(reference, 0)
    }

    /// Create an engine accepting `skew_steps` adjacent steps on each side
    pub fn with_skew(reference: TimeReference, skew_steps: u32) -> Self {
        Self {
            reference,
            skew_steps,
        }
    }

    pub fn reference(&self) -> &TimeReference {
        &self.reference
    }

    /// floor(unix_seconds / 30)
    pub fn time_step(&self) -> i64 {
        self.reference.unix_seconds().div_euclid(TIME_STEP_SECS)
    }

    /// Derive a secret from the current time step
    ///
    /// The secret is HMAC-SHA1 keyed by the big-endian step over an empty
    /// message, Base32-encoded with padding and upper-cased.
    pub fn generate_secret(&self) -> OtpSecret {
        let step = self.time_step();
        let digest = hmac::hmac_sha1(&step.to_be_bytes(), &[]);
        debug!(step, "Derived secret from time step");
        OtpSecret::new(base32::encode_base32(&digest))
    }

    /// Compute the code for the current time step
    pub fn compute_code(&self, secret: &OtpSecret) -> Result<TotpToken, OtpError> {
        self.code_at(secret, self.time_step())
    }

    /// Compute the code for an explicit time step
    pub fn code_at(&self, secret: &OtpSecret, step: i64) -> Result<TotpToken, OtpError> {
        let key = base32::decode_base32(secret.expose())?;
        Ok(TotpToken::new(hotp(&key, step)))
    }

    /// Check a supplied code against the freshly computed one
    ///
    /// Only the current step is accepted unless the engine was built with a
    /// skew window. A malformed secret is an error, never a match.
    pub fn verify_code(&self, secret: &OtpSecret, supplied: &str) -> Result<bool, OtpError> {
        let key = base32::decode_base32(secret.expose())?;

        if supplied.len() != CODE_DIGITS || !supplied.bytes().all(|b| b.is_ascii_digit()) {
            debug!("Supplied code is not {} digits", CODE_DIGITS);
            return Ok(false);
        }

        let current = self.time_step();
        let skew = i64::from(self.skew_steps);
        let mut matched = false;
        for step in (current - skew)..=(current + skew) {
            let expected = hotp(&key, step);
            matched |= constant_time_eq(expected.as_bytes(), supplied.as_bytes());
        }

        debug!(step = current, skew, matched, "Verified code");
        Ok(matched)
    }

    /// Build the `otpauth://` URI rendered as a QR code
    pub fn provisioning_uri(&self, user: &str, secret: &OtpSecret) -> String {
        provisioning_uri(user, secret)
    }
}

/// `otpauth://totp/<user>?secret=<secret>`
pub fn provisioning_uri(user: &str, secret: &OtpSecret) -> String {
    format!("otpauth://totp/{}?secret={}", user, secret.expose())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
