//! HMAC-SHA1 (RFC 2104)
//!
//! Thin wrapper over the `hmac` crate producing the fixed 20-byte digest
//! used both for secret derivation and for HOTP codes.

use hmac::{Hmac, Mac};
use sha1::Sha1;

/// Length of an HMAC-SHA1 digest in bytes
pub const DIGEST_LEN: usize = 20;

type HmacSha1 = Hmac<Sha1>;

/// Compute HMAC-SHA1(key, message)
///
/// An empty message still keys the MAC; no data block is written and the
/// result is the HMAC of the zero-length message.
pub fn hmac_sha1(key: &[u8], message: &[u8]) -> [u8; DIGEST_LEN] {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts any key length");
    if !message.is_empty() {
        mac.update(message);
    }

    let mut result = [0u8; DIGEST_LEN];
    result.copy_from_slice(&mac.finalize().into_bytes());
    result
}
