//! Authentication module
//!
//! Handles secret encoding, HMAC-SHA1, and TOTP generation/verification.

pub mod base32;
pub mod hmac;
pub mod totp;
