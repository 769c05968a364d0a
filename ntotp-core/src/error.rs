//! Error types for the ntotp CLI tool
//!
//! This module defines all error types used throughout the application,
//! providing consistent error handling and user-friendly error messages.

use thiserror::Error;

/// Main error type for the ntotp application
#[derive(Error, Debug)]
pub enum NtotpError {
    /// Errors related to configuration loading/parsing
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors related to fetching the NTP time reference
    #[error("NTP error: {0}")]
    Ntp(#[from] NtpError),

    /// Errors related to OTP/TOTP operations
    #[error("OTP error: {0}")]
    Otp(#[from] OtpError),

    /// Errors related to persisting secrets and QR codes
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {path}")]
    LoadFailed { path: String },

    #[error("Configuration validation error: {message}")]
    ValidationError { message: String },

    #[error("I/O error: {message}")]
    IoError { message: String },
}

/// NTP time reference errors
///
/// Per-server variants are recovered by moving on to the next server;
/// `Unreachable` is what callers see once every server has failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NtpError {
    #[error("No NTP servers configured")]
    NoServers,

    #[error("All {attempted} NTP servers were unreachable")]
    Unreachable { attempted: usize },

    #[error("NTP request to {server} timed out")]
    Timeout { server: String },

    #[error("Failed to resolve NTP server {server}: {reason}")]
    Resolve { server: String, reason: String },

    #[error("NTP exchange with {server} failed: {reason}")]
    Io { server: String, reason: String },

    #[error("Short NTP response from {server}: {len} bytes")]
    ShortResponse { server: String, len: usize },

    #[error("NTP response from {server} carried no receive timestamp")]
    InvalidTimestamp { server: String },
}

/// OTP/TOTP operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid Base32 secret")]
    InvalidBase32,
}

/// Secret and QR persistence errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid username for file storage: {username:?}")]
    InvalidUsername { username: String },

    #[error("Failed to write {path}")]
    WriteFailed { path: String },

    #[error("QR encoding failed: {reason}")]
    QrEncodeFailed { reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, NtotpError>;
