//! Time reference module
//!
//! Establishes the process-wide "now" used by every TOTP operation. The
//! reference is fetched once from NTP and is never re-synchronized.

use crate::error::NtpError;
use chrono::{DateTime, Utc};
use tracing::warn;

pub mod client;
pub mod packet;

pub use client::NtpTimeSource;

/// Where a time reference came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeOrigin {
    /// Receive timestamp of an NTP server
    Ntp { server: String },
    /// Local system clock, used only when NTP fallback was allowed
    LocalClock,
    /// Injected by the caller
    Fixed,
}

/// An absolute point in time treated as "now" for a whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeReference {
    instant: DateTime<Utc>,
    origin: TimeOrigin,
}

impl TimeReference {
    /// Create a reference from an absolute time and its origin
    pub fn new(instant: DateTime<Utc>, origin: TimeOrigin) -> Self {
        Self { instant, origin }
    }

    /// Create a fixed reference at the given Unix time
    ///
    /// Returns `None` when the value is outside chrono's representable range.
    pub fn from_unix_seconds(unix_seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(unix_seconds, 0).map(|instant| Self::new(instant, TimeOrigin::Fixed))
    }

    /// Reference taken from the local system clock
    pub fn local_clock() -> Self {
        Self::new(Utc::now(), TimeOrigin::LocalClock)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn origin(&self) -> &TimeOrigin {
        &self.origin
    }

    /// Whole seconds since the Unix epoch
    pub fn unix_seconds(&self) -> i64 {
        self.instant.timestamp()
    }

    /// True when the reference did not come from a trusted external source
    pub fn is_degraded(&self) -> bool {
        self.origin == TimeOrigin::LocalClock
    }
}

/// A source of the absolute time reference
pub trait TimeSource {
    /// Fetch the current absolute time
    ///
    /// # Errors
    ///
    /// Returns `NtpError::Unreachable` when no configured endpoint answered.
    fn fetch(&self) -> Result<TimeReference, NtpError>;
}

/// Time source that always returns the same reference
#[derive(Debug, Clone)]
pub struct FixedTimeSource {
    reference: TimeReference,
}

impl FixedTimeSource {
    pub fn new(reference: TimeReference) -> Self {
        Self { reference }
    }
}

impl TimeSource for FixedTimeSource {
    fn fetch(&self) -> Result<TimeReference, NtpError> {
        Ok(self.reference.clone())
    }
}

/// Fetch the run's time reference, optionally degrading to the local clock
///
/// Failure propagates unless `allow_local_clock` is set, in which case the
/// returned reference is marked `LocalClock` so callers can flag it.
pub fn establish_reference(
    source: &dyn TimeSource,
    allow_local_clock: bool,
) -> Result<TimeReference, NtpError> {
    match source.fetch() {
        Ok(reference) => Ok(reference),
        Err(e) if allow_local_clock => {
            warn!(error = %e, "NTP unavailable, falling back to the local clock (degraded mode)");
            Ok(TimeReference::local_clock())
        }
        Err(e) => Err(e),
    }
}
