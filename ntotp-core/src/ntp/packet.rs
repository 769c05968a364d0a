//! NTP wire format (RFC 5905 header, v3 client mode)
//!
//! Only the fields ntotp needs are handled: the first byte of the request
//! and the receive timestamp of the response.

use chrono::{DateTime, Utc};

/// Size of an NTP header without extension fields
pub const PACKET_LEN: usize = 48;

/// LI = 0 (no warning), VN = 3, Mode = 3 (client)
pub const CLIENT_REQUEST_FLAGS: u8 = 0x1B;

/// Seconds between 1900-01-01T00:00:00Z and the Unix epoch
pub const NTP_UNIX_OFFSET: i64 = 2_208_988_800;

// flags/stratum/poll/precision (4) + root delay, root dispersion,
// reference id (12) + reference and originate timestamps (16)
const RECEIVE_TIMESTAMP_OFFSET: usize = 32;

/// Build a client request: flags byte followed by zeros
pub fn client_request() -> [u8; PACKET_LEN] {
    let mut packet = [0u8; PACKET_LEN];
    packet[0] = CLIENT_REQUEST_FLAGS;
    packet
}

/// Extract the 64-bit receive timestamp from a response
///
/// Returns `None` when the packet is shorter than a full header.
pub fn receive_timestamp(packet: &[u8]) -> Option<u64> {
    if packet.len() < PACKET_LEN {
        return None;
    }
    let mut field = [0u8; 8];
    field.copy_from_slice(&packet[RECEIVE_TIMESTAMP_OFFSET..RECEIVE_TIMESTAMP_OFFSET + 8]);
    Some(u64::from_be_bytes(field))
}

/// Convert an NTP 64-bit timestamp to an absolute time
///
/// Whole seconds since 1900 live in the upper 32 bits; the fraction is
/// dropped. A zero seconds field means the server never filled it in.
pub fn timestamp_to_datetime(timestamp: u64) -> Option<DateTime<Utc>> {
    let seconds_since_1900 = (timestamp >> 32) as i64;
    if seconds_since_1900 == 0 {
        return None;
    }
    DateTime::from_timestamp(seconds_since_1900 - NTP_UNIX_OFFSET, 0)
}
