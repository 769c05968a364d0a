//! Shared helpers for tests that stand up fake NTP servers

use ntotp_core::ntp::packet::{NTP_UNIX_OFFSET, PACKET_LEN};

/// Build a server reply whose receive timestamp is `unix_seconds`
pub fn server_response(unix_seconds: i64) -> [u8; PACKET_LEN] {
    let mut packet = [0u8; PACKET_LEN];
    // LI = 0, VN = 3, Mode = 4 (server), stratum 2
    packet[0] = 0x1C;
    packet[1] = 2;
    let timestamp = ((unix_seconds + NTP_UNIX_OFFSET) as u64) << 32;
    // Receive timestamp at 32, transmit timestamp at 40
    packet[32..40].copy_from_slice(&timestamp.to_be_bytes());
    packet[40..48].copy_from_slice(&timestamp.to_be_bytes());
    packet
}
