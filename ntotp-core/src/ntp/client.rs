//! Minimal unauthenticated SNTP client
//!
//! Servers are tried strictly in order, one UDP exchange each, with a
//! single deadline covering both the write and the read. The first server
//! that answers wins; there are no retries.

use crate::config::NtpConfig;
use crate::error::NtpError;
use crate::ntp::packet::{self, PACKET_LEN};
use crate::ntp::{TimeOrigin, TimeReference, TimeSource};
use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Fetches the time reference from an ordered list of NTP servers
#[derive(Debug, Clone)]
pub struct NtpTimeSource {
    servers: Vec<String>,
    timeout: Duration,
}

impl NtpTimeSource {
    /// Create a time source over `host:port` endpoints
    pub fn new(servers: Vec<String>, timeout: Duration) -> Self {
        Self { servers, timeout }
    }

    /// Create a time source from the `[ntp]` configuration section
    pub fn from_config(config: &NtpConfig) -> Self {
        Self::new(config.servers.clone(), Duration::from_secs(config.timeout_secs))
    }

    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    /// Perform one request/response exchange with a single server
    #[tracing::instrument(skip(self), fields(timeout_ms = self.timeout.as_millis()))]
    pub fn query(&self, server: &str) -> Result<TimeReference, NtpError> {
        let addr = resolve(server)?;
        let deadline = Instant::now() + self.timeout;

        let socket = bind_for(&addr).map_err(|e| io_error(server, e))?;
        socket.connect(addr).map_err(|e| io_error(server, e))?;

        socket
            .set_write_timeout(Some(self.timeout))
            .map_err(|e| io_error(server, e))?;
        socket
            .send(&packet::client_request())
            .map_err(|e| io_error(server, e))?;

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(NtpError::Timeout {
                server: server.to_string(),
            });
        }
        socket
            .set_read_timeout(Some(remaining))
            .map_err(|e| io_error(server, e))?;

        let mut buf = [0u8; PACKET_LEN];
        let len = socket.recv(&mut buf).map_err(|e| io_error(server, e))?;
        debug!(server, len, "Received NTP response");

        let timestamp = packet::receive_timestamp(&buf[..len]).ok_or_else(|| {
            NtpError::ShortResponse {
                server: server.to_string(),
                len,
            }
        })?;
        let instant =
            packet::timestamp_to_datetime(timestamp).ok_or_else(|| NtpError::InvalidTimestamp {
                server: server.to_string(),
            })?;

        Ok(TimeReference::new(
            instant,
            TimeOrigin::Ntp {
                server: server.to_string(),
            },
        ))
    }
}

impl TimeSource for NtpTimeSource {
    fn fetch(&self) -> Result<TimeReference, NtpError> {
        if self.servers.is_empty() {
            return Err(NtpError::NoServers);
        }

        for server in &self.servers {
            match self.query(server) {
                Ok(reference) => {
                    info!(server = %server, time = %reference.instant(), "Time reference established");
                    return Ok(reference);
                }
                Err(e) => {
                    warn!(server = %server, error = %e, "NTP server failed, trying next");
                }
            }
        }

        Err(NtpError::Unreachable {
            attempted: self.servers.len(),
        })
    }
}

fn resolve(server: &str) -> Result<SocketAddr, NtpError> {
    let resolve_error = |reason: String| NtpError::Resolve {
        server: server.to_string(),
        reason,
    };

    server
        .to_socket_addrs()
        .map_err(|e| resolve_error(e.to_string()))?
        .next()
        .ok_or_else(|| resolve_error("no addresses".to_string()))
}

fn bind_for(addr: &SocketAddr) -> io::Result<UdpSocket> {
    match addr {
        SocketAddr::V4(_) => UdpSocket::bind(("0.0.0.0", 0)),
        SocketAddr::V6(_) => UdpSocket::bind(("::", 0)),
    }
}

fn io_error(server: &str, e: io::Error) -> NtpError {
    match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => NtpError::Timeout {
            server: server.to_string(),
        },
        _ => NtpError::Io {
            server: server.to_string(),
            reason: e.to_string(),
        },
    }
}
