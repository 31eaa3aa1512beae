//! DogStatsD metrics transport
//!
//! Sends gauges to a statsd agent over UDP. Delivery is best-effort: the
//! socket is non-blocking, nothing is retried, and send failures are logged
//! rather than returned to the collection pass.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use tracing::{trace, warn};

use crate::transformer::format_gauge_line;

/// Default DogStatsD agent address
pub const DEFAULT_STATSD_ADDR: &str = "127.0.0.1:8125";

/// Destination for gauge samples
///
/// Implementations must be safe to call from concurrent tasks and must not
/// report failures back to the caller.
pub trait GaugeSink: Send + Sync {
    /// Emit a named gauge with optional tags and a sample rate
    fn gauge(&self, name: &str, value: f64, tags: &[&str], sample_rate: f64);
}

/// DogStatsD client using a raw UDP socket
#[derive(Debug)]
pub struct StatsdClient {
    socket: UdpSocket,
    agent_addr: SocketAddr,
}

impl StatsdClient {
    /// Resolve the agent address and open a non-blocking UDP socket
    ///
    /// # Errors
    /// Returns an error if the address does not resolve or the socket cannot be bound
    pub fn connect(addr: &str) -> io::Result<Self> {
        let agent_addr = addr.to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Statsd address '{}' did not resolve", addr),
            )
        })?;

        let bind_addr = if agent_addr.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let socket = UdpSocket::bind(bind_addr)?;
        socket.set_nonblocking(true)?;

        Ok(Self { socket, agent_addr })
    }

    /// Resolved agent address
    pub fn agent_addr(&self) -> SocketAddr {
        self.agent_addr
    }
}

impl GaugeSink for StatsdClient {
    fn gauge(&self, name: &str, value: f64, tags: &[&str], sample_rate: f64) {
        let line = format_gauge_line(name, value, tags, sample_rate);

        match self.socket.send_to(line.as_bytes(), self.agent_addr) {
            Ok(_) => trace!(metric = %name, value, "Sent gauge"),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                warn!(metric = %name, error = %e, "Dropped gauge: send would block");
            }
            Err(e) => {
                warn!(metric = %name, error = %e, "Failed to send gauge");
            }
        }
    }
}
