//! UDP temperature listener.
//!
//! Inbound transport for the temperature feed: binds a datagram socket and
//! forwards every well-formed 4-byte sample to the
//! [`TemperatureIngestor`](crate::ingest::TemperatureIngestor). Message
//! loss, duplication, and framing are this adapter's concern; the core
//! only ever sees "a float arrived".
//!
//! The socket runs with a read timeout rather than blocking forever so the
//! loop can observe the shared running flag and exit on shutdown.

use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::Result;
use crate::ingest::{decode_sample, TemperatureIngestor, SAMPLE_LEN};

/// Blocking UDP listener; one per thermostat, owned by the ingest thread.
pub struct UdpListener {
    socket: UdpSocket,
    local_addr: SocketAddr,
    ingestor: TemperatureIngestor,
    running: Arc<AtomicBool>,
}

impl UdpListener {
    /// Bind the listener socket.
    ///
    /// `timeout` bounds each blocking read so shutdown is observed within
    /// one timeout period.
    pub fn bind(
        addr: &str,
        timeout: Duration,
        ingestor: TemperatureIngestor,
        running: Arc<AtomicBool>,
    ) -> Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(timeout))?;
        let local_addr = socket.local_addr()?;
        info!("temperature listener bound to {local_addr}");
        Ok(Self {
            socket,
            local_addr,
            ingestor,
            running,
        })
    }

    /// The bound address. Useful when binding to port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Receive loop. Runs until the running flag clears.
    pub fn run(self) {
        // Largest datagram we care to inspect; anything longer than a
        // sample is malformed anyway and gets logged with its true length.
        let mut buf = [0u8; 64];

        while self.running.load(Ordering::Relaxed) {
            match self.socket.recv_from(&mut buf) {
                Ok((len, src)) => match decode_sample(&buf[..len]) {
                    Some(value) => {
                        debug!("datagram from {src}: {value:.2}");
                        self.ingestor.accept_sample(value);
                    }
                    None => {
                        warn!(
                            "dropping {len}-byte datagram from {src} \
                             (expected exactly {SAMPLE_LEN})"
                        );
                    }
                },
                Err(e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    // Read timeout: poll the running flag and wait again.
                }
                Err(e) => {
                    // Transient socket errors are non-fatal; the feed is
                    // best-effort and the controller tolerates silence.
                    warn!("temperature receive failed: {e}");
                }
            }
        }
        info!("temperature listener stopped");
    }
}
