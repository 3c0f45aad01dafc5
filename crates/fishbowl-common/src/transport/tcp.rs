use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Instant;

use crate::protocol::error::{FishbowlError, IoPhase, Result};
use crate::transport::endpoint::Endpoint;
use crate::transport::frame;
use crate::transport::FrameTransport;

/// One synchronous TCP connection to the server.
///
/// # Wire Protocol
///
/// Messages are sent with a 4-byte length prefix (big-endian u32) followed
/// by the UTF-8 XML document:
///
/// ```text
/// [4-byte length] [XML data]
/// ```
///
/// # Timeouts
///
/// The connect deadline bounds the non-blocking connect and its writability
/// wait. Read and write deadlines are installed as socket options, so every
/// blocking read or write waits for readiness at most that long before
/// failing with `ConnectionTimeout`. After a read or write timeout the
/// stream position is unknown and the connection should be closed.
///
/// # Example
///
/// ```no_run
/// use fishbowl_common::transport::{Connection, Endpoint, FrameTransport};
///
/// let endpoint = Endpoint::new("127.0.0.1").unwrap();
/// let mut connection = Connection::open(&endpoint).unwrap();
///
/// connection.write_frame(b"<FbiXml/>").unwrap();
/// let reply = connection.read_frame().unwrap();
/// connection.close();
/// ```
#[derive(Debug)]
pub struct Connection {
    stream: Option<TcpStream>,
    peer: SocketAddr,
    max_frame_len: usize,
}

impl Connection {
    /// Connects to the endpoint.
    ///
    /// Every resolved address is tried in turn. The connect deadline bounds
    /// the whole call, not each attempt. Failing all of them (refused, unreachable, or out of time) is
    /// reported as a connect-phase `ConnectionTimeout`; the OS cause is
    /// logged. No socket survives a failed call.
    pub fn open(endpoint: &Endpoint) -> Result<Self> {
        let addrs: Vec<SocketAddr> = (endpoint.host(), endpoint.port())
            .to_socket_addrs()
            .map_err(|e| {
                FishbowlError::InvalidAddress(format!(
                    "{}:{}: {}",
                    endpoint.host(),
                    endpoint.port(),
                    e
                ))
            })?
            .collect();

        if addrs.is_empty() {
            return Err(FishbowlError::InvalidAddress(format!(
                "{}:{} resolved to no addresses",
                endpoint.host(),
                endpoint.port()
            )));
        }

        let deadline = Instant::now() + endpoint.connect_timeout();
        let (stream, addr) = connect_before(&addrs, deadline)?;

        stream
            .set_read_timeout(Some(endpoint.read_timeout()))
            .map_err(FishbowlError::Io)?;
        stream
            .set_write_timeout(Some(endpoint.write_timeout()))
            .map_err(FishbowlError::Io)?;
        stream.set_nodelay(true).map_err(FishbowlError::Io)?;

        tracing::debug!(peer = %addr, "tcp connection established");
        Ok(Self {
            stream: Some(stream),
            peer: addr,
            max_frame_len: endpoint.max_frame_len(),
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Releases the socket. Safe to call repeatedly.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            // Peer may already be gone.
            let _ = stream.shutdown(Shutdown::Both);
            tracing::debug!(peer = %self.peer, "tcp connection closed");
        }
    }

    fn stream(&mut self) -> Result<&mut TcpStream> {
        self.stream
            .as_mut()
            .ok_or(FishbowlError::ConnectionNotEstablished)
    }
}

/// Tries each address in turn, all sharing one deadline.
fn connect_before(addrs: &[SocketAddr], deadline: Instant) -> Result<(TcpStream, SocketAddr)> {
    for &addr in addrs {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            tracing::debug!(peer = %addr, "connect deadline reached");
            break;
        }

        match TcpStream::connect_timeout(&addr, remaining) {
            Ok(stream) => return Ok((stream, addr)),
            Err(e) => {
                tracing::debug!(peer = %addr, error = %e, "tcp connect attempt failed");
            }
        }
    }

    Err(FishbowlError::timeout(IoPhase::Connect))
}

impl FrameTransport for Connection {
    fn write_frame(&mut self, body: &[u8]) -> Result<()> {
        frame::write_frame(self.stream()?, body)
    }

    fn read_frame(&mut self) -> Result<Vec<u8>> {
        let max_frame_len = self.max_frame_len;
        frame::read_frame(self.stream()?, max_frame_len)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
