//! Framed transport
//!
//! # Wire Format
//!
//! `[4-byte length prefix as u32 big-endian] + [UTF-8 XML document]`
//!
//! # Components
//!
//! - **[`frame`]**: encode/decode frames over any `Read`/`Write`
//! - **[`Connection`]**: one synchronous TCP socket with per-phase timeouts
//! - **[`Endpoint`]**: host, port and timeout configuration
//! - **[`FrameTransport`]**: the seam the protocol engine drives

pub mod endpoint;
pub mod frame;
pub mod tcp;

pub use endpoint::{Endpoint, DEFAULT_PORT};
pub use frame::{DEFAULT_MAX_FRAME_LEN, LENGTH_PREFIX_LEN};
pub use tcp::Connection;

use crate::protocol::error::Result;

/// Something that can carry whole frames in both directions.
pub trait FrameTransport {
    /// Writes the length prefix and the full body.
    fn write_frame(&mut self, body: &[u8]) -> Result<()>;

    /// Reads one length prefix and exactly that many body bytes.
    fn read_frame(&mut self) -> Result<Vec<u8>>;
}

impl<T: FrameTransport + ?Sized> FrameTransport for &mut T {
    fn write_frame(&mut self, body: &[u8]) -> Result<()> {
        (**self).write_frame(body)
    }

    fn read_frame(&mut self) -> Result<Vec<u8>> {
        (**self).read_frame()
    }
}
