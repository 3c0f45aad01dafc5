use std::io::{ErrorKind, Read, Write};

use crate::protocol::error::{FishbowlError, IoPhase, Result};

/// Size of the big-endian length prefix in front of every body.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Default ceiling for an incoming body (100 MB).
pub const DEFAULT_MAX_FRAME_LEN: usize = 100 * 1024 * 1024;

/// Encodes `[4-byte length as u32 big-endian] + [body]` into one buffer.
pub fn encode_frame(body: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(body.len()).map_err(|_| {
        FishbowlError::ProtocolError(format!(
            "body of {} bytes does not fit a 4-byte length prefix",
            body.len()
        ))
    })?;

    let mut frame = Vec::with_capacity(LENGTH_PREFIX_LEN + body.len());
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(body);
    Ok(frame)
}

/// Writes one framed body.
///
/// Prefix and body go out as a single buffer so a peer never observes a
/// prefix without the bytes it announces unless the write itself fails.
pub fn write_frame<W: Write>(writer: &mut W, body: &[u8]) -> Result<()> {
    let frame = encode_frame(body)?;

    writer
        .write_all(&frame)
        .map_err(|e| map_io_error(e, IoPhase::Write))?;
    writer
        .flush()
        .map_err(|e| map_io_error(e, IoPhase::Write))?;

    Ok(())
}

/// Reads one framed body, rejecting prefixes above `max_len`.
pub fn read_frame<R: Read>(reader: &mut R, max_len: usize) -> Result<Vec<u8>> {
    let prefix = read_exact(reader, LENGTH_PREFIX_LEN)?;
    let len = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;

    if len > max_len {
        return Err(FishbowlError::ProtocolError(format!(
            "frame too large: {} bytes (max {} bytes)",
            len, max_len
        )));
    }

    read_exact(reader, len)
}

/// Reads exactly `n` bytes, looping over short reads.
///
/// End of stream before `n` bytes is a protocol error: the peer announced
/// more than it sent.
pub fn read_exact<R: Read>(reader: &mut R, n: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; n];
    let mut filled = 0;

    while filled < n {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(FishbowlError::ProtocolError(format!(
                    "stream closed after {} of {} bytes",
                    filled, n
                )))
            }
            Ok(read) => filled += read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(map_io_error(e, IoPhase::Read)),
        }
    }

    Ok(buf)
}

/// Map IO errors to the error taxonomy
///
/// - Timeouts/would block -> `ConnectionTimeout` for the given phase
/// - Peer hang-ups -> `ProtocolError`, same as a short read
/// - Anything else -> `Io`
pub fn map_io_error(err: std::io::Error, phase: IoPhase) -> FishbowlError {
    match err.kind() {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => FishbowlError::timeout(phase),
        ErrorKind::UnexpectedEof
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::BrokenPipe => {
            FishbowlError::ProtocolError(format!("connection lost during {}: {}", phase, err))
        }
        _ => FishbowlError::Io(err),
    }
}
