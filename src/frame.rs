//! Pulls one request frame off a `Transport`: `cmd:u16be | length:u16be |
//! body[length]`. Mirrors `gti2_dispatcher`'s own read-header-then-read-body
//! sequence, including its asymmetry on an oversize length: we answer `NCK`
//! and go around again without attempting to drain `length` bytes, since a
//! sender that lies about the length can't be trusted to have actually sent
//! them.

use crate::codec::read_be_u16;
use crate::error::Result;
use crate::transport::Transport;

/// Total size of the shared frame buffer, header included.
pub const FRAME_MAX: usize = 1024;
const HEADER_LEN: usize = 4;
const MAX_BODY: usize = FRAME_MAX - HEADER_LEN;

const ACK: &[u8; 3] = b"ACK";
const NCK: &[u8; 3] = b"NCK";

/// The single process-wide frame buffer. Exclusively owned by whoever is
/// assembling or dispatching the current request; never aliased.
pub struct FrameReader {
    buf: [u8; FRAME_MAX],
}

impl Default for FrameReader {
    fn default() -> Self {
        FrameReader { buf: [0u8; FRAME_MAX] }
    }
}

impl FrameReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ack<T: Transport>(transport: &mut T) -> Result<()> {
        transport.write_all(ACK)
    }

    /// Read one frame. `Ok(None)` means the frame was rejected (NCK already
    /// sent) and the caller should go read the next header; `Ok(Some((cmd,
    /// body)))` hands back the command id and a view into the shared buffer.
    pub fn read_frame<T: Transport>(&mut self, transport: &mut T) -> Result<Option<(u16, &[u8])>> {
        transport.read_exact(&mut self.buf[..HEADER_LEN])?;
        let cmd = read_be_u16(&self.buf[0..2]);
        let length = read_be_u16(&self.buf[2..4]) as usize;

        if length > MAX_BODY {
            log::debug!("frame rejected: length {length} exceeds {MAX_BODY}");
            transport.write_all(NCK)?;
            return Ok(None);
        }

        transport.read_exact(&mut self.buf[HEADER_LEN..HEADER_LEN + length])?;
        Ok(Some((cmd, &self.buf[HEADER_LEN..HEADER_LEN + length])))
    }
}
