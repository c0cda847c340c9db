//! The command decoder and dispatcher loop: decodes a frame's command id and
//! routes it to ECHO/READ/WRITE/CALL, then goes back for the next frame.
//! Mirrors `gti2_dispatcher`'s `while (1) { ... switch (cmd) { ... } }`,
//! generalized from `rcls-gpsfreak`'s `command.rs` two-nibble
//! `command_dispatch` match to a flat `u16` match since this protocol's
//! command space isn't grouped.

use crate::call;
use crate::codec::{UWord, read_be_u16, read_be_uptr};
use crate::error::Result;
use crate::frame::FrameReader;
use crate::transport::Transport;

const CMD_ECHO: u16 = 0;
const CMD_READ: u16 = 1;
const CMD_WRITE: u16 = 2;
const CMD_CALL: u16 = 3;

const UPTR_BYTES: usize = size_of::<UWord>();

pub struct Dispatcher {
    reader: FrameReader,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher { reader: FrameReader::new() }
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Services a single request/response cycle. Returns `Ok(())` whether or
    /// not a response was emitted (unknown commands and unsupported CALL
    /// shapes are silent drops, not errors); only transport failure or a
    /// malformed frame propagates as `Err`.
    pub fn serve_one<T: Transport>(&mut self, transport: &mut T) -> Result<()> {
        let Some((cmd, body)) = self.reader.read_frame(transport)? else {
            return Ok(());
        };

        match cmd {
            CMD_ECHO => {
                log::trace!("ECHO, {} bytes", body.len());
                FrameReader::ack(transport)?;
                transport.write_all(body)?;
            }
            CMD_READ => {
                log::trace!("READ");
                dispatch_read(body, transport)?;
            }
            CMD_WRITE => {
                log::trace!("WRITE");
                dispatch_write(body, transport)?;
            }
            CMD_CALL => {
                log::trace!("CALL");
                dispatch_call(body, transport)?;
            }
            other => {
                log::debug!("dropping unknown command {other:#06x}");
            }
        }
        Ok(())
    }

    /// The dispatcher is `noreturn` by contract: it never stops servicing
    /// requests on its own. Returns only if the transport fails
    /// unrecoverably.
    pub fn run<T: Transport>(&mut self, transport: &mut T) -> Result<()> {
        loop {
            self.serve_one(transport)?;
        }
    }
}

fn dispatch_read<T: Transport>(body: &[u8], transport: &mut T) -> Result<()> {
    if body.len() < 2 * UPTR_BYTES {
        log::debug!("READ body truncated");
        return Ok(());
    }

    FrameReader::ack(transport)?;
    // SAFETY: the driver supplies `addr`/`len`; see memory::dispatch_read.
    // The response is streamed straight to the transport, unbounded by
    // FRAME_MAX, matching the original's bare `gti2_write(address, len)`.
    unsafe { crate::memory::dispatch_read(body, transport) }
}

fn dispatch_write<T: Transport>(body: &[u8], transport: &mut T) -> Result<()> {
    if body.len() < UPTR_BYTES {
        log::debug!("WRITE body truncated");
        return Ok(());
    }
    // SAFETY: the driver supplies the destination address; see
    // memory::dispatch_write.
    if unsafe { crate::memory::dispatch_write(body) }.is_err() {
        log::debug!("dropping malformed WRITE");
        return Ok(());
    }
    FrameReader::ack(transport)?;
    Ok(())
}

fn dispatch_call<T: Transport>(body: &[u8], transport: &mut T) -> Result<()> {
    const HDR: usize = UPTR_BYTES + 2 + 2;
    if body.len() < HDR {
        log::debug!("CALL body truncated");
        return Ok(());
    }
    let addr = read_be_uptr(&body[..UPTR_BYTES]);
    let numbytes_out = read_be_u16(&body[UPTR_BYTES..UPTR_BYTES + 2]);
    let numparam_in = read_be_u16(&body[UPTR_BYTES + 2..UPTR_BYTES + 4]);

    if !call::is_supported_return_width(numbytes_out) || numparam_in > 10 {
        log::debug!("dropping CALL with unsupported shape ({numparam_in}, {numbytes_out})");
        return Ok(());
    }

    let mut args: [UWord; 10] = [0; 10];
    for i in 0..numparam_in as usize {
        let start = HDR + i * UPTR_BYTES;
        if start + UPTR_BYTES > body.len() {
            log::debug!("CALL body truncated: missing argument {i}");
            return Ok(());
        }
        args[i] = crate::codec::read_be_uword(&body[start..start + UPTR_BYTES]);
    }

    // SAFETY: the driver supplies `addr` and asserts it names a function of
    // exactly `numparam_in` word-sized parameters; see call::invoke.
    let Some(result) = (unsafe { call::invoke(addr, numparam_in, &args) }) else {
        log::debug!("dropping CALL: unsupported arity {numparam_in}");
        return Ok(());
    };

    FrameReader::ack(transport)?;
    let mut out = [0u8; 8];
    call::truncate_return(result, numbytes_out, &mut out);
    transport.write_all(&out[..numbytes_out as usize])?;
    Ok(())
}
