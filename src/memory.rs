//! The scratch region shared between the driver (via READ/WRITE) and any
//! callee invoked through CALL, plus the memory-read/write command bodies
//! themselves.
//!
//! Mirrors `gti2_memory[GTI2_HEAP_SIZE]`, which the original places in its
//! own linker-named section (`.gti2.data`) so a linker script can pin it;
//! `#[unsafe(link_section = ...)]` is the direct Rust equivalent.

use crate::codec::{UPtr, UWord, read_be_uptr, read_be_uword};
use crate::error::{AgentError, Result};
use crate::transport::Transport;

const fn parse_usize(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut v = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        v = v * 10 + (bytes[i] - b'0') as usize;
        i += 1;
    }
    v
}

/// Scratch size in bytes, overridable at build time via `AGENT_HEAP_SIZE`
/// (see `build.rs`). Defaults to 4096, matching `GTI2_HEAP_SIZE`.
pub const HEAP_SIZE: usize = parse_usize(env!("AGENT_HEAP_SIZE"));

/// The scratch region itself. Exported under a stable symbol and pinned to
/// its own output section so a linker script can place it, exactly as the
/// original pins `gti2_memory`.
#[unsafe(no_mangle)]
#[unsafe(link_section = ".tether.scratch")]
pub static mut SCRATCH: [u8; HEAP_SIZE] = [0; HEAP_SIZE];

const UPTR_BYTES: usize = size_of::<UPtr>();
const UWORD_BYTES: usize = size_of::<UWord>();

/// READ(1): `addr:uptr | len:uword`. Writes `len` bytes starting at `addr`
/// straight to the transport, with no intermediate buffer, no bounds
/// checking against the scratch region or anything else, and no cap derived
/// from `FRAME_MAX`: the response is not reassembled through the shared
/// frame buffer, same as `gti2_dispatch_memoryread`'s bare
/// `gti2_write((uint8_t *)address, len)`. The command is an unsafe primitive
/// by design.
///
/// # Safety
/// The caller (the dispatcher) is trusting the driver to supply a valid
/// `(addr, len)` pair; an invalid one is undefined behavior, same as the
/// original's bare read from an attacker-supplied pointer.
pub unsafe fn dispatch_read<T: Transport>(body: &[u8], transport: &mut T) -> Result<()> {
    if body.len() < UPTR_BYTES + UWORD_BYTES {
        return Err(AgentError::Truncated);
    }
    let addr = read_be_uptr(&body[..UPTR_BYTES]) as *const u8;
    let len = read_be_uword(&body[UPTR_BYTES..UPTR_BYTES + UWORD_BYTES]);
    // SAFETY: `addr`/`len` are driver-supplied and unvalidated, per contract.
    let data = unsafe { core::slice::from_raw_parts(addr, len) };
    transport.write_all(data)
}

/// WRITE(2): `addr:uptr | bytes[length - sizeof(uptr)]`. Copies the trailing
/// bytes into `[addr, addr + n)`.
///
/// # Safety
/// Same contract as `dispatch_read`: the destination is trusted, not
/// validated.
pub unsafe fn dispatch_write(body: &[u8]) -> Result<()> {
    if body.len() < UPTR_BYTES {
        return Err(AgentError::Truncated);
    }
    let addr = read_be_uptr(&body[..UPTR_BYTES]) as *mut u8;
    let bytes = &body[UPTR_BYTES..];
    unsafe {
        core::ptr::copy_nonoverlapping(bytes.as_ptr(), addr, bytes.len());
    }
    Ok(())
}
