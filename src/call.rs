//! The call trampoline: indirect-calls an arbitrary function address with
//! `numparam_in` word-sized arguments (0..=10) and truncates its word-sized
//! return to `numbytes_out` bytes on the wire.
//!
//! This is a close semantic port of `gti2_dispatch_call`'s `call_case`
//! cascade: there is no portable way to call a function of runtime-selected
//! arity, so arities 0..=10 are enumerated as a hard-coded match, each arm
//! casting the address to a distinct concretely-typed function pointer. Ten
//! is the ceiling the original chose and this crate keeps it: it covers
//! AAPCS/SysV's integer argument registers plus a small stack spill, and
//! wider arities are out of scope.

use crate::codec::UWord;

/// Return-width choices the wire protocol allows. Anything else is an
/// unsupported CALL shape and the dispatcher drops it silently.
pub fn is_supported_return_width(numbytes_out: u16) -> bool {
    matches!(numbytes_out, 0 | 2 | 4 | 8) && (numbytes_out as usize) <= size_of::<UWord>()
}

/// Sets the ARM Thumb bit on the call address when targeting Thumb code, as
/// `gti2_dispatch_call` does under `#ifdef __arm__`.
fn thumb_address(addr: UWord) -> UWord {
    if cfg!(target_arch = "arm") { addr | 1 } else { addr }
}

/// Invokes the function at `addr` with `args[..numparam_in]`, returning the
/// captured machine word. `args` beyond `numparam_in` are ignored.
///
/// # Safety
/// This is the single intentionally unsafe boundary in the crate: `addr`
/// must actually point at a function with the `extern "C"` signature
/// `fn(UWord, UWord, ..., UWord) -> UWord` of exactly `numparam_in`
/// parameters. The driver is trusted absolutely here; a mismatched
/// signature, a bad address, or a callee that corrupts the stack is
/// undefined behavior the protocol makes no attempt to guard against.
pub unsafe fn invoke(addr: UWord, numparam_in: u16, args: &[UWord; 10]) -> Option<UWord> {
    let addr = thumb_address(addr);
    let result = match numparam_in {
        0 => {
            let f: extern "C" fn() -> UWord = unsafe { core::mem::transmute(addr) };
            f()
        }
        1 => {
            let f: extern "C" fn(UWord) -> UWord = unsafe { core::mem::transmute(addr) };
            f(args[0])
        }
        2 => {
            let f: extern "C" fn(UWord, UWord) -> UWord = unsafe { core::mem::transmute(addr) };
            f(args[0], args[1])
        }
        3 => {
            let f: extern "C" fn(UWord, UWord, UWord) -> UWord =
                unsafe { core::mem::transmute(addr) };
            f(args[0], args[1], args[2])
        }
        4 => {
            let f: extern "C" fn(UWord, UWord, UWord, UWord) -> UWord =
                unsafe { core::mem::transmute(addr) };
            f(args[0], args[1], args[2], args[3])
        }
        5 => {
            let f: extern "C" fn(UWord, UWord, UWord, UWord, UWord) -> UWord =
                unsafe { core::mem::transmute(addr) };
            f(args[0], args[1], args[2], args[3], args[4])
        }
        6 => {
            let f: extern "C" fn(UWord, UWord, UWord, UWord, UWord, UWord) -> UWord =
                unsafe { core::mem::transmute(addr) };
            f(args[0], args[1], args[2], args[3], args[4], args[5])
        }
        7 => {
            let f: extern "C" fn(UWord, UWord, UWord, UWord, UWord, UWord, UWord) -> UWord =
                unsafe { core::mem::transmute(addr) };
            f(args[0], args[1], args[2], args[3], args[4], args[5], args[6])
        }
        8 => {
            let f: extern "C" fn(UWord, UWord, UWord, UWord, UWord, UWord, UWord, UWord) -> UWord =
                unsafe { core::mem::transmute(addr) };
            f(args[0], args[1], args[2], args[3], args[4], args[5], args[6], args[7])
        }
        9 => {
            let f: extern "C" fn(
                UWord, UWord, UWord, UWord, UWord, UWord, UWord, UWord, UWord,
            ) -> UWord = unsafe { core::mem::transmute(addr) };
            f(
                args[0], args[1], args[2], args[3], args[4], args[5], args[6], args[7], args[8],
            )
        }
        10 => {
            let f: extern "C" fn(
                UWord, UWord, UWord, UWord, UWord, UWord, UWord, UWord, UWord, UWord,
            ) -> UWord = unsafe { core::mem::transmute(addr) };
            f(
                args[0], args[1], args[2], args[3], args[4], args[5], args[6], args[7], args[8],
                args[9],
            )
        }
        // Unsupported arity: caller silently drops the request.
        _ => return None,
    };
    Some(result)
}

/// Truncates a captured return value to `numbytes_out` big-endian bytes,
/// mirroring `gti2_dispatch_call`'s `gti2_write((uint8_t *)&result,
/// numbytes_out)` after `ntohl(result)`.
pub fn truncate_return(result: UWord, numbytes_out: u16, out: &mut [u8]) {
    let full = result.to_be_bytes();
    let n = numbytes_out as usize;
    out[..n].copy_from_slice(&full[full.len() - n..]);
}
