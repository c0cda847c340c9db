//! Wire-order <-> host-order conversions.
//!
//! Everything on the wire is big-endian: `u16` fields (command id, length,
//! the CALL header's `numbytes_out`/`numparam_in`), and pointer/word-width
//! fields (`uptr`, `uword`) sized to the host's native pointer width. The
//! width is a runtime fact (the same dispatcher builds for 32- and 64-bit
//! targets), so unlike `swap.h`'s `__SIZEOF_LONG__`-gated `#if` ladder this
//! reverses exactly `size_of::<usize>()` bytes rather than assuming one.

/// A call argument or a target address. Both are native machine words on the
/// targets this crate supports.
pub type UWord = usize;
pub type UPtr = usize;

pub const UWORD_BYTES: usize = size_of::<UWord>();

pub fn read_be_u16(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

pub fn write_be_u16(value: u16, out: &mut [u8]) {
    out[..2].copy_from_slice(&value.to_be_bytes());
}

pub fn read_be_uword(bytes: &[u8]) -> UWord {
    let mut buf = [0u8; UWORD_BYTES];
    buf.copy_from_slice(&bytes[..UWORD_BYTES]);
    UWord::from_be_bytes(buf)
}

pub fn write_be_uword(value: UWord, out: &mut [u8]) {
    out[..UWORD_BYTES].copy_from_slice(&value.to_be_bytes());
}

pub fn read_be_uptr(bytes: &[u8]) -> UPtr {
    read_be_uword(bytes)
}

pub fn write_be_uptr(value: UPtr, out: &mut [u8]) {
    write_be_uword(value, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u16_round_trip() {
        let mut buf = [0u8; 2];
        write_be_u16(0x0102, &mut buf);
        assert_eq!(buf, [0x01, 0x02]);
        assert_eq!(read_be_u16(&buf), 0x0102);
    }

    #[test]
    fn uword_is_big_endian_on_the_wire() {
        let mut buf = [0u8; UWORD_BYTES];
        write_be_uword(0x01020304, &mut buf);
        assert_eq!(&buf[buf.len() - 4..], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(read_be_uword(&buf), 0x01020304);
    }
}
