//! End-to-end dispatcher coverage over the in-memory loopback transport,
//! exercising echo, memory read/write, oversize-frame, unknown-command, and
//! call scenarios the way the original's host test harnesses
//! (`test/host/main.c`, `examples/main_host.c`) drive the dispatcher over a
//! real socket.

use tether::Dispatcher;
use tether::transport::loopback::LoopbackTransport;

#[test]
fn e1_echo_round_trip() {
    let mut t = LoopbackTransport::with_input(&[0x00, 0x00, 0x00, 0x04, 0xde, 0xad, 0xbe, 0xef]);
    let mut d = Dispatcher::new();
    d.serve_one(&mut t).unwrap();
    assert_eq!(t.outbox, [b'A', b'C', b'K', 0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn e2_memory_write_then_read() {
    let mut scratch = [0u8; 64];
    let addr = scratch.as_mut_ptr() as usize;
    let addr_bytes = addr.to_be_bytes();
    let uword_bytes = addr_bytes.len();

    // WRITE(addr, [aa bb cc dd])
    let mut write_req = vec![0x00, 0x02];
    let write_len = uword_bytes + 4;
    write_req.push((write_len >> 8) as u8);
    write_req.push(write_len as u8);
    write_req.extend_from_slice(&addr_bytes);
    write_req.extend_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd]);

    let mut t = LoopbackTransport::with_input(&write_req);
    let mut d = Dispatcher::new();
    d.serve_one(&mut t).unwrap();
    assert_eq!(t.outbox, b"ACK");
    assert_eq!(&scratch[..4], &[0xaa, 0xbb, 0xcc, 0xdd]);

    // READ(addr, 4)
    let mut read_req = vec![0x00, 0x01];
    let read_len = uword_bytes * 2;
    read_req.push((read_len >> 8) as u8);
    read_req.push(read_len as u8);
    read_req.extend_from_slice(&addr_bytes);
    read_req.extend_from_slice(&4usize.to_be_bytes());

    t.feed(&read_req);
    t.outbox.clear();
    d.serve_one(&mut t).unwrap();
    let mut expected = vec![b'A', b'C', b'K'];
    expected.extend_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd]);
    assert_eq!(t.outbox, expected);
}

#[test]
fn e6_oversize_frame_nck_then_next_frame_processed() {
    let mut t = LoopbackTransport::with_input(&[0x00, 0x00, 0xff, 0xfe]);
    t.feed(&[0x00, 0x00, 0x00, 0x04, 0xde, 0xad, 0xbe, 0xef]);
    let mut d = Dispatcher::new();

    d.serve_one(&mut t).unwrap();
    assert_eq!(t.outbox, b"NCK");
    t.outbox.clear();

    d.serve_one(&mut t).unwrap();
    assert_eq!(t.outbox, [b'A', b'C', b'K', 0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn unknown_command_is_silently_dropped_and_framing_holds() {
    let mut t = LoopbackTransport::with_input(&[0xff, 0xff, 0x00, 0x02, 0x01, 0x02]);
    t.feed(&[0x00, 0x00, 0x00, 0x01, 0x7f]);
    let mut d = Dispatcher::new();

    d.serve_one(&mut t).unwrap();
    assert!(t.outbox.is_empty());

    d.serve_one(&mut t).unwrap();
    assert_eq!(t.outbox, [b'A', b'C', b'K', 0x7f]);
}

#[test]
fn call_arity_zero_void_return_then_read_back_side_effect() {
    static mut SCRATCH: [u8; 2] = [0, 0];

    extern "C" fn writes_marker() -> usize {
        unsafe {
            let scratch = (&raw mut SCRATCH).cast::<u8>();
            *scratch = 0xde;
            *scratch.add(1) = 0xad;
        }
        0
    }

    let addr = (writes_marker as usize).to_be_bytes();

    let mut call_req = vec![0x00, 0x03];
    let body_len = addr.len() + 2 + 2;
    call_req.push((body_len >> 8) as u8);
    call_req.push(body_len as u8);
    call_req.extend_from_slice(&addr);
    call_req.extend_from_slice(&0u16.to_be_bytes()); // numbytes_out
    call_req.extend_from_slice(&0u16.to_be_bytes()); // numparam_in

    let mut t = LoopbackTransport::with_input(&call_req);
    let mut d = Dispatcher::new();
    d.serve_one(&mut t).unwrap();
    assert_eq!(t.outbox, b"ACK");
    unsafe {
        assert_eq!(*(&raw const SCRATCH), [0xde, 0xad]);
    }
}
