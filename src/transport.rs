//! The byte channel underneath the frame reader. On-device this is a UART;
//! the host build substitutes a TCP loopback socket. Either way the core
//! only ever sees the two blocking operations below; reconnection, if any,
//! happens behind them (see `main_host.c`'s `gti2_read` re-accepting on a
//! zero-length read).

use crate::error::{AgentError, Result};

pub trait Transport {
    /// Fill `buf` completely, blocking as needed. May transparently
    /// reconnect on a closed channel; the caller cannot distinguish that
    /// from ordinary blocking.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Write all of `buf`, blocking as needed.
    fn write_all(&mut self, buf: &[u8]) -> Result<()>;
}

/// An in-memory duplex channel for unit and integration tests, standing in
/// for a real UART or socket without requiring one.
#[cfg(any(test, feature = "host"))]
pub mod loopback {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    pub struct LoopbackTransport {
        pub inbox: VecDeque<u8>,
        pub outbox: Vec<u8>,
    }

    impl LoopbackTransport {
        pub fn with_input(bytes: &[u8]) -> Self {
            LoopbackTransport {
                inbox: bytes.iter().copied().collect(),
                outbox: Vec::new(),
            }
        }

        pub fn feed(&mut self, bytes: &[u8]) {
            self.inbox.extend(bytes.iter().copied());
        }
    }

    impl Transport for LoopbackTransport {
        fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
            if self.inbox.len() < buf.len() {
                return Err(AgentError::Transport);
            }
            for slot in buf.iter_mut() {
                *slot = self.inbox.pop_front().expect("checked length above");
            }
            Ok(())
        }

        fn write_all(&mut self, buf: &[u8]) -> Result<()> {
            self.outbox.extend_from_slice(buf);
            Ok(())
        }
    }
}

/// TCP loopback transport used for the host test binary, standing in for a
/// UART the way `main_host.c` stands in for the on-device serial driver: one
/// listener, one accepted connection, re-accepted transparently on EOF.
#[cfg(feature = "host")]
pub mod tcp {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};

    pub struct TcpTransport {
        listener: TcpListener,
        stream: TcpStream,
    }

    impl TcpTransport {
        pub fn bind(addr: &str) -> std::io::Result<Self> {
            let listener = TcpListener::bind(addr)?;
            log::debug!("tether-host: listening on {addr}");
            let (stream, peer) = listener.accept()?;
            log::debug!("tether-host: accepted {peer}");
            Ok(TcpTransport { listener, stream })
        }

        fn reconnect(&mut self) -> Result<()> {
            log::warn!("tether-host: transport closed, re-accepting");
            let (stream, peer) = self.listener.accept().map_err(|_| AgentError::Transport)?;
            log::debug!("tether-host: accepted {peer}");
            self.stream = stream;
            Ok(())
        }
    }

    impl Transport for TcpTransport {
        fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
            match self.stream.read(buf) {
                Ok(0) => {
                    self.reconnect()?;
                    self.stream.read_exact(buf).map_err(|_| AgentError::Transport)
                }
                Ok(n) if n == buf.len() => Ok(()),
                Ok(n) => self
                    .stream
                    .read_exact(&mut buf[n..])
                    .map_err(|_| AgentError::Transport),
                Err(_) => Err(AgentError::Transport),
            }
        }

        fn write_all(&mut self, buf: &[u8]) -> Result<()> {
            self.stream.write_all(buf).map_err(|_| AgentError::Transport)
        }
    }
}
