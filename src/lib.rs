//! On-device remote-invocation agent.
//!
//! A development workstation drives this crate over a framed byte protocol
//! to echo data, read and write arbitrary target memory, and invoke
//! arbitrary functions by address. See `dispatcher::Dispatcher` for the
//! entry point and `call` for the indirect-call trampoline, the hard part
//! of the system.
//!
//! `no_std` by default, for firmware builds; `std` (and a TCP transport) are
//! pulled in only under the `host` feature, the same split `rcls-gpsfreak`'s
//! `freak.rs` makes via `#![cfg_attr(target_os = "none", no_std)]`, so that
//! `cargo test` can run its `#[test]`s against the same source with std
//! available.

#![cfg_attr(not(any(test, feature = "host")), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod call;
pub mod codec;
pub mod dispatcher;
pub mod error;
pub mod frame;
pub mod memory;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use error::{AgentError, Result};
pub use memory::HEAP_SIZE;
