//! Internal error type. Never written to the wire: the protocol only ever
//! signals failure with the `NCK` token or by silently dropping a frame (see
//! `dispatcher.rs`). This exists so the layers below the dispatcher can
//! return `Result` instead of each inventing its own `bool`/panic story.

use core::fmt;

#[derive(Debug)]
pub enum AgentError {
    /// The underlying byte channel failed in a way the transport could not
    /// recover from (as opposed to an EOF it chose to reconnect through).
    Transport,
    /// A body was shorter than the fields a command requires.
    Truncated,
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::Transport => write!(f, "transport error"),
            AgentError::Truncated => write!(f, "body shorter than command requires"),
        }
    }
}

#[cfg(feature = "host")]
impl std::error::Error for AgentError {}

pub type Result<T> = core::result::Result<T, AgentError>;
