//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Core(#[from] kd6rmx_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] kd6rmx_transport::Error),
}

impl Error {
    /// Port could not be opened, written or read, or the device stayed silent
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The device answered, but not in a way the protocol allows
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_protocol_violation())
    }

    /// The request was rejected before anything went on the wire
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_invalid_argument())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
