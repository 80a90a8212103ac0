//! Error types for kd6rmx-core

use crate::register::Register;

/// Result type alias for kd6rmx protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Value cannot be encoded for the device
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    
    /// Frame is missing its terminator or is not hex
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),
    
    /// Response is shorter than the register requires
    #[error(
        "Response too short: expected at least {expected} hex characters, \
         got {actual} ({response:?})"
    )]
    ShortResponse {
        expected: usize,
        actual: usize,
        response: String,
    },
    
    /// Device confirmed a different value than requested
    #[error("Echo mismatch: requested {expected}, device confirmed {actual}")]
    EchoMismatch {
        expected: u8,
        actual: u8,
    },
    
    /// Response code not in the register's decode table
    #[error("Unknown code 0x{code:02X} for register {register}")]
    DecodeError {
        register: Register,
        code: u8,
    },
    
    /// Device reported a non-zero status byte
    #[error("Device rejected {register} request with status 0x{status:02X}")]
    DeviceStatus {
        register: Register,
        status: u8,
    },
    
    /// Unknown register mnemonic
    #[error("Unknown register: {0:?}")]
    UnknownRegister(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
    
    /// Check if the device answered but the answer broke the protocol
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::MalformedFrame(_)
                | Self::ShortResponse { .. }
                | Self::EchoMismatch { .. }
                | Self::DecodeError { .. }
                | Self::DeviceStatus { .. }
        )
    }
    
    /// Check if the error was raised before anything was sent
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::UnknownRegister(_))
    }
}
