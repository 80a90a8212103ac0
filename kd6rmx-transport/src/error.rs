//! Transport errors

use std::io;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error opening control port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: io::Error,
    },
    
    #[error("Error sending command: {0}")]
    Write(#[source] io::Error),
    
    #[error("Error sending command: wrote {written} of {expected} bytes")]
    ShortWrite {
        written: usize,
        expected: usize,
    },
    
    #[error("Error receiving result from command: {0}")]
    Read(#[source] io::Error),
    
    #[error("No data in result from command")]
    EmptyRead,
    
    #[error("Timeout receiving result from command after {elapsed:?}")]
    Timeout {
        elapsed: Duration,
    },
}

impl Error {
    /// Check if the device never finished its answer in time
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
    
    /// Check if the port itself failed (as opposed to the device staying silent)
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::Open { .. } | Self::Write(_) | Self::ShortWrite { .. } | Self::Read(_)
        )
    }
}
