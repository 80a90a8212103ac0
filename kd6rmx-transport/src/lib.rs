//! Transport layer for the KD6RMX control protocol
//!
//! Provides the request/response exchange over a serial control port.

pub mod device_file;
pub mod error;
pub mod reader;
pub mod serial;
pub mod session;
pub mod traffic;

pub use device_file::DeviceFileConnector;
pub use error::{Error, Result};
pub use reader::{ReadEvent, ReadState, ResponseReader};
pub use serial::SerialConnector;
pub use session::Session;
pub use traffic::{TracingSink, TrafficSink};

use std::io::{Read, Write};

/// An open control port
pub trait Port: Read + Write + Send {}

impl<T: Read + Write + Send> Port for T {}

/// Opens the control port for one exchange
///
/// The session calls [`Connector::open`] once per command and drops the
/// returned port when the exchange ends, successfully or not.
pub trait Connector: Send + Sync {
    /// Open the port
    fn open(&self) -> Result<Box<dyn Port>>;
    
    /// Human readable port name
    fn describe(&self) -> String;
}
