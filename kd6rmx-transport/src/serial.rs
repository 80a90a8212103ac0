//! Serial port connector
//!
//! Opens the sensor's control UART through the OS serial API.

use std::time::Duration;

use kd6rmx_core::constants::DEFAULT_BAUD_RATE;
use serialport::{DataBits, FlowControl, Parity, StopBits};
use tracing::debug;

use crate::{error::*, Connector, Port};

/// Serial control port of a KD6RMX sensor
#[derive(Debug, Clone)]
pub struct SerialConnector {
    path: String,
    baud_rate: u32,
    poll_interval: Duration,
}

impl SerialConnector {
    /// Create a connector for `path` (e.g. `/dev/ttyUSB0`, `COM3`) at 9600 baud
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            poll_interval: Duration::from_millis(100),
        }
    }

    /// Set baud rate
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set how long a single read waits before reporting "no data yet"
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }
}

impl Connector for SerialConnector {
    fn open(&self) -> Result<Box<dyn Port>> {
        debug!("Opening {} at {} baud", self.path, self.baud_rate);

        let port = serialport::new(&self.path, self.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(self.poll_interval)
            .open()
            .map_err(|e| Error::Open {
                port: self.path.clone(),
                source: e.into(),
            })?;

        Ok(Box::new(port))
    }

    fn describe(&self) -> String {
        format!("{}@{}", self.path, self.baud_rate)
    }
}
