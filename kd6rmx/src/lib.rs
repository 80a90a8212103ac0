//! # kd6rmx
//!
//! Control library for KD6RMX contact image sensors.
//!
//! The sensor is configured over a line-oriented ASCII protocol on its serial
//! control port: a two letter register, a hex parameter and a carriage
//! return. This crate turns each device capability into one typed call.
//!
//! ## Features
//!
//! - Typed settings with validation before anything is sent
//! - Blocking request/response exchange with a hard timeout
//! - Decoded register read-back
//! - Raw traffic hooks
//!
//! ## Quick Start
//!
//! ```no_run
//! use kd6rmx::{BitDepth, Interface, OutputConfig, Register, Sensor};
//!
//! fn main() -> kd6rmx::Result<()> {
//!     let mut sensor = Sensor::serial("/dev/ttyUSB0");
//!
//!     sensor.load_settings(1)?;
//!     let (bits, config) = (BitDepth::Bits10, OutputConfig::Medium);
//!     sensor.set_pixel_output_format(bits, Interface::Serial, config, 2)?;
//!
//!     let freq = sensor.read_register(Register::OutputFrequency)?;
//!     println!("{}", freq);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod sensor;
pub mod shared;

// Re-exports
pub use error::{Error, Result};
pub use sensor::Sensor;
pub use shared::SharedSensor;

pub use kd6rmx_core::{Reading, Register, Response};
pub use kd6rmx_transport::{
    Connector, DeviceFileConnector, Port, SerialConnector, TracingSink, TrafficSink,
};
pub use kd6rmx_types::{
    BitDepth, Direction, Interface, LedTarget, OutputConfig, TestPattern, TrafficRecord,
};
