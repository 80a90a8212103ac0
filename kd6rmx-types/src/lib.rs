//! Type definitions for kd6rmx

pub mod error;
pub mod settings;
pub mod traffic;

pub use error::{Error, Result};
pub use settings::{
    BaudRate, BitDepth, Frequency, Interface, LedState, LedTarget, OutputConfig, OutputMode,
    PixelFormat, PulseDivider, Resolution, SyncMode, TestPattern,
};
pub use traffic::{Direction, TrafficRecord};
