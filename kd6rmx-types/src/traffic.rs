//! Raw control-port traffic records

use std::fmt;

use chrono::{DateTime, Local};

/// Direction of a frame on the control port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent => f.write_str("send"),
            Self::Received => f.write_str("received"),
        }
    }
}

/// One frame as it crossed the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficRecord {
    pub timestamp: DateTime<Local>,
    pub direction: Direction,

    /// Frame text including the terminator
    pub raw: String,
}

impl TrafficRecord {
    /// Record a frame stamped with the current local time
    pub fn now(direction: Direction, raw: &[u8]) -> Self {
        Self {
            timestamp: Local::now(),
            direction,
            raw: String::from_utf8_lossy(raw).into_owned(),
        }
    }
}

impl fmt::Display for TrafficRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.9f"),
            self.direction,
            self.raw.escape_debug()
        )
    }
}
