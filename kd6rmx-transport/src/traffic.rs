//! Raw traffic hooks
//!
//! The session reports every frame it sends and every complete frame it
//! receives to an optional [`TrafficSink`]. What happens to the records
//! (console, file, test assertions) is up to the sink.

use kd6rmx_types::TrafficRecord;
use tracing::info;

/// Receiver of raw control-port traffic
#[cfg_attr(test, mockall::automock)]
pub trait TrafficSink: Send + Sync {
    fn record(&self, record: &TrafficRecord);
}

/// Sink that forwards records to `tracing` under the `kd6rmx::traffic` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TrafficSink for TracingSink {
    fn record(&self, record: &TrafficRecord) {
        info!(
            target: "kd6rmx::traffic",
            timestamp = %record.timestamp.format("%Y-%m-%d %H:%M:%S%.9f"),
            direction = %record.direction,
            "{}",
            record.raw.escape_debug()
        );
    }
}
