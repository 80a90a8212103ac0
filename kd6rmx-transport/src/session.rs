//! One-shot command exchange
//!
//! Every exchange opens the port, writes the request in a single write,
//! reads until the carriage return and closes the port again.

use std::io::{Read, Write};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use bytes::Bytes;
use kd6rmx_core::constants::RESPONSE_TIMEOUT;
use kd6rmx_types::{Direction, TrafficRecord};
use tracing::{debug, trace, warn};

use crate::reader::{ReadEvent, ReadState, ResponseReader};
use crate::{error::*, Connector, TrafficSink};

const READ_CHUNK: usize = 16;
const PENDING_BACKOFF: Duration = Duration::from_millis(5);

/// Request/response exchange over a connector
pub struct Session {
    connector: Box<dyn Connector>,
    timeout: Duration,
    traffic: Option<Arc<dyn TrafficSink>>,
}

impl Session {
    /// Create a session with the default 10 second response timeout
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self::from_boxed(Box::new(connector))
    }

    pub fn from_boxed(connector: Box<dyn Connector>) -> Self {
        Self {
            connector,
            timeout: RESPONSE_TIMEOUT,
            traffic: None,
        }
    }

    /// Set response timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Report raw traffic to `sink`
    pub fn with_traffic_sink(mut self, sink: Arc<dyn TrafficSink>) -> Self {
        self.traffic = Some(sink);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn describe(&self) -> String {
        self.connector.describe()
    }

    /// Send one encoded request and return the raw response frame,
    /// terminator included
    pub fn exchange(&self, request: &[u8]) -> Result<Bytes> {
        let mut port = self.connector.open()?;

        trace!(
            "Sending {} bytes to {}: {}",
            request.len(),
            self.describe(),
            request.escape_ascii()
        );
        self.report(Direction::Sent, request);

        let written = port.write(request).map_err(Error::Write)?;
        if written != request.len() {
            return Err(Error::ShortWrite {
                written,
                expected: request.len(),
            });
        }
        port.flush().map_err(Error::Write)?;

        let mut reader = ResponseReader::new(self.timeout, Instant::now());
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            let result = port.read(&mut chunk);
            let event = ReadEvent::from_io(result, &chunk);
            let pending = matches!(event, ReadEvent::Pending);

            match reader.observe(event, Instant::now()) {
                ReadState::Reading => {
                    if pending {
                        thread::sleep(PENDING_BACKOFF);
                    }
                }
                ReadState::Terminated(frame) => {
                    trace!("Received {} bytes: {}", frame.len(), frame.escape_ascii());
                    self.report(Direction::Received, &frame);
                    return Ok(frame);
                }
                ReadState::TimedOut(elapsed) => {
                    warn!(
                        "No terminator from {} after {:?} ({} bytes received)",
                        self.describe(),
                        elapsed,
                        reader.received().len()
                    );
                    return Err(Error::Timeout { elapsed });
                }
                ReadState::Errored(e) => {
                    debug!("Read from {} failed: {}", self.describe(), e);
                    return Err(e);
                }
            }
        }
    }

    fn report(&self, direction: Direction, raw: &[u8]) {
        if let Some(sink) = &self.traffic {
            sink.record(&TrafficRecord::now(direction, raw));
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("port", &self.connector.describe())
            .field("timeout", &self.timeout)
            .field("traffic", &self.traffic.is_some())
            .finish()
    }
}
