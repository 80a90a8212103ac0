//! Response accumulation state machine
//!
//! Each observed read outcome moves the reader through:
//!
//! ```text
//!            Data (no CR yet) / Pending
//!               ┌────────┐
//!               ▼        │
//!   start ──► Reading ───┴──► Terminated   last byte is CR
//!               │
//!               ├──────────► TimedOut     budget exceeded
//!               └──────────► Errored      zero-byte read / I/O error
//! ```
//!
//! Time is passed in explicitly so tests can drive the timeout without
//! sleeping.

use std::io;
use std::time::{Duration, Instant};

use bytes::{Bytes, BytesMut};
use kd6rmx_core::constants::TERMINATOR;

use crate::error::Error;

/// Outcome of one read on the port
#[derive(Debug)]
pub enum ReadEvent<'a> {
    /// Bytes arrived
    Data(&'a [u8]),

    /// The read returned zero bytes without an error
    Empty,

    /// Nothing available yet (poll timeout, would-block, end of stream on a
    /// polled device)
    Pending,

    /// The port failed
    Failed(io::Error),
}

impl<'a> ReadEvent<'a> {
    /// Classify a `Read::read` result for the bytes in `buf`
    pub fn from_io(result: io::Result<usize>, buf: &'a [u8]) -> Self {
        match result {
            Ok(0) => Self::Empty,
            Ok(n) => Self::Data(&buf[..n]),
            Err(e) if is_pending(&e) => Self::Pending,
            Err(e) => Self::Failed(e),
        }
    }
}

fn is_pending(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::Interrupted
            | io::ErrorKind::UnexpectedEof
    )
}

/// Reader state after an event
#[derive(Debug)]
pub enum ReadState {
    /// Waiting for more bytes
    Reading,

    /// Complete frame, terminator included
    Terminated(Bytes),

    /// No terminator within the budget
    TimedOut(Duration),

    /// Zero-byte read or port failure
    Errored(Error),
}

/// Accumulates response bytes until the frame terminator or the time budget
#[derive(Debug)]
pub struct ResponseReader {
    buf: BytesMut,
    started: Instant,
    budget: Duration,
}

impl ResponseReader {
    /// Start reading at `started` with `budget` to receive a full frame
    pub fn new(budget: Duration, started: Instant) -> Self {
        Self {
            buf: BytesMut::with_capacity(16),
            started,
            budget,
        }
    }

    /// Bytes received so far
    pub fn received(&self) -> &[u8] {
        &self.buf
    }

    /// Feed one read outcome observed at `now`
    pub fn observe(&mut self, event: ReadEvent<'_>, now: Instant) -> ReadState {
        match event {
            ReadEvent::Data(chunk) => {
                self.buf.extend_from_slice(chunk);
                if self.buf.last() == Some(&TERMINATOR) {
                    return ReadState::Terminated(self.buf.split().freeze());
                }
            }
            ReadEvent::Empty => return ReadState::Errored(Error::EmptyRead),
            ReadEvent::Failed(e) => return ReadState::Errored(Error::Read(e)),
            ReadEvent::Pending => {}
        }

        let elapsed = now.saturating_duration_since(self.started);
        if elapsed > self.budget {
            ReadState::TimedOut(elapsed)
        } else {
            ReadState::Reading
        }
    }
}
