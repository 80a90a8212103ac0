//! Device file connector
//!
//! Some frame grabbers expose the camera's serial control channel as a
//! character device. Such nodes report end-of-stream while the sensor is
//! still working on its answer, so reads at end-of-stream are surfaced as
//! "no data yet" instead of a zero-byte read.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::{error::*, Connector, Port};

/// Control port exposed as a device file (e.g. a Camera Link serial node)
#[derive(Debug, Clone)]
pub struct DeviceFileConnector {
    path: PathBuf,
}

impl DeviceFileConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Connector for DeviceFileConnector {
    fn open(&self) -> Result<Box<dyn Port>> {
        debug!("Opening {}", self.path.display());

        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::Open {
                port: self.path.display().to_string(),
                source: e,
            })?;

        Ok(Box::new(PolledFile { file }))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Device file whose end-of-stream means "nothing yet"
struct PolledFile {
    file: File,
}

impl Read for PolledFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.file.read(buf)? {
            0 if !buf.is_empty() => Err(io::ErrorKind::WouldBlock.into()),
            n => Ok(n),
        }
    }
}

impl Write for PolledFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
