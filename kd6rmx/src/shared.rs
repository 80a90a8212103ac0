//! Sensor handle shared between threads

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::sensor::Sensor;

/// Cloneable, lock-protected [`Sensor`]
///
/// The device answers one command at a time. Holding the lock for a whole
/// operation keeps command/response cycles from interleaving.
#[derive(Debug, Clone)]
pub struct SharedSensor {
    inner: Arc<Mutex<Sensor>>,
}

impl SharedSensor {
    pub fn new(sensor: Sensor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sensor)),
        }
    }

    /// Run `f` with exclusive access to the sensor
    pub fn with<R>(&self, f: impl FnOnce(&mut Sensor) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Lock the sensor for a sequence of operations
    pub fn lock(&self) -> MutexGuard<'_, Sensor> {
        self.inner.lock()
    }
}

impl From<Sensor> for SharedSensor {
    fn from(sensor: Sensor) -> Self {
        Self::new(sensor)
    }
}
