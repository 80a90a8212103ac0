//! High-level sensor interface

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use kd6rmx_core::constants::{probes, MIN_RESPONSE_LEN, RESET_SETTLE};
use kd6rmx_core::{catalog, Parameter, Reading, Register, Request, Response};
use kd6rmx_transport::{Connector, DeviceFileConnector, SerialConnector, Session, TrafficSink};
use kd6rmx_types::{BitDepth, Interface, LedTarget, OutputConfig, PixelFormat, TestPattern};

use crate::error::Result;

/// `SS00xxxx` is answered with the clock echoed, so at least 5 hex characters
const INTERNAL_SYNC_MIN_LEN: usize = 5;

/// Registers and probes read by [`Sensor::dump_registers`], in order
pub const DUMP_PROBES: [(Register, u8); 14] = [
    (Register::CommunicationSpeed, probes::PRIMARY),
    (Register::OutputFrequency, probes::PRIMARY),
    (Register::OutputConfig, probes::PRIMARY),
    (Register::OutputConfig, probes::SECONDARY),
    (Register::OutputConfig, probes::TERTIARY),
    (Register::Resolution, probes::PRIMARY),
    (Register::SyncSelect, probes::PRIMARY),
    (Register::DarkCorrection, probes::PRIMARY),
    (Register::LedControl, probes::PRIMARY),
    (Register::LedControl, probes::SECONDARY),
    (Register::LedControl, probes::TERTIARY),
    (Register::WhiteCorrection, probes::PRIMARY),
    (Register::TestPattern, probes::PRIMARY),
    (Register::TestPattern, probes::SECONDARY),
];

/// KD6RMX contact image sensor
///
/// Every operation is one blocking command/response exchange (two for
/// [`Sensor::software_reset`]). The control port is opened for each exchange
/// and closed again afterwards.
///
/// # Examples
///
/// ```no_run
/// use kd6rmx::{LedTarget, Sensor};
///
/// fn main() -> kd6rmx::Result<()> {
///     let mut sensor = Sensor::serial("/dev/ttyUSB0");
///
///     sensor.set_output_frequency(60.0)?;
///     sensor.led_control(LedTarget::AB, true, 1)?;
///
///     for reading in sensor.dump_registers()? {
///         println!("{}", reading);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Sensor {
    session: Session,
    reset_settle: Duration,
}

impl Sensor {
    /// Create a sensor talking through `connector`
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self {
            session: Session::new(connector),
            reset_settle: RESET_SETTLE,
        }
    }

    /// Create a sensor on a serial port at the factory default 9600 baud
    pub fn serial(path: impl Into<String>) -> Self {
        Self::new(SerialConnector::new(path))
    }

    /// Create a sensor on a control port exposed as a device file
    pub fn device_file(path: impl Into<PathBuf>) -> Self {
        Self::new(DeviceFileConnector::new(path))
    }

    /// Set response timeout (default: 10 seconds)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.session = self.session.with_timeout(timeout);
        self
    }

    /// Set how long [`Sensor::software_reset`] waits between its two steps
    /// (default: 10 seconds)
    pub fn with_reset_settle(mut self, settle: Duration) -> Self {
        self.reset_settle = settle;
        self
    }

    /// Report every raw frame to `sink`
    pub fn with_traffic_sink(mut self, sink: Arc<dyn TrafficSink>) -> Self {
        self.session = self.session.with_traffic_sink(sink);
        self
    }

    /// Control port name
    pub fn describe(&self) -> String {
        self.session.describe()
    }

    // Presets

    /// Load the settings stored in `preset` (0 = factory defaults, 1-3 = user)
    pub fn load_settings(&mut self, preset: u8) -> Result<()> {
        let response = self.command(Register::DataTransfer, catalog::load_preset(preset)?)?;
        catalog::verify_preset_echo(&response, preset)?;

        info!("Loaded settings from preset {}", preset);
        Ok(())
    }

    /// Save the current settings into user `preset` (1-3)
    pub fn save_settings(&mut self, preset: u8) -> Result<()> {
        let response = self.command(Register::DataTransfer, catalog::save_preset(preset)?)?;
        catalog::verify_preset_echo(&response, preset)?;

        info!("Saved settings to preset {}", preset);
        Ok(())
    }

    // Output

    /// Set UART speed; the port must be reopened at the new rate afterwards
    pub fn set_communication_speed(&mut self, baud: u32) -> Result<()> {
        self.command(Register::CommunicationSpeed, catalog::communication_speed(baud)?)?;

        warn!("Communication speed switched to {} baud", baud);
        Ok(())
    }

    /// Set pixel output frequency in MHz (48.0 - 84.0)
    pub fn set_output_frequency(&mut self, mhz: f32) -> Result<()> {
        self.command(Register::OutputFrequency, catalog::output_frequency(mhz)?)?;
        Ok(())
    }

    /// Set pixel output format
    ///
    /// Base configuration only supports a single channel.
    pub fn set_pixel_output_format(
        &mut self,
        bits: BitDepth,
        interface: Interface,
        config: OutputConfig,
        channels: u8,
    ) -> Result<()> {
        let format = PixelFormat::new(bits, interface, config, channels);
        self.command(Register::OutputConfig, catalog::pixel_output_format(format)?)?;
        Ok(())
    }

    pub fn set_pixel_overlap(&mut self, on: bool) -> Result<()> {
        self.command(Register::OutputConfig, catalog::pixel_overlap(on))?;
        Ok(())
    }

    pub fn set_pixel_interpolation(&mut self, on: bool) -> Result<()> {
        self.command(Register::OutputConfig, catalog::pixel_interpolation(on))?;
        Ok(())
    }

    /// Set resolution in dpi (600, 300, 150 or 75)
    pub fn set_resolution(&mut self, dpi: u16) -> Result<()> {
        self.command(Register::Resolution, catalog::resolution(dpi)?)?;
        Ok(())
    }

    // Synchronization

    /// Line sync from the external trigger input
    pub fn set_external_sync(&mut self) -> Result<()> {
        self.command(Register::SyncSelect, catalog::external_sync())?;
        Ok(())
    }

    /// Line sync from the internal clock, `clock` in device units (1-65535)
    pub fn set_internal_sync(&mut self, clock: u16) -> Result<()> {
        let response = self.command(Register::SyncSelect, catalog::internal_sync(clock)?)?;
        response.ensure_min_len(INTERNAL_SYNC_MIN_LEN)?;
        Ok(())
    }

    // Illumination

    /// Switch LEDs on with the given pulse divider (1, 2, 4 or 8), or off
    ///
    /// Switching off turns off both LEDs regardless of `target`.
    pub fn led_control(&mut self, target: LedTarget, on: bool, pulse_divider: u8) -> Result<()> {
        self.command(Register::LedControl, catalog::led_control(target, on, pulse_divider)?)?;
        Ok(())
    }

    /// Set raw duty cycle (1-4095) of LED A or B
    pub fn led_duty_cycle(&mut self, target: LedTarget, duty: u16) -> Result<()> {
        self.command(Register::LedControl, catalog::led_duty_cycle(target, duty)?)?;
        Ok(())
    }

    // Correction

    pub fn set_dark_correction(&mut self, on: bool) -> Result<()> {
        self.command(Register::DarkCorrection, catalog::switch(on))?;
        Ok(())
    }

    /// Run dark correction; the lens must be covered
    pub fn perform_dark_correction(&mut self) -> Result<()> {
        self.command(Register::DarkCorrection, catalog::execute())?;

        info!("Dark correction performed");
        Ok(())
    }

    pub fn set_white_correction(&mut self, on: bool) -> Result<()> {
        self.command(Register::WhiteCorrection, catalog::switch(on))?;
        Ok(())
    }

    /// Run white correction against the current white target
    pub fn perform_white_correction(&mut self) -> Result<()> {
        self.command(Register::WhiteCorrection, catalog::execute())?;

        info!("White correction performed");
        Ok(())
    }

    /// Set white correction target level (0-255)
    ///
    /// The sensor runs a correction cycle after accepting the target. Give it
    /// about a second before the next command.
    pub fn set_white_correction_target(&mut self, target: u16) -> Result<()> {
        self.command(Register::WhiteCorrection, catalog::white_correction_target(target)?)?;
        Ok(())
    }

    // Gain

    pub fn set_gain_amplifier(&mut self, on: bool) -> Result<()> {
        self.command(Register::Gain, catalog::switch(on))?;
        Ok(())
    }

    /// Set digital gain level (-1027 to 3071)
    pub fn set_gain_level(&mut self, level: i32) -> Result<()> {
        self.command(Register::Gain, catalog::gain_level(level)?)?;
        Ok(())
    }

    // Test pattern

    /// Switch between image output and test pattern output
    pub fn set_test_pattern_output(&mut self, on: bool) -> Result<()> {
        self.command(Register::TestPattern, catalog::switch(on))?;
        Ok(())
    }

    pub fn set_test_pattern(&mut self, pattern: TestPattern) -> Result<()> {
        self.command(Register::TestPattern, catalog::test_pattern(pattern)?)?;
        Ok(())
    }

    // Maintenance

    /// Reset the sensor: `SR21`, wait for it to come back up, then `SR01`
    ///
    /// Blocks for the configured settle time.
    pub fn software_reset(&mut self) -> Result<()> {
        warn!("Resetting sensor on {}", self.describe());
        self.command(Register::SoftwareReset, catalog::execute())?;

        debug!("Waiting {:?} for the sensor to settle", self.reset_settle);
        thread::sleep(self.reset_settle);

        self.command(Register::SoftwareReset, catalog::switch(true))?;

        info!("Sensor reset complete");
        Ok(())
    }

    // Read-back

    /// Read a register with the default probe
    pub fn read_register(&mut self, register: Register) -> Result<Reading> {
        self.read_register_with_probe(register, probes::PRIMARY)
    }

    /// Read the sub-field of `register` selected by `probe`
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the register is write-only or `probe` is not one
    ///   of its read probes (nothing is sent)
    /// - `DeviceStatus` if the device answers with a non-zero status byte
    /// - `DecodeError` if the answer is not a known value
    pub fn read_register_with_probe(&mut self, register: Register, probe: u8) -> Result<Reading> {
        catalog::check_probe(register, probe)?;

        let response = self.exchange(&Request::read(register, probe))?;
        let reading = catalog::decode(register, probe, &response)?;

        debug!("{}", reading);
        Ok(reading)
    }

    /// Read every register in [`DUMP_PROBES`], stopping at the first failure
    pub fn dump_registers(&mut self) -> Result<Vec<Reading>> {
        DUMP_PROBES
            .iter()
            .map(|&(register, probe)| self.read_register_with_probe(register, probe))
            .collect()
    }

    /// Send an arbitrary command and return the raw answer
    pub fn send_raw(&mut self, register: Register, parameter: &str) -> Result<Response> {
        let parameter = Parameter::parse(parameter)?;
        self.exchange(&Request::new(register, parameter))
    }

    // Helper methods

    fn command(&mut self, register: Register, parameter: Parameter) -> Result<Response> {
        let response = self.exchange(&Request::new(register, parameter))?;
        response.ensure_min_len(MIN_RESPONSE_LEN)?;
        Ok(response)
    }

    fn exchange(&mut self, request: &Request) -> Result<Response> {
        debug!("Sending {}", request);

        let raw = self.session.exchange(&request.encode())?;
        let response = Response::decode(&raw)?;

        debug!("Response to {}: {}", request, response.hex());
        Ok(response)
    }
}
