//! Register read-back decoding

use std::fmt;

use tracing::trace;

use kd6rmx_types::{
    BaudRate, Frequency, LedState, LedTarget, OutputMode, PixelFormat, Resolution, SyncMode,
    TestPattern,
};

use super::{
    value_of, BAUD_RATES, FREQUENCIES, INTERPOLATION, LED_TARGETS, OUTPUT_MODES, OVERLAP,
    PIXEL_FORMATS, PULSE_DIVIDERS, RESOLUTIONS, SWITCH, SYNC_MODES, TEST_PATTERNS,
};
use crate::constants::{probes, MIN_RESPONSE_LEN, STATUS_OK};
use crate::error::{Error, Result};
use crate::frame::Response;
use crate::register::Register;

/// A decoded register value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    CommunicationSpeed(BaudRate),
    OutputFrequency(Frequency),
    PixelFormat(PixelFormat),
    PixelOverlap(bool),
    PixelInterpolation(bool),
    Resolution(Resolution),
    Sync(SyncMode),
    Led(LedState),
    LedPeriod { target: LedTarget, value: u16 },
    LedPeriodSetting(u8),
    DarkCorrection(bool),
    WhiteCorrection(bool),
    OutputMode(OutputMode),
    TestPattern(TestPattern),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommunicationSpeed(rate) => write!(f, "UART setting: {rate}"),
            Self::OutputFrequency(freq) => write!(f, "Frequency: {freq}"),
            Self::PixelFormat(format) => write!(f, "Output format: {format}"),
            Self::PixelOverlap(on) => write!(f, "Overlap output {}", on_off(*on)),
            Self::PixelInterpolation(on) => write!(f, "Interpolation function {}", on_off(*on)),
            Self::Resolution(res) => write!(f, "Resolution: {res}"),
            Self::Sync(mode) => write!(f, "{mode}"),
            Self::Led(state) => write!(f, "{state}"),
            Self::LedPeriod { target, value } => write!(f, "LED period {target}: {value}"),
            Self::LedPeriodSetting(code) => write!(f, "Period setting 0x{code:02X}"),
            Self::DarkCorrection(on) => write!(f, "Black correction {}", on_off(*on)),
            Self::WhiteCorrection(on) => write!(f, "White correction {}", on_off(*on)),
            Self::OutputMode(mode) => write!(f, "{mode}"),
            Self::TestPattern(pattern) => write!(f, "{pattern}"),
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

/// Probes each register answers to
///
/// Any other byte after a register mnemonic is a write, so a read request is
/// only built for these pairs.
pub fn read_probes(register: Register) -> &'static [u8] {
    match register {
        Register::OutputConfig => &[probes::PRIMARY, probes::SECONDARY, probes::TERTIARY],
        Register::LedControl => &[
            probes::PRIMARY,
            probes::SECONDARY,
            probes::TERTIARY,
            probes::PERIOD_SETTING,
        ],
        Register::TestPattern => &[probes::PRIMARY, probes::SECONDARY],
        Register::DataTransfer | Register::Gain | Register::SoftwareReset => &[],
        _ => &[probes::PRIMARY],
    }
}

/// Check that `probe` reads `register` without changing it
pub fn accepts_probe(register: Register, probe: u8) -> bool {
    read_probes(register).contains(&probe)
}

/// Fail with `InvalidArgument` unless `probe` is a read probe of `register`
pub fn check_probe(register: Register, probe: u8) -> Result<()> {
    if !accepts_probe(register, probe) {
        return Err(Error::invalid(format!(
            "register {register} cannot be read with probe 0x{probe:02X}"
        )));
    }
    Ok(())
}

/// Decode the answer to a read request sent with `probe`
///
/// # Errors
///
/// - `InvalidArgument` if the register cannot be read with `probe`
/// - `DeviceStatus` if the status byte is not `00`
/// - `ShortResponse` if the payload is missing
/// - `DecodeError` if the value is not in the register's table
///
/// # Examples
///
/// ```
/// use kd6rmx_core::{catalog, Reading, Register, Response};
///
/// let response = Response::decode(b"000D\r").unwrap();
/// let reading = catalog::decode(Register::OutputFrequency, 0x80, &response).unwrap();
/// assert_eq!(reading.to_string(), "Frequency: 60.0 MHz");
/// ```
pub fn decode(register: Register, probe: u8, response: &Response) -> Result<Reading> {
    check_probe(register, probe)?;

    if response.status() != STATUS_OK {
        return Err(Error::DeviceStatus {
            register,
            status: response.status(),
        });
    }

    response.ensure_min_len(MIN_RESPONSE_LEN)?;
    let code = response.value()?;
    trace!("Decoding {} (probe 0x{:02X}): {}", register, probe, response.hex());

    let unknown = || Error::DecodeError { register, code };

    match (register, probe) {
        (Register::CommunicationSpeed, probes::PRIMARY) => value_of(&BAUD_RATES, code)
            .map(Reading::CommunicationSpeed)
            .ok_or_else(unknown),
        (Register::OutputFrequency, probes::PRIMARY) => value_of(&FREQUENCIES, code)
            .map(Reading::OutputFrequency)
            .ok_or_else(unknown),
        (Register::OutputConfig, probes::PRIMARY) => value_of(&PIXEL_FORMATS, code)
            .map(Reading::PixelFormat)
            .ok_or_else(unknown),
        (Register::OutputConfig, probes::SECONDARY) => value_of(&OVERLAP, code)
            .map(Reading::PixelOverlap)
            .ok_or_else(unknown),
        (Register::OutputConfig, probes::TERTIARY) => value_of(&INTERPOLATION, code)
            .map(Reading::PixelInterpolation)
            .ok_or_else(unknown),
        (Register::Resolution, probes::PRIMARY) => value_of(&RESOLUTIONS, code)
            .map(Reading::Resolution)
            .ok_or_else(unknown),
        (Register::SyncSelect, probes::PRIMARY) => value_of(&SYNC_MODES, code)
            .map(Reading::Sync)
            .ok_or_else(unknown),
        (Register::LedControl, probes::PRIMARY) => {
            decode_led_state(code).map(Reading::Led).ok_or_else(unknown)
        }
        (Register::LedControl, probes::SECONDARY) => Ok(Reading::LedPeriod {
            target: LedTarget::A,
            value: response.word_at(2)?,
        }),
        (Register::LedControl, probes::TERTIARY) => Ok(Reading::LedPeriod {
            target: LedTarget::B,
            value: response.word_at(2)?,
        }),
        (Register::LedControl, probes::PERIOD_SETTING) => Ok(Reading::LedPeriodSetting(code)),
        (Register::DarkCorrection, probes::PRIMARY) => value_of(&SWITCH, code)
            .map(Reading::DarkCorrection)
            .ok_or_else(unknown),
        (Register::WhiteCorrection, probes::PRIMARY) => value_of(&SWITCH, code)
            .map(Reading::WhiteCorrection)
            .ok_or_else(unknown),
        (Register::TestPattern, probes::PRIMARY) => value_of(&OUTPUT_MODES, code)
            .map(Reading::OutputMode)
            .ok_or_else(unknown),
        (Register::TestPattern, probes::SECONDARY) => value_of(&TEST_PATTERNS, code)
            .map(Reading::TestPattern)
            .ok_or_else(unknown),
        _ => Err(Error::invalid(format!(
            "register {register} cannot be read with probe 0x{probe:02X}"
        ))),
    }
}

/// Inverse of [`super::led_state`]
fn decode_led_state(code: u8) -> Option<LedState> {
    if code > 0x0F {
        return None;
    }

    let divider = value_of(&PULSE_DIVIDERS, code >> 2)?;
    let lit = match code & 0b11 {
        0 => None,
        bits => Some(value_of(&LED_TARGETS, bits)?),
    };

    Some(LedState { divider, lit })
}

/// Check that a `DT` response confirms `preset`
///
/// The device echoes the preset in the low nibble of the value byte.
pub fn verify_preset_echo(response: &Response, preset: u8) -> Result<()> {
    let echoed = response.value()? & 0x0F;

    if echoed != preset {
        return Err(Error::EchoMismatch {
            expected: preset,
            actual: echoed,
        });
    }
    Ok(())
}
