//! Symbolic setting -> parameter encoding

use kd6rmx_types::{
    BaudRate, Frequency, LedState, LedTarget, PixelFormat, PulseDivider, Resolution, TestPattern,
};

use super::{
    code_of, BAUD_RATES, FREQUENCIES, INTERPOLATION, LED_TARGETS, OVERLAP, PIXEL_FORMATS,
    PULSE_DIVIDERS, RESOLUTIONS, SWITCH, TEST_PATTERNS,
};
use crate::constants::opcodes;
use crate::error::{Error, Result};
use crate::frame::Parameter;

/// Highest positive gain level
pub const GAIN_MAX: i32 = 3071;

/// Lowest negative gain level
pub const GAIN_MIN: i32 = -1027;

/// Lowest LED duty cycle register value
pub const DUTY_MIN: u16 = 1;

/// Highest LED duty cycle register value (12-bit timer)
pub const DUTY_MAX: u16 = 4095;

/// Highest white correction target
pub const WHITE_TARGET_MAX: u16 = 255;

/// Factory default white correction target
pub const WHITE_TARGET_DEFAULT: u16 = 250;

/// Presets accepted by a load (0 is the factory default)
pub const LOAD_PRESETS: std::ops::RangeInclusive<u8> = 0..=3;

/// Presets accepted by a save
pub const SAVE_PRESETS: std::ops::RangeInclusive<u8> = 1..=3;

/// `BR` parameter for a baud rate
pub fn communication_speed(bps: u32) -> Result<Parameter> {
    let rate = BaudRate::try_from(bps).map_err(|e| Error::invalid(e.to_string()))?;
    lookup(&BAUD_RATES, &rate, "baud rate")
}

/// `OF` parameter for an output frequency in MHz
///
/// # Examples
///
/// ```
/// use kd6rmx_core::catalog;
///
/// assert_eq!(catalog::output_frequency(60.0).unwrap().as_str(), "0D");
/// assert!(catalog::output_frequency(59.0).is_err());
/// ```
pub fn output_frequency(mhz: f32) -> Result<Parameter> {
    let freq = Frequency::from_mhz(mhz).map_err(|e| Error::invalid(e.to_string()))?;
    code_of(&FREQUENCIES, &freq)
        .map(Parameter::byte)
        .ok_or_else(|| Error::invalid(format!("invalid output frequency: {freq}")))
}

/// `OC` parameter for a pixel output format
pub fn pixel_output_format(format: PixelFormat) -> Result<Parameter> {
    lookup(&PIXEL_FORMATS, &format, "pixel output format")
}

/// `OC` parameter for the pixel overlap switch
pub fn pixel_overlap(on: bool) -> Parameter {
    switch_code(&OVERLAP, on)
}

/// `OC` parameter for the pixel interpolation switch
pub fn pixel_interpolation(on: bool) -> Parameter {
    switch_code(&INTERPOLATION, on)
}

/// `RC` parameter for a resolution in dpi
pub fn resolution(dpi: u16) -> Result<Parameter> {
    let resolution = Resolution::try_from(dpi).map_err(|e| Error::invalid(e.to_string()))?;
    lookup(&RESOLUTIONS, &resolution, "resolution")
}

/// `SS` parameter selecting the external sync input
pub fn external_sync() -> Parameter {
    Parameter::byte(opcodes::SYNC_EXTERNAL)
}

/// `SS` parameter selecting internal sync with the given clock count
pub fn internal_sync(clock: u16) -> Result<Parameter> {
    if clock == 0 {
        return Err(Error::invalid("invalid sync clock value: 0"));
    }
    Ok(Parameter::opcode_word(opcodes::SYNC_INTERNAL, clock))
}

/// `DT` parameter loading a preset
pub fn load_preset(preset: u8) -> Result<Parameter> {
    if !LOAD_PRESETS.contains(&preset) {
        return Err(Error::invalid(format!(
            "invalid preset for load: {preset} (valid: 0-3)"
        )));
    }
    Ok(Parameter::byte(preset))
}

/// `DT` parameter saving the active settings to a preset
pub fn save_preset(preset: u8) -> Result<Parameter> {
    if !SAVE_PRESETS.contains(&preset) {
        return Err(Error::invalid(format!(
            "invalid preset for save: {preset} (valid: 1-3)"
        )));
    }
    Ok(Parameter::byte(opcodes::SAVE_PRESET | preset))
}

/// `LC` state byte
///
/// ```text
/// bit 3..2  pulse index (log2 divider)
/// bit 1..0  lit LEDs (A = 01, B = 10, AB = 11)
/// ```
///
/// Switching off clears the whole byte, divider included.
pub fn led_state(state: LedState) -> Result<u8> {
    let Some(target) = state.lit else {
        return Ok(0);
    };

    let target_bits = code_of(&LED_TARGETS, &target)
        .ok_or_else(|| Error::invalid(format!("invalid LEDs: {target:?}")))?;
    let pulse_index = code_of(&PULSE_DIVIDERS, &state.divider)
        .ok_or_else(|| Error::invalid(format!("invalid pulse divider: {:?}", state.divider)))?;

    Ok(target_bits + pulse_index * 4)
}

/// `LC` parameter switching LEDs on or off
///
/// # Examples
///
/// ```
/// use kd6rmx_core::catalog;
/// use kd6rmx_types::LedTarget;
///
/// assert_eq!(catalog::led_control(LedTarget::AB, true, 8).unwrap().as_str(), "0F");
/// assert_eq!(catalog::led_control(LedTarget::A, false, 2).unwrap().as_str(), "00");
/// ```
pub fn led_control(target: LedTarget, on: bool, pulse_divider: u8) -> Result<Parameter> {
    let divider =
        PulseDivider::try_from(pulse_divider).map_err(|e| Error::invalid(e.to_string()))?;

    let state = if on {
        LedState::on(target, divider)
    } else {
        LedState::OFF
    };

    led_state(state).map(Parameter::byte)
}

/// `LC` parameter setting the raw duty cycle of LED A or B
pub fn led_duty_cycle(target: LedTarget, duty: u16) -> Result<Parameter> {
    let selector = match target {
        LedTarget::A => opcodes::DUTY_A,
        LedTarget::B => opcodes::DUTY_B,
        LedTarget::AB => {
            return Err(Error::invalid("duty cycle is set for LED A or B separately"));
        }
    };

    if !(DUTY_MIN..=DUTY_MAX).contains(&duty) {
        return Err(Error::invalid(format!(
            "invalid duty cycle register value: {duty} (valid: {DUTY_MIN}-{DUTY_MAX})"
        )));
    }

    Ok(Parameter::opcode_word(selector, duty))
}

/// Plain on/off parameter (`DC`, `WC`, `PG`, `TP` output mode)
pub fn switch(on: bool) -> Parameter {
    switch_code(&SWITCH, on)
}

/// Parameter starting a dark/white correction run or a reset
pub fn execute() -> Parameter {
    Parameter::byte(opcodes::EXECUTE)
}

/// `WC` parameter setting the white correction target
///
/// The register holds the target pre-scaled by 16.
pub fn white_correction_target(target: u16) -> Result<Parameter> {
    if target > WHITE_TARGET_MAX {
        return Err(Error::invalid(format!(
            "invalid white correction target: {target} (max {WHITE_TARGET_MAX})"
        )));
    }
    Ok(Parameter::opcode_word(opcodes::WHITE_TARGET, target * 16))
}

/// `PG` parameter for a gain level
///
/// The opcode carries the sign and the following word the magnitude:
///
/// ```text
///    0 ..= 3071   -> 20 vvvv   (vvvv = value)
/// -1027 ..= -1    -> 21 vvvv   (vvvv = |value|)
/// ```
///
/// # Examples
///
/// ```
/// use kd6rmx_core::catalog;
///
/// assert_eq!(catalog::gain_level(500).unwrap().as_str(), "2001F4");
/// assert_eq!(catalog::gain_level(-500).unwrap().as_str(), "2101F4");
/// ```
pub fn gain_level(gain: i32) -> Result<Parameter> {
    let magnitude = gain.unsigned_abs() as u16;

    match gain {
        0..=GAIN_MAX => Ok(Parameter::opcode_word(opcodes::GAIN_POSITIVE, magnitude)),
        GAIN_MIN..=-1 => Ok(Parameter::opcode_word(opcodes::GAIN_NEGATIVE, magnitude)),
        _ if gain > GAIN_MAX => Err(Error::invalid(format!(
            "invalid positive gain level: {gain} (max {GAIN_MAX})"
        ))),
        _ => Err(Error::invalid(format!(
            "invalid negative gain level: {gain} (min {GAIN_MIN})"
        ))),
    }
}

/// `TP` parameter selecting the test pattern
pub fn test_pattern(pattern: TestPattern) -> Result<Parameter> {
    lookup(&TEST_PATTERNS, &pattern, "test pattern")
}

fn lookup<T>(table: &[(T, u8)], value: &T, what: &str) -> Result<Parameter>
where
    T: PartialEq + std::fmt::Debug,
{
    code_of(table, value)
        .map(Parameter::byte)
        .ok_or_else(|| Error::invalid(format!("invalid {what}: {value:?}")))
}

fn switch_code(table: &[(bool, u8); 2], on: bool) -> Parameter {
    Parameter::byte(table[usize::from(on)].1)
}
