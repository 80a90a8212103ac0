//! Symbolic sensor settings
//!
//! These are the human-level values a caller works with. Their wire codes
//! live in the register catalog of `kd6rmx-core`; nothing here knows about hex.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Pixel output frequency
///
/// Stored in tenths of a MHz so that table lookups compare integers rather
/// than floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Frequency(u16);

impl Frequency {
    /// Create from tenths of a MHz (`600` is 60.0 MHz)
    pub const fn from_tenths(tenths: u16) -> Self {
        Self(tenths)
    }

    /// Create from a MHz value with at most one decimal place
    ///
    /// # Examples
    ///
    /// ```
    /// use kd6rmx_types::Frequency;
    ///
    /// let freq = Frequency::from_mhz(60.0).unwrap();
    /// assert_eq!(freq.tenths(), 600);
    /// assert!(Frequency::from_mhz(60.05).is_err());
    /// ```
    pub fn from_mhz(mhz: f32) -> Result<Self> {
        if !mhz.is_finite() || mhz <= 0.0 || mhz > f32::from(u16::MAX) / 10.0 {
            return Err(Error::validation("frequency", format!("{mhz} MHz is out of range")));
        }

        let scaled = mhz * 10.0;
        let tenths = scaled.round();
        if (scaled - tenths).abs() > 0.01 {
            return Err(Error::validation(
                "frequency",
                format!("{mhz} MHz has more than one decimal place"),
            ));
        }

        Ok(Self(tenths as u16))
    }

    pub fn tenths(self) -> u16 {
        self.0
    }

    pub fn mhz(self) -> f32 {
        f32::from(self.0) / 10.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} MHz", self.0 / 10, self.0 % 10)
    }
}

/// Serial communication speed of the control port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaudRate {
    B9600,
    B19200,
    B115200,
}

impl BaudRate {
    pub fn bps(self) -> u32 {
        match self {
            Self::B9600 => 9600,
            Self::B19200 => 19200,
            Self::B115200 => 115_200,
        }
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = Error;

    fn try_from(bps: u32) -> Result<Self> {
        match bps {
            9600 => Ok(Self::B9600),
            19200 => Ok(Self::B19200),
            115_200 => Ok(Self::B115200),
            _ => Err(Error::validation("baud rate", format!("{bps} bps is not supported"))),
        }
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} baud", self.bps())
    }
}

/// Scan resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Dpi600,
    Dpi300,
    Dpi150,
    Dpi75,
}

impl Resolution {
    pub fn dpi(self) -> u16 {
        match self {
            Self::Dpi600 => 600,
            Self::Dpi300 => 300,
            Self::Dpi150 => 150,
            Self::Dpi75 => 75,
        }
    }
}

impl TryFrom<u16> for Resolution {
    type Error = Error;

    fn try_from(dpi: u16) -> Result<Self> {
        match dpi {
            600 => Ok(Self::Dpi600),
            300 => Ok(Self::Dpi300),
            150 => Ok(Self::Dpi150),
            75 => Ok(Self::Dpi75),
            _ => Err(Error::validation("resolution", format!("{dpi} dpi is not supported"))),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dpi", self.dpi())
    }
}

/// Bits per output pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    Bits10,
    Bits8,
}

impl FromStr for BitDepth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "10" | "10bit" => Ok(Self::Bits10),
            "8" | "8bit" => Ok(Self::Bits8),
            _ => Err(Error::parse("bit depth", s, "10 or 8")),
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits10 => f.write_str("10bit"),
            Self::Bits8 => f.write_str("8bit"),
        }
    }
}

/// Pixel output interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interface {
    Serial,
    Parallel,
}

impl FromStr for Interface {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "serial" => Ok(Self::Serial),
            "parallel" => Ok(Self::Parallel),
            _ => Err(Error::parse("interface", s, "serial or parallel")),
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => f.write_str("Serial"),
            Self::Parallel => f.write_str("Parallel"),
        }
    }
}

/// Camera Link output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputConfig {
    Base,
    Medium,
}

impl FromStr for OutputConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "medium" => Ok(Self::Medium),
            _ => Err(Error::parse("output config", s, "base or medium")),
        }
    }
}

impl fmt::Display for OutputConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str("Base"),
            Self::Medium => f.write_str("Medium"),
        }
    }
}

/// Complete pixel output shape
///
/// Not every combination exists on the device: the base configuration only
/// drives a single channel. Validity is decided by the register catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelFormat {
    pub bits: BitDepth,
    pub interface: Interface,
    pub config: OutputConfig,
    pub channels: u8,
}

impl PixelFormat {
    pub const fn new(
        bits: BitDepth,
        interface: Interface,
        config: OutputConfig,
        channels: u8,
    ) -> Self {
        Self {
            bits,
            interface,
            config,
            channels,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} configuration, {} channel(s)",
            self.bits, self.interface, self.config, self.channels
        )
    }
}

/// Illumination LED selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedTarget {
    A,
    B,
    AB,
}

impl FromStr for LedTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "AB" => Ok(Self::AB),
            _ => Err(Error::parse("LED target", s, "A, B or AB")),
        }
    }
}

impl fmt::Display for LedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
            Self::AB => f.write_str("A and B"),
        }
    }
}

/// Fraction of each period the LEDs are lit (1 = always, 8 = one eighth)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PulseDivider {
    Div1,
    Div2,
    Div4,
    Div8,
}

impl PulseDivider {
    pub fn divisor(self) -> u8 {
        match self {
            Self::Div1 => 1,
            Self::Div2 => 2,
            Self::Div4 => 4,
            Self::Div8 => 8,
        }
    }
}

impl TryFrom<u8> for PulseDivider {
    type Error = Error;

    fn try_from(divisor: u8) -> Result<Self> {
        match divisor {
            1 => Ok(Self::Div1),
            2 => Ok(Self::Div2),
            4 => Ok(Self::Div4),
            8 => Ok(Self::Div8),
            _ => Err(Error::validation(
                "pulse divider",
                format!("{divisor} is not one of 1, 2, 4 or 8"),
            )),
        }
    }
}

impl fmt::Display for PulseDivider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1/{}", self.divisor())
    }
}

/// State of the LED control register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedState {
    pub divider: PulseDivider,

    /// LEDs switched on, `None` when all are off
    pub lit: Option<LedTarget>,
}

impl LedState {
    pub const OFF: Self = Self {
        divider: PulseDivider::Div1,
        lit: None,
    };

    pub const fn on(target: LedTarget, divider: PulseDivider) -> Self {
        Self {
            divider,
            lit: Some(target),
        }
    }
}

impl fmt::Display for LedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lit {
            Some(target) => write!(f, "Pulse {}: illumination {} ON", self.divider, target),
            None => write!(f, "Pulse {}: OFF", self.divider),
        }
    }
}

/// Line synchronization source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncMode {
    Internal,
    External,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => f.write_str("Internal synchronization"),
            Self::External => f.write_str("External synchronization"),
        }
    }
}

/// Built-in test pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestPattern {
    Stripe,
    Ramp,
}

impl FromStr for TestPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stripe" => Ok(Self::Stripe),
            "ramp" => Ok(Self::Ramp),
            _ => Err(Error::parse("test pattern", s, "stripe or ramp")),
        }
    }
}

impl fmt::Display for TestPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stripe => f.write_str("Stripe pattern output"),
            Self::Ramp => f.write_str("Ramp pattern output"),
        }
    }
}

/// What the sensor puts on the pixel output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputMode {
    Image,
    TestPattern,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => f.write_str("Image output"),
            Self::TestPattern => f.write_str("Test pattern output"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_frequency_from_mhz() {
        assert_eq!(Frequency::from_mhz(48.0).unwrap().tenths(), 480);
        assert_eq!(Frequency::from_mhz(50.7).unwrap().tenths(), 507);
        assert_eq!(Frequency::from_mhz(84.0).unwrap().to_string(), "84.0 MHz");
    }

    #[test]
    fn test_frequency_rejects_extra_precision() {
        assert!(Frequency::from_mhz(60.05).is_err());
        assert!(Frequency::from_mhz(f32::NAN).is_err());
        assert!(Frequency::from_mhz(-1.0).is_err());
    }

    #[test]
    fn test_resolution_conversion() {
        assert_eq!(Resolution::try_from(600).unwrap(), Resolution::Dpi600);
        assert_eq!(Resolution::try_from(75).unwrap().dpi(), 75);
        assert!(Resolution::try_from(100).is_err());
    }

    #[test]
    fn test_pulse_divider() {
        assert_eq!(PulseDivider::try_from(8).unwrap(), PulseDivider::Div8);
        assert!(PulseDivider::try_from(3).is_err());
        assert!(PulseDivider::try_from(0).is_err());
    }

    #[test]
    fn test_led_target_parse() {
        assert_eq!("ab".parse::<LedTarget>().unwrap(), LedTarget::AB);
        assert_eq!("B".parse::<LedTarget>().unwrap(), LedTarget::B);
        assert!("c".parse::<LedTarget>().is_err());
    }

    #[test]
    fn test_pixel_format_parts_parse() {
        assert_eq!("10".parse::<BitDepth>().unwrap(), BitDepth::Bits10);
        assert_eq!("Parallel".parse::<Interface>().unwrap(), Interface::Parallel);
        assert_eq!("medium".parse::<OutputConfig>().unwrap(), OutputConfig::Medium);
        assert!("12".parse::<BitDepth>().is_err());
    }

    #[test]
    fn test_errors_name_the_setting() {
        let err = PulseDivider::try_from(3).unwrap_err();
        assert_eq!(err.setting(), "pulse divider");
        assert_eq!(err.to_string(), "Invalid pulse divider: 3 is not one of 1, 2, 4 or 8");

        let err = Frequency::from_mhz(60.05).unwrap_err();
        assert_eq!(err.setting(), "frequency");
        assert!(err.to_string().starts_with("Invalid frequency: "));

        let err = "ramp2".parse::<TestPattern>().unwrap_err();
        assert_eq!(err.setting(), "test pattern");
        assert_eq!(
            err.to_string(),
            "Cannot parse test pattern from \"ramp2\", expected stripe or ramp"
        );
    }

    #[test]
    fn test_led_state_display() {
        let state = LedState::on(LedTarget::A, PulseDivider::Div2);
        assert_eq!(state.to_string(), "Pulse 1/2: illumination A ON");
        assert_eq!(LedState::OFF.to_string(), "Pulse 1/1: OFF");
    }
}
