//! KD6RMX register mnemonics

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Device registers
///
/// Every request starts with one of these two-letter mnemonics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Register {
    /// `BR` control port baud rate
    CommunicationSpeed,

    /// `OF` pixel output frequency
    OutputFrequency,

    /// `OC` output configuration (pixel format, overlap, interpolation)
    OutputConfig,

    /// `RC` resolution
    Resolution,

    /// `SS` sync select
    SyncSelect,

    /// `DT` preset load/save
    DataTransfer,

    /// `LC` LED control and duty cycle
    LedControl,

    /// `DC` dark (black) correction
    DarkCorrection,

    /// `WC` white correction
    WhiteCorrection,

    /// `PG` programmable gain amplifier
    Gain,

    /// `TP` test pattern
    TestPattern,

    /// `SR` software reset
    SoftwareReset,
}

impl Register {
    /// All registers, in protocol manual order
    pub const ALL: [Register; 12] = [
        Self::CommunicationSpeed,
        Self::OutputFrequency,
        Self::OutputConfig,
        Self::Resolution,
        Self::SyncSelect,
        Self::DataTransfer,
        Self::LedControl,
        Self::DarkCorrection,
        Self::WhiteCorrection,
        Self::Gain,
        Self::TestPattern,
        Self::SoftwareReset,
    ];

    /// Two-letter wire mnemonic
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::CommunicationSpeed => "BR",
            Self::OutputFrequency => "OF",
            Self::OutputConfig => "OC",
            Self::Resolution => "RC",
            Self::SyncSelect => "SS",
            Self::DataTransfer => "DT",
            Self::LedControl => "LC",
            Self::DarkCorrection => "DC",
            Self::WhiteCorrection => "WC",
            Self::Gain => "PG",
            Self::TestPattern => "TP",
            Self::SoftwareReset => "SR",
        }
    }

    /// Check if the register reports its state on a read probe
    pub fn is_readable(self) -> bool {
        !matches!(self, Self::DataTransfer | Self::Gain | Self::SoftwareReset)
    }
}

impl TryFrom<&[u8]> for Register {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        match value {
            b"BR" => Ok(Self::CommunicationSpeed),
            b"OF" => Ok(Self::OutputFrequency),
            b"OC" => Ok(Self::OutputConfig),
            b"RC" => Ok(Self::Resolution),
            b"SS" => Ok(Self::SyncSelect),
            b"DT" => Ok(Self::DataTransfer),
            b"LC" => Ok(Self::LedControl),
            b"DC" => Ok(Self::DarkCorrection),
            b"WC" => Ok(Self::WhiteCorrection),
            b"PG" => Ok(Self::Gain),
            b"TP" => Ok(Self::TestPattern),
            b"SR" => Ok(Self::SoftwareReset),
            _ => Err(Error::UnknownRegister(
                String::from_utf8_lossy(value).into_owned(),
            )),
        }
    }
}

impl FromStr for Register {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(s.to_ascii_uppercase().as_bytes())
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
