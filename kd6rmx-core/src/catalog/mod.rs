//! Register catalog
//!
//! Maps symbolic settings to the parameter codes the KD6RMX firmware expects,
//! and back. Each mapping is one `(value, code)` table consulted in both
//! directions, so decoding is always the exact inverse of encoding and an
//! unknown code fails instead of falling back to a default.

mod decode;
mod encode;

pub use decode::{accepts_probe, check_probe, decode, read_probes, verify_preset_echo, Reading};
pub use encode::*;

use kd6rmx_types::{
    BaudRate, BitDepth, Frequency, Interface, LedTarget, OutputConfig, OutputMode, PixelFormat,
    PulseDivider, Resolution, SyncMode, TestPattern,
};

/// Output frequencies (tenths of MHz) and their `OF` codes
pub const FREQUENCIES: [(Frequency, u8); 29] = [
    (Frequency::from_tenths(480), 0x00),
    (Frequency::from_tenths(507), 0x01),
    (Frequency::from_tenths(510), 0x02),
    (Frequency::from_tenths(514), 0x03),
    (Frequency::from_tenths(520), 0x04),
    (Frequency::from_tenths(528), 0x05),
    (Frequency::from_tenths(533), 0x06),
    (Frequency::from_tenths(540), 0x07),
    (Frequency::from_tenths(549), 0x08),
    (Frequency::from_tenths(560), 0x09),
    (Frequency::from_tenths(570), 0x0A),
    (Frequency::from_tenths(576), 0x0B),
    (Frequency::from_tenths(583), 0x0C),
    (Frequency::from_tenths(600), 0x0D),
    (Frequency::from_tenths(617), 0x0E),
    (Frequency::from_tenths(624), 0x0F),
    (Frequency::from_tenths(640), 0x10),
    (Frequency::from_tenths(651), 0x11),
    (Frequency::from_tenths(660), 0x12),
    (Frequency::from_tenths(672), 0x13),
    (Frequency::from_tenths(680), 0x14),
    (Frequency::from_tenths(686), 0x15),
    (Frequency::from_tenths(720), 0x16),
    (Frequency::from_tenths(760), 0x17),
    (Frequency::from_tenths(768), 0x18),
    (Frequency::from_tenths(780), 0x19),
    (Frequency::from_tenths(800), 0x1A),
    (Frequency::from_tenths(816), 0x1B),
    (Frequency::from_tenths(840), 0x1C),
];

/// `BR` codes
pub const BAUD_RATES: [(BaudRate, u8); 3] = [
    (BaudRate::B9600, 0x00),
    (BaudRate::B19200, 0x01),
    (BaudRate::B115200, 0x02),
];

/// `RC` codes
pub const RESOLUTIONS: [(Resolution, u8); 4] = [
    (Resolution::Dpi600, 0x00),
    (Resolution::Dpi300, 0x01),
    (Resolution::Dpi150, 0x02),
    (Resolution::Dpi75, 0x03),
];

/// `OC` pixel output format codes
///
/// The base configuration only exists with one channel.
pub const PIXEL_FORMATS: [(PixelFormat, u8); 16] = {
    use BitDepth::*;
    use Interface::*;
    use OutputConfig::*;

    [
        (PixelFormat::new(Bits10, Serial, Base, 1), 0x00),
        (PixelFormat::new(Bits10, Serial, Medium, 1), 0x01),
        (PixelFormat::new(Bits10, Serial, Medium, 2), 0x02),
        (PixelFormat::new(Bits10, Serial, Medium, 3), 0x03),
        (PixelFormat::new(Bits10, Parallel, Base, 1), 0x04),
        (PixelFormat::new(Bits10, Parallel, Medium, 1), 0x05),
        (PixelFormat::new(Bits10, Parallel, Medium, 2), 0x06),
        (PixelFormat::new(Bits10, Parallel, Medium, 3), 0x07),
        (PixelFormat::new(Bits8, Serial, Base, 1), 0x08),
        (PixelFormat::new(Bits8, Serial, Medium, 1), 0x09),
        (PixelFormat::new(Bits8, Serial, Medium, 2), 0x0A),
        (PixelFormat::new(Bits8, Serial, Medium, 3), 0x0B),
        (PixelFormat::new(Bits8, Parallel, Base, 1), 0x0C),
        (PixelFormat::new(Bits8, Parallel, Medium, 1), 0x0D),
        (PixelFormat::new(Bits8, Parallel, Medium, 2), 0x0E),
        (PixelFormat::new(Bits8, Parallel, Medium, 3), 0x0F),
    ]
};

/// LED target bits of the `LC` state byte
pub const LED_TARGETS: [(LedTarget, u8); 3] = [
    (LedTarget::A, 0b01),
    (LedTarget::B, 0b10),
    (LedTarget::AB, 0b11),
];

/// Pulse index (log2 of the divider) of the `LC` state byte
pub const PULSE_DIVIDERS: [(PulseDivider, u8); 4] = [
    (PulseDivider::Div1, 0),
    (PulseDivider::Div2, 1),
    (PulseDivider::Div4, 2),
    (PulseDivider::Div8, 3),
];

/// `SS` codes
pub const SYNC_MODES: [(SyncMode, u8); 2] = [
    (SyncMode::Internal, 0x00),
    (SyncMode::External, 0x01),
];

/// `TP` pattern codes
pub const TEST_PATTERNS: [(TestPattern, u8); 2] = [
    (TestPattern::Stripe, 0x20),
    (TestPattern::Ramp, 0x21),
];

/// `TP` output mode codes
pub const OUTPUT_MODES: [(OutputMode, u8); 2] = [
    (OutputMode::Image, 0x00),
    (OutputMode::TestPattern, 0x01),
];

/// Plain on/off switch (`DC`, `WC`, `PG`)
pub const SWITCH: [(bool, u8); 2] = [(false, 0x00), (true, 0x01)];

/// `OC` pixel overlap switch
pub const OVERLAP: [(bool, u8); 2] = [(false, 0x20), (true, 0x21)];

/// `OC` pixel interpolation switch
pub const INTERPOLATION: [(bool, u8); 2] = [(false, 0x40), (true, 0x41)];

/// Code of `value` in `table`
pub fn code_of<T: PartialEq>(table: &[(T, u8)], value: &T) -> Option<u8> {
    table
        .iter()
        .find(|(candidate, _)| candidate == value)
        .map(|&(_, code)| code)
}

/// Value of `code` in `table`
pub fn value_of<T: Copy>(table: &[(T, u8)], code: u8) -> Option<T> {
    table
        .iter()
        .find(|&&(_, candidate)| candidate == code)
        .map(|&(value, _)| value)
}
