//! Protocol constants

use std::time::Duration;

/// Frame terminator (carriage return)
pub const TERMINATOR: u8 = b'\r';

/// Time budget for a complete response (seconds)
pub const RESPONSE_TIMEOUT_SECS: u64 = 10;

/// Time budget for a complete response
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(RESPONSE_TIMEOUT_SECS);

/// Factory default baud rate of the control port
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Status byte the device returns for an accepted command
pub const STATUS_OK: u8 = 0x00;

/// Minimum response length in hex characters (status byte + one payload byte)
pub const MIN_RESPONSE_LEN: usize = 4;

/// Time the device needs to come back after the first phase of a software reset
pub const RESET_SETTLE: Duration = Duration::from_secs(10);

/// Parameter bytes that select what a read request reports
pub mod probes {
    /// Primary setting of the register
    pub const PRIMARY: u8 = 0x80;
    
    /// Secondary field (overlap, LED period A, test pattern type)
    pub const SECONDARY: u8 = 0xA0;
    
    /// Tertiary field (interpolation, LED period B)
    pub const TERTIARY: u8 = 0xC0;
    
    /// LED period setting
    pub const PERIOD_SETTING: u8 = 0xE0;
}

/// Fixed opcodes shared by several registers
pub mod opcodes {
    /// Switch a function off
    pub const OFF: u8 = 0x00;
    
    /// Switch a function on
    pub const ON: u8 = 0x01;
    
    /// Run a correction / begin a reset
    pub const EXECUTE: u8 = 0x21;
    
    /// Preset save flag, OR-ed with the preset number
    pub const SAVE_PRESET: u8 = 0x80;
    
    /// LED A duty cycle selector
    pub const DUTY_A: u8 = 0x20;
    
    /// LED B duty cycle selector
    pub const DUTY_B: u8 = 0x40;
    
    /// White correction target selector
    pub const WHITE_TARGET: u8 = 0x40;
    
    /// Positive gain range
    pub const GAIN_POSITIVE: u8 = 0x20;
    
    /// Negative gain range
    pub const GAIN_NEGATIVE: u8 = 0x21;
    
    /// Internal sync with clock value
    pub const SYNC_INTERNAL: u8 = 0x00;
    
    /// External sync
    pub const SYNC_EXTERNAL: u8 = 0x01;
}
