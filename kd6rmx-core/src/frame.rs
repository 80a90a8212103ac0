//! KD6RMX request/response frames and their encoding/decoding

use std::fmt;
use std::str::FromStr;

use byteorder::{BigEndian, ByteOrder};
use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    constants::{MIN_RESPONSE_LEN, TERMINATOR},
    error::{Error, Result},
    register::Register,
};

/// Request parameter: a non-empty, even-length, uppercase hex string
///
/// Only the constructors below can build one, so a request with an odd or
/// non-hex parameter cannot exist.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Parameter(String);

impl Parameter {
    /// Single byte parameter (`0x0D` -> `"0D"`)
    pub fn byte(value: u8) -> Self {
        Self(hex::encode_upper([value]))
    }

    /// Opcode byte followed by a 16-bit big-endian value
    ///
    /// # Examples
    ///
    /// ```
    /// use kd6rmx_core::Parameter;
    ///
    /// assert_eq!(Parameter::opcode_word(0x20, 500).as_str(), "2001F4");
    /// ```
    pub fn opcode_word(opcode: u8, value: u16) -> Self {
        let [hi, lo] = value.to_be_bytes();
        Self(hex::encode_upper([opcode, hi, lo]))
    }

    /// Parse a hex string, normalizing it to uppercase
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the string is empty, odd in length or not hex.
    pub fn parse(hex_str: &str) -> Result<Self> {
        if hex_str.is_empty() {
            return Err(Error::invalid("parameter must not be empty"));
        }

        hex::decode(hex_str)
            .map_err(|e| Error::invalid(format!("parameter {hex_str:?} is not valid hex: {e}")))?;

        Ok(Self(hex_str.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in hex characters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Parameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({})", self.0)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request frame
///
/// # Frame Structure
///
/// ```text
/// ┌─────────────┬──────────────────┬────────────┐
/// │  Register   │    Parameter     │ Terminator │
/// │ 2 ASCII ch  │ 2N hex ASCII ch  │    0x0D    │
/// └─────────────┴──────────────────┴────────────┘
/// ```
///
/// No escaping, no checksum.
///
/// # Examples
///
/// ```
/// use kd6rmx_core::{Parameter, Register, Request};
///
/// let request = Request::new(Register::OutputFrequency, Parameter::byte(0x0D));
/// assert_eq!(&request.encode()[..], b"OF0D\r");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub register: Register,
    pub parameter: Parameter,
}

impl Request {
    pub fn new(register: Register, parameter: Parameter) -> Self {
        Self {
            register,
            parameter,
        }
    }

    /// Read request for one field of a register
    pub fn read(register: Register, probe: u8) -> Self {
        Self::new(register, Parameter::byte(probe))
    }

    /// Encode request to wire bytes
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.size());

        buf.put_slice(self.register.mnemonic().as_bytes());
        buf.put_slice(self.parameter.as_str().as_bytes());
        buf.put_u8(TERMINATOR);

        buf.freeze()
    }

    /// Parse wire bytes back into a request
    ///
    /// # Errors
    ///
    /// `MalformedFrame` if the terminator or parameter is missing,
    /// `UnknownRegister` for an unknown mnemonic.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let body = strip_terminator(raw)?;

        if body.len() < 4 {
            return Err(Error::MalformedFrame(format!(
                "request {:?} has no parameter",
                String::from_utf8_lossy(raw)
            )));
        }

        let (mnemonic, param) = body.split_at(2);
        let register = Register::try_from(mnemonic)?;

        let param = std::str::from_utf8(param)
            .map_err(|_| Error::MalformedFrame("parameter is not ASCII".into()))?;
        let parameter = Parameter::parse(param)
            .map_err(|e| Error::MalformedFrame(e.to_string()))?;

        Ok(Self::new(register, parameter))
    }

    /// Total frame size in bytes
    pub fn size(&self) -> usize {
        2 + self.parameter.len() + 1
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.register, self.parameter)
    }
}

/// Response frame
///
/// ```text
/// ┌──────────────┬───────────────────┬────────────┐
/// │ Status/echo  │      Payload      │ Terminator │
/// │  2 hex ch    │ 2N hex ch (N ≥ 1) │    0x0D    │
/// └──────────────┴───────────────────┴────────────┘
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Response {
    hex: String,
    bytes: Vec<u8>,
}

impl Response {
    /// Decode a raw response frame
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the terminator is missing, or the body is odd in length or not hex
    ///   (`MalformedFrame`)
    /// - the body does not even hold a status byte (`ShortResponse`)
    ///
    /// # Examples
    ///
    /// ```
    /// use kd6rmx_core::Response;
    ///
    /// let response = Response::decode(b"000D\r").unwrap();
    /// assert_eq!(response.hex(), "000D");
    /// assert_eq!(response.status(), 0x00);
    /// ```
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let body = strip_terminator(raw)?;

        let bytes = hex::decode(body).map_err(|e| {
            Error::MalformedFrame(format!(
                "response {:?} is not hex: {}",
                String::from_utf8_lossy(body),
                e
            ))
        })?;

        let hex = String::from_utf8_lossy(body).to_ascii_uppercase();

        if bytes.is_empty() {
            return Err(Error::ShortResponse {
                expected: 2,
                actual: 0,
                response: hex,
            });
        }

        Ok(Self { hex, bytes })
    }

    /// Hex payload without terminator
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Length in hex characters
    pub fn len(&self) -> usize {
        self.hex.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hex.is_empty()
    }

    /// Status/echo byte
    pub fn status(&self) -> u8 {
        self.bytes[0]
    }

    /// First payload byte (the register value for most commands)
    pub fn value(&self) -> Result<u8> {
        self.ensure_min_len(MIN_RESPONSE_LEN)?;
        Ok(self.bytes[1])
    }

    /// Big-endian 16-bit value starting at byte `offset`
    pub fn word_at(&self, offset: usize) -> Result<u16> {
        self.ensure_min_len((offset + 2) * 2)?;
        Ok(BigEndian::read_u16(&self.bytes[offset..offset + 2]))
    }

    /// Fail with `ShortResponse` unless at least `min_hex_chars` were received
    pub fn ensure_min_len(&self, min_hex_chars: usize) -> Result<&Self> {
        if self.len() < min_hex_chars {
            return Err(Error::ShortResponse {
                expected: min_hex_chars,
                actual: self.len(),
                response: self.hex.clone(),
            });
        }
        Ok(self)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("hex", &self.hex)
            .field("status", &format!("0x{:02X}", self.status()))
            .finish()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for byte in &self.bytes {
            write!(f, "{sep}0x{byte:02X}")?;
            sep = " ";
        }
        Ok(())
    }
}

fn strip_terminator(raw: &[u8]) -> Result<&[u8]> {
    match raw.split_last() {
        Some((&TERMINATOR, body)) => Ok(body),
        _ => Err(Error::MalformedFrame(format!(
            "frame {:?} is missing the CR terminator",
            String::from_utf8_lossy(raw)
        ))),
    }
}
