//! # kd6rmx-core
//!
//! Core protocol implementation for KD6RMX contact image sensors.
//!
//! This crate provides the low-level protocol primitives:
//! - Register mnemonics
//! - Request/response frame encoding and decoding
//! - The register catalog (symbolic setting <-> parameter code tables)
//! - Protocol constants

pub mod catalog;
pub mod constants;
pub mod error;
pub mod frame;
pub mod register;

pub use catalog::Reading;
pub use error::{Error, Result};
pub use frame::{Parameter, Request, Response};
pub use register::Register;
