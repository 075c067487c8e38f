//! Tessera Value - runtime values for the Tessera pattern engine.
//!
//! This crate provides:
//! - The runtime `Value` model matched by patterns (`Value`, `Heap`, `Name`,
//!   `ObjectValue`, `FunctionValue`)
//! - Bitstrings and their typed field descriptors, with the encoder that
//!   turns literal descriptors into bytes
//! - `IdGenerator`, an explicit counter for PID and reference values

pub mod bitstring;
mod errors;
mod identity;
mod value;

pub use bitstring::{BitAttr, BitSegment, BitString, SegmentType, SegmentValue};
pub use errors::{segment_type_mismatch, BitstringError};
pub use identity::IdGenerator;
pub use value::{FunctionValue, Heap, Name, NativeFn, ObjectValue, Value};
