//! Bitstrings: immutable packed byte sequences.
//!
//! A `BitString` is built either from raw bytes or by encoding an ordered
//! list of typed field descriptors (`BitSegment`). The engine works at byte
//! granularity: every field occupies `unit * size / 8` whole bytes.

mod encode;
mod segment;

use std::fmt;
use std::sync::Arc;

use crate::errors::BitstringError;

pub use encode::encode_segment;
pub use segment::{
    big, binary, bits, bitstring, bytes, float, integer, little, native, signed, size, unit,
    unsigned, utf16, utf32, utf8, BitAttr, BitSegment, SegmentType, SegmentValue,
};

/// Immutable flat byte sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitString {
    bytes: Arc<[u8]>,
}

impl BitString {
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        BitString {
            bytes: bytes.into(),
        }
    }

    pub fn empty() -> Self {
        BitString::from_bytes(Vec::<u8>::new())
    }

    /// Encode literal field descriptors, in order, into one bitstring.
    ///
    /// Fails if any descriptor is a variable placeholder or cannot be
    /// encoded (for example a float of unsupported width).
    pub fn from_segments(segments: &[BitSegment]) -> Result<Self, BitstringError> {
        let mut out = Vec::new();
        for segment in segments {
            out.extend(encode_segment(segment)?);
        }
        Ok(Self::from_bytes(out))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn byte_size(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn bit_size(&self) -> usize {
        self.bytes.len() * 8
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// Copy out the bytes in `start..end`, clamped to the bitstring's
    /// bounds. `None` for `end` means "to the end".
    pub fn slice(&self, start: usize, end: Option<usize>) -> BitString {
        let len = self.bytes.len();
        let end = end.map_or(len, |e| e.min(len));
        let start = start.min(end);
        BitString::from_bytes(&self.bytes[start..end])
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bytes.iter().copied()
    }
}

impl Default for BitString {
    fn default() -> Self {
        BitString::empty()
    }
}

impl From<Vec<u8>> for BitString {
    fn from(bytes: Vec<u8>) -> Self {
        BitString::from_bytes(bytes)
    }
}

impl From<&[u8]> for BitString {
    fn from(bytes: &[u8]) -> Self {
        BitString::from_bytes(bytes)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<<")?;
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{byte}")?;
        }
        write!(f, ">>")
    }
}
