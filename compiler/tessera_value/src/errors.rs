//! Errors raised while building bitstrings.

use crate::bitstring::SegmentType;
use crate::value::Value;

/// A bitstring descriptor that cannot be encoded.
///
/// These are programming errors in a layout definition, not match failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BitstringError {
    /// A float field declared a width other than 32 or 64 bits.
    #[error("invalid size for float: {bits} bits (expected 32 or 64)")]
    InvalidSize { bits: u64 },

    /// A variable placeholder was handed to the encoder.
    #[error("cannot encode a variable segment into a bitstring")]
    UnboundSegment,

    /// The literal does not fit the declared field type.
    #[error("{segment} segment cannot hold a value of type {found}")]
    SegmentTypeMismatch {
        segment: SegmentType,
        found: &'static str,
    },
}

#[cold]
pub fn segment_type_mismatch(segment: SegmentType, value: &Value) -> BitstringError {
    BitstringError::SegmentTypeMismatch {
        segment,
        found: value.type_name(),
    }
}

#[cfg(test)]
mod tests;
