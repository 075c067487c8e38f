//! Encoding literal field descriptors into bytes.

use super::{BitAttr, BitSegment, SegmentType, SegmentValue};
use crate::errors::{segment_type_mismatch, BitstringError};
use crate::value::Value;

/// Encode one literal field descriptor.
///
/// Attributes are applied in declaration order after the type-specific
/// encoding: `little` reverses the field's bytes, the others leave them as
/// they are (integers are already written in two's complement, which is the
/// byte-level meaning of both `signed` and `unsigned`).
pub fn encode_segment(segment: &BitSegment) -> Result<Vec<u8>, BitstringError> {
    let value = match &segment.value {
        SegmentValue::Literal(value) => value,
        SegmentValue::Variable(_) => return Err(BitstringError::UnboundSegment),
    };

    let mut bytes = match segment.kind {
        SegmentType::Integer => encode_integer(segment, value)?,
        SegmentType::Float => encode_float(segment, value)?,
        SegmentType::Binary | SegmentType::Utf8 | SegmentType::Bitstring => match value {
            Value::Str(s) => s.as_bytes().to_vec(),
            Value::BitString(b) => b.as_bytes().to_vec(),
            other => return Err(segment_type_mismatch(segment.kind, other)),
        },
        SegmentType::Utf16 => match value {
            Value::Str(s) => s.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            other => return Err(segment_type_mismatch(segment.kind, other)),
        },
        SegmentType::Utf32 => match value {
            Value::Str(s) => s.chars().flat_map(|c| u32::from(c).to_be_bytes()).collect(),
            other => return Err(segment_type_mismatch(segment.kind, other)),
        },
    };

    for attr in &segment.attributes {
        match attr {
            BitAttr::Little => bytes.reverse(),
            BitAttr::Signed | BitAttr::Unsigned | BitAttr::Big | BitAttr::Native => {}
        }
    }

    Ok(bytes)
}

/// Big-endian two's complement over the field's byte width.
fn encode_integer(segment: &BitSegment, value: &Value) -> Result<Vec<u8>, BitstringError> {
    let Value::Int(n) = value else {
        return Err(segment_type_mismatch(segment.kind, value));
    };
    let width = segment.byte_width().unwrap_or(1);
    let full = n.to_be_bytes();

    if width <= full.len() {
        Ok(full[full.len() - width..].to_vec())
    } else {
        let fill = if *n < 0 { 0xff } else { 0x00 };
        let mut out = vec![fill; width - full.len()];
        out.extend_from_slice(&full);
        Ok(out)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "32-bit float fields store the value at single precision"
)]
fn encode_float(segment: &BitSegment, value: &Value) -> Result<Vec<u8>, BitstringError> {
    let Some(f) = value.as_float() else {
        return Err(segment_type_mismatch(segment.kind, value));
    };
    match segment.bit_width() {
        Some(64) => Ok(f.to_be_bytes().to_vec()),
        Some(32) => Ok((f as f32).to_be_bytes().to_vec()),
        other => Err(BitstringError::InvalidSize {
            bits: other.unwrap_or(0),
        }),
    }
}
