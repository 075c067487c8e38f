//! Bitstring pattern decoding.
//!
//! A bitstring pattern is an ordered list of field descriptors. Literal
//! fields are encoded once, at compile time, fitted to their declared size
//! (cut short or zero-padded) and compared byte for byte;
//! placeholder fields are sliced out of the candidate and decoded by their
//! declared type.
//!
//! # Layout
//!
//! Fields are walked left to right over the candidate's bytes. Every field
//! but the last takes exactly `unit * size / 8` bytes. The last field takes
//! whatever remains, which is what lets `rest::binary` capture the tail.
//! An unsized placeholder anywhere else cannot be laid out and is rejected
//! when the pattern is compiled.
//!
//! # Decoding
//!
//! | Type | Decoded as |
//! |------|------------|
//! | `integer` | the leading `unit * size / 8` bytes (1 to 8), big-endian, sign-extended if `signed` |
//! | `float` | the leading 4 or 8 bytes as IEEE-754; any other width fails |
//! | `binary` | a string when the bytes are valid UTF-8, a bitstring otherwise |
//! | `utf8` | a string; invalid UTF-8 fails |
//! | `utf16`, `utf32` | fixed-width big-endian code units, unpaired or invalid units become U+FFFD |
//! | `bitstring` | the raw bytes |
//!
//! `little` reverses a field's bytes before decoding, mirroring the encoder.

use std::borrow::Cow;

use tessera_value::{
    bitstring::encode_segment, BitAttr, BitSegment, BitString, SegmentType, SegmentValue, Value,
};

use crate::bindings::Bindings;
use crate::errors::{unsized_binary_not_last, unsized_generator_segment, PatternError};

#[derive(Clone, Debug)]
struct Field {
    segment: BitSegment,
    /// Encoded bytes of a literal field; `None` for placeholders.
    literal: Option<Vec<u8>>,
    /// Byte width, `None` only for a trailing unsized placeholder.
    width: Option<usize>,
}

/// Compiled bitstring pattern.
#[derive(Clone, Debug)]
pub struct BitstringPattern {
    fields: Vec<Field>,
}

impl BitstringPattern {
    /// Encode the literal fields and check that only the last field is
    /// unsized.
    pub fn new(segments: &[BitSegment]) -> Result<Self, PatternError> {
        let last = segments.len().saturating_sub(1);
        let mut fields = Vec::with_capacity(segments.len());

        for (index, segment) in segments.iter().enumerate() {
            let field = if segment.is_variable() {
                let width = segment.byte_width();
                if width.is_none() && index < last {
                    return Err(unsized_binary_not_last(index));
                }
                Field {
                    segment: segment.clone(),
                    literal: None,
                    width,
                }
            } else {
                let mut bytes = encode_segment(segment)?;
                let width = segment.byte_width().unwrap_or(bytes.len());
                // A declared size wins over the literal's own length.
                bytes.resize(width, 0);
                Field {
                    segment: segment.clone(),
                    width: Some(width),
                    literal: Some(bytes),
                }
            };
            fields.push(field);
        }

        Ok(BitstringPattern { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total width in bytes, if every field is sized.
    pub fn byte_size(&self) -> Option<usize> {
        self.fields.iter().map(|f| f.width).sum()
    }

    /// Total width in bytes, failing on the first unsized field.
    pub fn sized_byte_size(&self) -> Result<usize, PatternError> {
        let mut total = 0usize;
        for (index, field) in self.fields.iter().enumerate() {
            let width = field.width.ok_or_else(|| unsized_generator_segment(index))?;
            total = total.saturating_add(width);
        }
        Ok(total)
    }

    /// Match a string (as its UTF-8 bytes) or a bitstring, appending one
    /// binding per placeholder field.
    pub fn matches(&self, value: &Value, bindings: &mut Bindings) -> bool {
        let bytes = match value {
            Value::Str(s) => s.as_bytes(),
            Value::BitString(bits) => bits.as_bytes(),
            _ => return false,
        };

        let Some(last) = self.fields.len().checked_sub(1) else {
            return bytes.is_empty();
        };

        let mut offset = 0usize;
        for (index, field) in self.fields.iter().enumerate() {
            let rest = bytes.get(offset..).unwrap_or_default();
            let slice = if index == last {
                rest
            } else {
                let width = field.width.unwrap_or_default();
                match rest.get(..width) {
                    Some(slice) => slice,
                    None => return false,
                }
            };

            match &field.literal {
                Some(expected) => {
                    if slice != expected.as_slice() {
                        return false;
                    }
                }
                None => {
                    let Some(decoded) = decode(&field.segment, slice) else {
                        tracing::trace!(
                            index,
                            kind = %field.segment.kind,
                            len = slice.len(),
                            "bitstring field failed to decode"
                        );
                        return false;
                    };
                    match &field.segment.value {
                        SegmentValue::Variable(Some(name)) => bindings.push_named(name, decoded),
                        _ => bindings.push(decoded),
                    }
                }
            }

            offset += slice.len();
        }

        true
    }
}

/// Apply the field's `little` attributes to its raw bytes.
fn oriented<'a>(segment: &BitSegment, raw: &'a [u8]) -> Cow<'a, [u8]> {
    let flips = segment
        .attributes
        .iter()
        .filter(|attr| **attr == BitAttr::Little)
        .count();
    if flips % 2 == 1 {
        let mut owned = raw.to_vec();
        owned.reverse();
        Cow::Owned(owned)
    } else {
        Cow::Borrowed(raw)
    }
}

fn decode(segment: &BitSegment, slice: &[u8]) -> Option<Value> {
    match segment.kind {
        SegmentType::Integer => decode_integer(segment, slice),
        SegmentType::Float => decode_float(segment, slice),
        SegmentType::Bitstring => Some(Value::BitString(BitString::from(
            oriented(segment, slice).as_ref(),
        ))),
        SegmentType::Binary => {
            let bytes = oriented(segment, slice);
            Some(match std::str::from_utf8(&bytes) {
                Ok(s) => Value::string(s),
                Err(_) => Value::BitString(BitString::from(bytes.as_ref())),
            })
        }
        SegmentType::Utf8 => {
            let bytes = oriented(segment, slice);
            std::str::from_utf8(&bytes).ok().map(Value::string)
        }
        SegmentType::Utf16 => {
            let bytes = oriented(segment, slice);
            decode_units(&bytes, 2).map(Value::string)
        }
        SegmentType::Utf32 => {
            let bytes = oriented(segment, slice);
            decode_units(&bytes, 4).map(Value::string)
        }
    }
}

fn decode_integer(segment: &BitSegment, slice: &[u8]) -> Option<Value> {
    let width = segment.byte_width()?;
    if width == 0 || width > 8 {
        return None;
    }
    let raw = slice.get(..width)?;
    let bytes = oriented(segment, raw);

    let negative = segment.is_signed() && bytes.first().is_some_and(|b| b & 0x80 != 0);
    let mut buf = if negative { [0xff; 8] } else { [0u8; 8] };
    buf[8 - width..].copy_from_slice(&bytes);
    Some(Value::int(i64::from_be_bytes(buf)))
}

fn decode_float(segment: &BitSegment, slice: &[u8]) -> Option<Value> {
    match segment.byte_width()? {
        8 => {
            let bytes = oriented(segment, slice.get(..8)?);
            let arr: [u8; 8] = bytes.as_ref().try_into().ok()?;
            Some(Value::float(f64::from_be_bytes(arr)))
        }
        4 => {
            let bytes = oriented(segment, slice.get(..4)?);
            let arr: [u8; 4] = bytes.as_ref().try_into().ok()?;
            Some(Value::float(f64::from(f32::from_be_bytes(arr))))
        }
        _ => None,
    }
}

/// Decode fixed-width big-endian code units of 2 or 4 bytes.
fn decode_units(bytes: &[u8], unit: usize) -> Option<String> {
    if bytes.len() % unit != 0 {
        return None;
    }
    let text = bytes
        .chunks_exact(unit)
        .map(|chunk| {
            let code = chunk
                .iter()
                .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte));
            char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect();
    Some(text)
}

#[cfg(test)]
mod tests;
