//! Bitstring field descriptors and their builders.
//!
//! A descriptor says how one field of a bitstring is laid out: its type,
//! `unit` and `size` (the field is `unit * size` bits wide), the attributes
//! that modify encoding, and either a literal value or a variable
//! placeholder to be filled in by a match.
//!
//! The builders follow the source notation, so
//! `<<x::signed-integer-size(16), rest::binary>>` becomes
//!
//! ```text
//! vec![size(signed(integer(SegmentValue::var("x"))), 16), binary(SegmentValue::var("rest"))]
//! ```

use std::fmt;

use smallvec::SmallVec;

use super::BitString;
use crate::value::{Name, Value};

/// Declared type of a bitstring field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentType {
    Integer,
    Float,
    Binary,
    Utf8,
    Utf16,
    Utf32,
    Bitstring,
}

impl SegmentType {
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentType::Integer => "integer",
            SegmentType::Float => "float",
            SegmentType::Binary => "binary",
            SegmentType::Utf8 => "utf8",
            SegmentType::Utf16 => "utf16",
            SegmentType::Utf32 => "utf32",
            SegmentType::Bitstring => "bitstring",
        }
    }
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding attribute of a bitstring field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitAttr {
    Signed,
    Unsigned,
    Big,
    Little,
    Native,
}

/// Content of a field: a concrete value, or a variable to be bound.
#[derive(Clone, Debug, PartialEq)]
pub enum SegmentValue {
    Literal(Value),
    /// Placeholder. Named placeholders bind like pattern variables;
    /// `None` (or a name starting with `_`) binds anonymously.
    Variable(Option<Name>),
}

impl SegmentValue {
    pub fn var(name: impl Into<Name>) -> Self {
        SegmentValue::Variable(Some(name.into()))
    }

    pub fn placeholder() -> Self {
        SegmentValue::Variable(None)
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, SegmentValue::Variable(_))
    }

    pub fn literal(&self) -> Option<&Value> {
        match self {
            SegmentValue::Literal(value) => Some(value),
            SegmentValue::Variable(_) => None,
        }
    }
}

impl From<Value> for SegmentValue {
    fn from(value: Value) -> Self {
        SegmentValue::Literal(value)
    }
}

impl From<i64> for SegmentValue {
    fn from(n: i64) -> Self {
        SegmentValue::Literal(Value::int(n))
    }
}

impl From<i32> for SegmentValue {
    fn from(n: i32) -> Self {
        SegmentValue::Literal(Value::int(i64::from(n)))
    }
}

impl From<f64> for SegmentValue {
    fn from(f: f64) -> Self {
        SegmentValue::Literal(Value::float(f))
    }
}

impl From<&str> for SegmentValue {
    fn from(s: &str) -> Self {
        SegmentValue::Literal(Value::string(s))
    }
}

impl From<String> for SegmentValue {
    fn from(s: String) -> Self {
        SegmentValue::Literal(Value::string(s))
    }
}

impl From<BitString> for SegmentValue {
    fn from(bits: BitString) -> Self {
        SegmentValue::Literal(Value::BitString(bits))
    }
}

/// One field of a bitstring layout.
#[derive(Clone, Debug, PartialEq)]
pub struct BitSegment {
    pub kind: SegmentType,
    pub unit: u32,
    /// `None` for an unsized field, which only makes sense for a trailing
    /// variable-length placeholder.
    pub size: Option<u32>,
    /// Attributes in declaration order.
    pub attributes: SmallVec<[BitAttr; 2]>,
    pub value: SegmentValue,
}

fn len_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl BitSegment {
    /// Create a descriptor with the default unit and size for `kind`.
    ///
    /// Integers default to 8 bits and floats to 64. Binary and UTF fields
    /// count in bytes (unit 8) and are sized by their literal's encoded
    /// length; bitstring fields count in bits. Placeholders of the
    /// variable-length types start out unsized.
    pub fn new(kind: SegmentType, value: impl Into<SegmentValue>) -> Self {
        let value = value.into();
        let (unit, size) = match (kind, value.literal()) {
            (SegmentType::Integer, _) => (1, Some(8)),
            (SegmentType::Float, _) => (1, Some(64)),
            (SegmentType::Binary | SegmentType::Utf8, Some(Value::Str(s))) => {
                (8, Some(len_u32(s.len())))
            }
            (SegmentType::Binary | SegmentType::Utf8, Some(Value::BitString(b))) => {
                (8, Some(len_u32(b.byte_size())))
            }
            (SegmentType::Utf16, Some(Value::Str(s))) => {
                (8, Some(len_u32(s.encode_utf16().count() * 2)))
            }
            (SegmentType::Utf32, Some(Value::Str(s))) => (8, Some(len_u32(s.chars().count() * 4))),
            (SegmentType::Bitstring, Some(Value::BitString(b))) => {
                (1, Some(len_u32(b.bit_size())))
            }
            (SegmentType::Bitstring, Some(Value::Str(s))) => (1, Some(len_u32(s.len() * 8))),
            (SegmentType::Bitstring, _) => (1, None),
            (
                SegmentType::Binary | SegmentType::Utf8 | SegmentType::Utf16 | SegmentType::Utf32,
                _,
            ) => (8, None),
        };
        BitSegment {
            kind,
            unit,
            size,
            attributes: SmallVec::new(),
            value,
        }
    }

    #[must_use]
    pub fn with_attr(mut self, attr: BitAttr) -> Self {
        self.attributes.push(attr);
        self
    }

    #[must_use]
    pub fn signed(self) -> Self {
        self.with_attr(BitAttr::Signed)
    }

    #[must_use]
    pub fn unsigned(self) -> Self {
        self.with_attr(BitAttr::Unsigned)
    }

    #[must_use]
    pub fn big(self) -> Self {
        self.with_attr(BitAttr::Big)
    }

    #[must_use]
    pub fn little(self) -> Self {
        self.with_attr(BitAttr::Little)
    }

    #[must_use]
    pub fn native(self) -> Self {
        self.with_attr(BitAttr::Native)
    }

    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: u32) -> Self {
        self.unit = unit;
        self
    }

    pub fn has_attr(&self, attr: BitAttr) -> bool {
        self.attributes.contains(&attr)
    }

    pub fn is_signed(&self) -> bool {
        self.has_attr(BitAttr::Signed)
    }

    /// Width in bits, `unit * size`.
    pub fn bit_width(&self) -> Option<u64> {
        self.size.map(|size| u64::from(self.unit) * u64::from(size))
    }

    /// Width in whole bytes, `unit * size / 8`.
    pub fn byte_width(&self) -> Option<usize> {
        self.bit_width()
            .map(|bits| usize::try_from(bits / 8).unwrap_or(usize::MAX))
    }

    pub fn is_variable(&self) -> bool {
        self.value.is_variable()
    }
}

// Builders in the source notation.

pub fn integer(value: impl Into<SegmentValue>) -> BitSegment {
    BitSegment::new(SegmentType::Integer, value)
}

pub fn float(value: impl Into<SegmentValue>) -> BitSegment {
    BitSegment::new(SegmentType::Float, value)
}

pub fn binary(value: impl Into<SegmentValue>) -> BitSegment {
    BitSegment::new(SegmentType::Binary, value)
}

/// Alias of [`binary`].
pub fn bytes(value: impl Into<SegmentValue>) -> BitSegment {
    binary(value)
}

pub fn utf8(value: impl Into<SegmentValue>) -> BitSegment {
    BitSegment::new(SegmentType::Utf8, value)
}

pub fn utf16(value: impl Into<SegmentValue>) -> BitSegment {
    BitSegment::new(SegmentType::Utf16, value)
}

pub fn utf32(value: impl Into<SegmentValue>) -> BitSegment {
    BitSegment::new(SegmentType::Utf32, value)
}

pub fn bitstring(value: impl Into<SegmentValue>) -> BitSegment {
    BitSegment::new(SegmentType::Bitstring, value)
}

/// Alias of [`bitstring`].
pub fn bits(value: impl Into<SegmentValue>) -> BitSegment {
    bitstring(value)
}

pub fn signed(segment: BitSegment) -> BitSegment {
    segment.signed()
}

pub fn unsigned(segment: BitSegment) -> BitSegment {
    segment.unsigned()
}

pub fn big(segment: BitSegment) -> BitSegment {
    segment.big()
}

pub fn little(segment: BitSegment) -> BitSegment {
    segment.little()
}

pub fn native(segment: BitSegment) -> BitSegment {
    segment.native()
}

pub fn size(segment: BitSegment, count: u32) -> BitSegment {
    segment.size(count)
}

pub fn unit(segment: BitSegment, count: u32) -> BitSegment {
    segment.unit(count)
}
