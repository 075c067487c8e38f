use super::*;
use pretty_assertions::assert_eq;
use tessera_value::bitstring::{
    binary, bitstring, float, integer, little, signed, size, utf16, utf32, utf8,
};
use tessera_value::BitstringError;

fn var(name: &str) -> SegmentValue {
    SegmentValue::var(name)
}

fn decode_all(fields: &[BitSegment], value: &Value) -> Option<Vec<Value>> {
    let pattern = BitstringPattern::new(fields).ok()?;
    let mut bindings = Bindings::new();
    if !pattern.matches(value, &mut bindings) {
        return None;
    }
    bindings.resolve().ok().map(|r| r.into_values())
}

fn bits(bytes: &[u8]) -> Value {
    Value::BitString(BitString::from(bytes))
}

#[test]
fn unsigned_and_signed_bytes() {
    let candidate = bits(&[200]);
    assert_eq!(
        decode_all(&[integer(var("n"))], &candidate),
        Some(vec![Value::int(200)])
    );
    assert_eq!(
        decode_all(&[signed(integer(var("n")))], &candidate),
        Some(vec![Value::int(-56)])
    );
}

#[test]
fn wide_integers_honour_endianness_and_sign() {
    let candidate = bits(&[0xff, 0xfe]);
    assert_eq!(
        decode_all(&[size(integer(var("n")), 16)], &candidate),
        Some(vec![Value::int(0xfffe)])
    );
    assert_eq!(
        decode_all(&[size(signed(integer(var("n"))), 16)], &candidate),
        Some(vec![Value::int(-2)])
    );
    assert_eq!(
        decode_all(&[little(size(integer(var("n")), 16))], &candidate),
        Some(vec![Value::int(0xfeff)])
    );
}

#[test]
fn literal_fields_must_match_exactly() {
    let fields = [integer(1), integer(var("x")), binary(var("rest"))];
    assert_eq!(
        decode_all(&fields, &bits(&[1, 9, b'h', b'i'])),
        Some(vec![Value::int(9), Value::string("hi")])
    );
    assert_eq!(decode_all(&fields, &bits(&[2, 9, b'h', b'i'])), None);
}

#[test]
fn sized_literal_compares_only_its_declared_width() {
    let fields = [size(binary("abc"), 2), integer(var("n"))];
    assert_eq!(decode_all(&fields, &bits(b"ab\x05")), Some(vec![Value::int(5)]));
    assert_eq!(decode_all(&fields, &bits(b"abc\x05")), None);
    assert_eq!(decode_all(&fields, &bits(b"ax\x05")), None);

    let padded = [size(binary("a"), 3), integer(var("n"))];
    assert_eq!(decode_all(&padded, &bits(b"a\0\0\x07")), Some(vec![Value::int(7)]));
}

#[test]
fn last_field_takes_the_rest() {
    let fields = [binary("GET "), binary(var("path"))];
    assert_eq!(
        decode_all(&fields, &Value::string("GET /index.html")),
        Some(vec![Value::string("/index.html")])
    );
    assert_eq!(
        decode_all(&fields, &Value::string("GET ")),
        Some(vec![Value::string("")])
    );
}

#[test]
fn trailing_literal_rejects_extra_bytes() {
    let fields = [integer(var("x")), binary("ok")];
    assert_eq!(
        decode_all(&fields, &bits(&[7, b'o', b'k'])),
        Some(vec![Value::int(7)])
    );
    assert_eq!(decode_all(&fields, &bits(&[7, b'o', b'k', b'!'])), None);
}

#[test]
fn short_candidate_fails() {
    let fields = [size(integer(var("a")), 16), integer(var("b"))];
    assert_eq!(decode_all(&fields, &bits(&[1])), None);
    assert_eq!(decode_all(&[integer(var("a"))], &bits(&[])), None);
}

#[test]
fn floats_decode_from_four_or_eight_bytes() {
    let double = bits(&1.5f64.to_be_bytes());
    assert_eq!(
        decode_all(&[float(var("f"))], &double),
        Some(vec![Value::float(1.5)])
    );

    let single = bits(&2.5f32.to_be_bytes());
    assert_eq!(
        decode_all(&[size(float(var("f")), 32)], &single),
        Some(vec![Value::float(2.5)])
    );

    assert_eq!(decode_all(&[size(float(var("f")), 16)], &bits(&[0, 0])), None);
}

#[test]
fn float_literal_with_bad_width_is_a_compile_error() {
    let err = BitstringPattern::new(&[size(float(1.0), 16)]);
    assert!(matches!(
        err,
        Err(PatternError::Bitstring(BitstringError::InvalidSize { bits: 16 }))
    ));
}

#[test]
fn unsized_placeholder_must_be_last() {
    let err = BitstringPattern::new(&[binary(var("head")), integer(var("x"))]);
    assert!(matches!(
        err,
        Err(PatternError::UnsizedBinaryNotLast { index: 0 })
    ));

    assert!(BitstringPattern::new(&[integer(var("x")), binary(var("rest"))]).is_ok());
}

#[test]
fn binary_falls_back_to_bitstring_for_invalid_utf8() {
    assert_eq!(
        decode_all(&[binary(var("b"))], &bits(&[0xff, 0x00])),
        Some(vec![bits(&[0xff, 0x00])])
    );
    assert_eq!(decode_all(&[utf8(var("s"))], &bits(&[0xff])), None);
}

#[test]
fn utf16_and_utf32_are_fixed_width() {
    assert_eq!(
        decode_all(&[utf16(var("s"))], &bits(&[0, b'h', 0, b'i'])),
        Some(vec![Value::string("hi")])
    );
    assert_eq!(
        decode_all(&[utf32(var("s"))], &bits(&[0, 0, 0x20, 0xac])),
        Some(vec![Value::string("€")])
    );
    // A lone surrogate decodes to the replacement character.
    assert_eq!(
        decode_all(&[utf16(var("s"))], &bits(&[0xd8, 0x3d])),
        Some(vec![Value::string("\u{fffd}")])
    );
    assert_eq!(decode_all(&[utf16(var("s"))], &bits(&[0])), None);
}

#[test]
fn bitstring_placeholder_keeps_raw_bytes() {
    let fields = [integer(var("tag")), bitstring(var("body"))];
    assert_eq!(
        decode_all(&fields, &bits(&[1, 2, 3])),
        Some(vec![Value::int(1), bits(&[2, 3])])
    );
}

#[test]
fn only_strings_and_bitstrings_are_candidates() {
    assert_eq!(decode_all(&[integer(var("x"))], &Value::int(1)), None);
    assert_eq!(
        decode_all(&[integer(var("x"))], &Value::list(vec![Value::int(1)])),
        None
    );
}

#[test]
fn empty_pattern_matches_only_empty_input() {
    assert_eq!(decode_all(&[], &bits(&[])), Some(vec![]));
    assert_eq!(decode_all(&[], &Value::string("")), Some(vec![]));
    assert_eq!(decode_all(&[], &bits(&[1])), None);
}

#[test]
fn repeated_placeholder_names_must_agree() {
    let fields = [integer(var("x")), integer(var("x"))];
    assert_eq!(
        decode_all(&fields, &bits(&[4, 4])),
        Some(vec![Value::int(4), Value::int(4)])
    );
    assert_eq!(decode_all(&fields, &bits(&[4, 5])), None);
}

#[test]
fn byte_size_needs_every_field_sized() {
    let sized = BitstringPattern::new(&[integer(var("a")), size(integer(var("b")), 16)]);
    assert_eq!(sized.as_ref().ok().and_then(BitstringPattern::byte_size), Some(3));
    assert_eq!(sized.map(|p| p.sized_byte_size()).ok(), Some(Ok(3)));

    let open = BitstringPattern::new(&[integer(var("a")), binary(var("rest"))]);
    assert_eq!(open.as_ref().ok().and_then(BitstringPattern::byte_size), None);
    assert_eq!(
        open.map(|p| p.sized_byte_size()).ok(),
        Some(Err(PatternError::UnsizedGeneratorSegment { index: 1 }))
    );
}
