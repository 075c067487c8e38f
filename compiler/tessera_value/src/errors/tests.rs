use super::*;

#[test]
fn invalid_size_message() {
    let err = BitstringError::InvalidSize { bits: 16 };
    assert_eq!(
        err.to_string(),
        "invalid size for float: 16 bits (expected 32 or 64)"
    );
}

#[test]
fn segment_type_mismatch_reports_value_type() {
    let err = segment_type_mismatch(SegmentType::Integer, &Value::string("x"));
    assert_eq!(
        err,
        BitstringError::SegmentTypeMismatch {
            segment: SegmentType::Integer,
            found: "string",
        }
    );
    assert_eq!(
        err.to_string(),
        "integer segment cannot hold a value of type string"
    );
}
