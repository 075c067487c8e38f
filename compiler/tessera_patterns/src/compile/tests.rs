use super::*;
use pretty_assertions::assert_eq;

fn compiled(pattern: &Pattern) -> Matcher {
    compile(pattern).unwrap()
}

fn list(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::int).collect())
}

#[test]
fn wildcard_binds_nothing() {
    assert_eq!(
        compiled(&Pattern::wildcard()).try_match(&Value::int(1)),
        Some(vec![])
    );
}

#[test]
fn variables_bind_in_order() {
    let pattern = Pattern::sequence(vec![
        Pattern::var("a"),
        Pattern::anonymous(),
        Pattern::var("_ignored"),
    ]);
    assert_eq!(
        compiled(&pattern).try_match(&list(&[1, 2, 3])),
        Some(vec![Value::int(1), Value::int(2), Value::int(3)])
    );
}

#[test]
fn literals_check_type_and_value() {
    let one = compiled(&Pattern::int(1));
    assert!(one.try_match(&Value::int(1)).is_some());
    assert!(one.try_match(&Value::float(1.0)).is_none());
    assert!(one.try_match(&Value::string("1")).is_none());

    let ok = compiled(&Pattern::atom("ok"));
    assert!(ok.try_match(&Value::atom("ok")).is_some());
    assert!(ok.try_match(&Value::string("ok")).is_none());

    assert!(compiled(&Pattern::null()).try_match(&Value::Null).is_some());
    assert!(compiled(&Pattern::boolean(true))
        .try_match(&Value::Bool(false))
        .is_none());
}

#[test]
fn float_literals_compare_by_bits() {
    let nan = compiled(&Pattern::float(f64::NAN));
    assert_eq!(nan.try_match(&Value::float(f64::NAN)), Some(vec![]));

    let zero = compiled(&Pattern::float(0.0));
    assert_eq!(zero.try_match(&Value::float(0.0)), Some(vec![]));
    assert_eq!(zero.try_match(&Value::float(-0.0)), None);
}

#[test]
fn function_literals_compare_by_identity() {
    let f = Value::function("f", |_| Value::Null);
    let g = Value::function("f", |_| Value::Null);
    let matcher = compiled(&Pattern::function(&f));
    assert!(matcher.try_match(&f).is_some());
    assert!(matcher.try_match(&g).is_none());
}

#[test]
fn bound_binds_nothing() {
    let matcher = compiled(&Pattern::sequence(vec![
        Pattern::bound(5),
        Pattern::var("x"),
    ]));
    assert_eq!(matcher.try_match(&list(&[5, 6])), Some(vec![Value::int(6)]));
    assert_eq!(matcher.try_match(&list(&[4, 6])), None);
}

#[test]
fn capture_appends_whole_value_last() {
    let inner = Pattern::sequence(vec![Pattern::var("a"), Pattern::var("b")]);
    let matcher = compiled(&Pattern::capture(inner));
    assert_eq!(
        matcher.try_match(&list(&[1, 2])),
        Some(vec![Value::int(1), Value::int(2), list(&[1, 2])])
    );
    assert_eq!(matcher.try_match(&list(&[1])), None);
}

#[test]
fn starts_with_binds_remainder() {
    let matcher = compiled(&Pattern::starts_with("Hello, "));
    assert_eq!(
        matcher.try_match(&Value::string("Hello, world")),
        Some(vec![Value::string("world")])
    );
    assert_eq!(matcher.try_match(&Value::string("Bye")), None);
    assert_eq!(matcher.try_match(&Value::atom("Hello, world")), None);
}

#[test]
fn head_tail_needs_two_elements() {
    let matcher = compiled(&Pattern::head_tail());
    assert_eq!(matcher.try_match(&list(&[])), None);
    assert_eq!(matcher.try_match(&list(&[1])), None);
    assert_eq!(
        matcher.try_match(&list(&[1, 2, 3])),
        Some(vec![Value::int(1), list(&[2, 3])])
    );
    assert_eq!(
        matcher.try_match(&Value::tuple(vec![Value::int(1), Value::int(2)])),
        None
    );
}

#[test]
fn sequence_matches_lists_and_tuples_of_equal_length() {
    let matcher = compiled(&Pattern::sequence(vec![Pattern::atom("ok"), Pattern::var("v")]));
    let tuple = Value::tuple(vec![Value::atom("ok"), Value::int(1)]);
    assert_eq!(matcher.try_match(&tuple), Some(vec![Value::int(1)]));
    assert_eq!(
        matcher.try_match(&Value::list(vec![Value::atom("ok"), Value::int(1)])),
        Some(vec![Value::int(1)])
    );
    assert_eq!(matcher.try_match(&list(&[1, 2, 3])), None);
    assert_eq!(matcher.try_match(&Value::string("ok")), None);
}

#[test]
fn keyed_ignores_extra_keys_and_requires_listed_ones() {
    let matcher = compiled(&Pattern::keyed([(Value::atom("a"), Pattern::wildcard())]));
    let both = Value::map([
        (Value::atom("a"), Value::int(1)),
        (Value::atom("b"), Value::int(2)),
    ]);
    let only_b = Value::map([(Value::atom("b"), Value::int(2))]);
    assert_eq!(matcher.try_match(&both), Some(vec![]));
    assert_eq!(matcher.try_match(&only_b), None);
    assert_eq!(matcher.try_match(&list(&[1])), None);
}

#[test]
fn keyed_binds_in_declaration_order() {
    let matcher = compiled(&Pattern::keyed([
        ("y", Pattern::var("y")),
        ("x", Pattern::var("x")),
    ]));
    let object = Value::object([("x", Value::int(1)), ("y", Value::int(2))]);
    assert_eq!(
        matcher.try_match(&object),
        Some(vec![Value::int(2), Value::int(1)])
    );
}

#[test]
fn typed_checks_the_tag_before_the_fields() {
    let matcher = compiled(&Pattern::typed(
        "User",
        Pattern::keyed([("name", Pattern::var("name"))]),
    ));
    let user = Value::typed_object("User", [("name", Value::string("ada"))]);
    let admin = Value::typed_object("Admin", [("name", Value::string("ada"))]);
    let plain = Value::object([("name", Value::string("ada"))]);

    assert_eq!(matcher.try_match(&user), Some(vec![Value::string("ada")]));
    assert_eq!(matcher.try_match(&admin), None);
    assert_eq!(matcher.try_match(&plain), None);
}

#[test]
fn typed_tuple_uses_builtin_tag() {
    let matcher = compiled(&Pattern::typed(
        "Tuple",
        Pattern::sequence(vec![Pattern::var("a")]),
    ));
    assert_eq!(
        matcher.try_match(&Value::tuple(vec![Value::int(1)])),
        Some(vec![Value::int(1)])
    );
    assert_eq!(matcher.try_match(&list(&[1])), None);
}

#[test]
fn repeated_variable_must_bind_equal_values() {
    let matcher = compiled(&Pattern::sequence(vec![Pattern::var("x"), Pattern::var("x")]));
    assert_eq!(
        matcher.try_match(&list(&[5, 5])),
        Some(vec![Value::int(5), Value::int(5)])
    );
    assert_eq!(matcher.try_match(&list(&[5, 6])), None);
}

#[test]
fn failed_match_leaves_bindings_untouched() {
    let matcher = compiled(&Pattern::sequence(vec![
        Pattern::var("a"),
        Pattern::var("b"),
        Pattern::int(0),
    ]));
    let mut bindings = Bindings::new();
    bindings.push(Value::atom("before"));

    assert!(!matcher.matches(&list(&[1, 2, 3]), &mut bindings));
    assert_eq!(bindings.len(), 1);

    assert!(matcher.matches(&list(&[1, 2, 0]), &mut bindings));
    assert_eq!(bindings.len(), 3);
}

#[test]
fn guard_sees_resolved_bindings() {
    let matcher = compiled(&Pattern::sequence(vec![Pattern::var("a"), Pattern::var("b")]));
    let ordered = |args: &[Value]| args[0].as_int() < args[1].as_int();

    assert!(matcher.match_with_guard(&list(&[1, 2]), ordered).is_ok());
    let err = matcher.match_with_guard(&list(&[2, 1]), ordered).unwrap_err();
    assert_eq!(err.to_string(), "No match for: [2, 1]");
}

#[test]
fn match_value_reports_the_value() {
    let matcher = compiled(&Pattern::int(1));
    assert_eq!(
        matcher.match_value(&Value::int(2)).unwrap_err().to_string(),
        "No match for: 2"
    );
}

#[test]
fn match_or_default_returns_default_on_failure() {
    let matcher = compiled(&Pattern::var("x"));
    let fallback = vec![Value::atom("none")];
    assert_eq!(
        matcher.match_or_default(&Value::int(1), |_| false, fallback.clone()),
        fallback
    );
    assert_eq!(
        matcher.match_or_default(&Value::int(1), |_| true, fallback),
        vec![Value::int(1)]
    );
}

#[test]
fn nested_bitstring_compile_error_surfaces() {
    use tessera_value::bitstring::{binary, integer};
    use tessera_value::SegmentValue;

    let pattern = Pattern::sequence(vec![Pattern::bitstring(vec![
        binary(SegmentValue::var("a")),
        integer(SegmentValue::var("b")),
    ])]);
    assert!(matches!(
        compile(&pattern),
        Err(PatternError::UnsizedBinaryNotLast { index: 0 })
    ));
}

#[test]
fn matchers_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Matcher>();
}

// === Property tests ===

mod proptest_matching {
    use super::{compiled, list};
    use crate::{Bindings, Pattern};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn failed_matches_never_leak(items in proptest::collection::vec(any::<i64>(), 0..6)) {
            let matcher = compiled(&Pattern::sequence(vec![
                Pattern::var("a"),
                Pattern::capture(Pattern::var("b")),
                Pattern::int(i64::MIN),
            ]));
            let mut bindings = Bindings::new();
            let matched = matcher.matches(&list(&items), &mut bindings);
            if !matched {
                prop_assert!(bindings.is_empty());
            }
        }

        #[test]
        fn binding_order_is_deterministic(items in proptest::collection::vec(any::<i64>(), 2..8)) {
            let matcher = compiled(&Pattern::head_tail());
            let first = matcher.try_match(&list(&items));
            let second = matcher.try_match(&list(&items));
            prop_assert_eq!(first.as_ref().map(Vec::len), Some(2));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn repeated_names_agree_only_on_equal_values(a in any::<i64>(), b in any::<i64>()) {
            let matcher = compiled(&Pattern::sequence(vec![Pattern::var("x"), Pattern::var("x")]));
            prop_assert_eq!(matcher.try_match(&list(&[a, b])).is_some(), a == b);
        }
    }
}
