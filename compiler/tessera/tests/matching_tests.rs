//! End-to-end behavior of the public matching API.
//!
//! Covers the guarantees callers rely on: bindings never leak from a failed
//! match, binding order is stable, repeated names must agree, and the
//! shape rules of `HeadTail` and `Keyed` patterns.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use tessera::{
    compile, match_or_default, match_pattern, Bindings, Error, MatchErrorKind, Pattern, Value,
};

fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::int).collect())
}

#[test]
fn consistent_pair_binds_once_per_position() {
    let pattern = Pattern::sequence(vec![Pattern::var("x"), Pattern::var("x")]);
    assert_eq!(
        match_pattern(&pattern, &ints(&[5, 5])),
        Ok(vec![Value::int(5), Value::int(5)])
    );

    let Err(Error::Match(err)) = match_pattern(&pattern, &ints(&[5, 6])) else {
        panic!("inconsistent pair must not match");
    };
    assert_eq!(err.kind(), MatchErrorKind::NoMatch);
}

#[test]
fn resolved_names_are_reported_once() {
    let matcher = compile(&Pattern::sequence(vec![Pattern::var("x"), Pattern::var("x")])).unwrap();
    let mut bindings = Bindings::new();
    assert!(matcher.matches(&ints(&[5, 5]), &mut bindings));

    let resolved = bindings.resolve().unwrap();
    assert_eq!(resolved.named.len(), 1);
    assert_eq!(resolved.get("x"), Some(&Value::int(5)));
}

#[test]
fn keyed_containment() {
    let pattern = Pattern::keyed([(Value::atom("a"), Pattern::wildcard())]);
    let ab = Value::map([
        (Value::atom("a"), Value::int(1)),
        (Value::atom("b"), Value::int(2)),
    ]);
    let b = Value::map([(Value::atom("b"), Value::int(2))]);

    assert_eq!(match_pattern(&pattern, &ab), Ok(vec![]));
    assert!(match_pattern(&pattern, &b).is_err());
}

#[test]
fn head_tail_minimum_length() {
    let pattern = Pattern::head_tail();
    assert!(match_pattern(&pattern, &ints(&[])).is_err());
    assert!(match_pattern(&pattern, &ints(&[1])).is_err());
    assert_eq!(
        match_pattern(&pattern, &ints(&[1, 2, 3])),
        Ok(vec![Value::int(1), ints(&[2, 3])])
    );
}

#[test]
fn nested_patterns_bind_depth_first() {
    // {:user, %{name: name, tags: [first | rest]}} captured whole as `user`
    let pattern = Pattern::capture(Pattern::sequence(vec![
        Pattern::atom("user"),
        Pattern::keyed([
            (Value::atom("name"), Pattern::var("name")),
            (Value::atom("tags"), Pattern::head_tail()),
        ]),
    ]));
    let user = Value::tuple(vec![
        Value::atom("user"),
        Value::map([
            (Value::atom("name"), Value::string("ada")),
            (
                Value::atom("tags"),
                Value::list(vec![Value::atom("a"), Value::atom("b")]),
            ),
        ]),
    ]);

    assert_eq!(
        match_pattern(&pattern, &user),
        Ok(vec![
            Value::string("ada"),
            Value::atom("a"),
            Value::list(vec![Value::atom("b")]),
            user.clone(),
        ])
    );
}

#[test]
fn match_or_default_falls_back() {
    let fallback = vec![Value::atom("default")];
    assert_eq!(
        match_or_default(&Pattern::int(1), &Value::int(2), |_| true, fallback.clone()),
        Ok(fallback)
    );
}

#[test]
fn error_message_names_the_value() {
    let err = match_pattern(&Pattern::atom("ok"), &Value::tuple(vec![Value::atom("error")]))
        .unwrap_err();
    assert_eq!(err.to_string(), "No match for: {:error}");
}

mod properties {
    use super::ints;
    use proptest::prelude::*;
    use tessera::{compile, Bindings, Pattern, Value};

    fn nested() -> Pattern {
        Pattern::sequence(vec![
            Pattern::var("a"),
            Pattern::capture(Pattern::anonymous()),
            Pattern::starts_with("k"),
        ])
    }

    proptest! {
        #[test]
        fn no_partial_bindings_on_failure(a in any::<i64>(), b in any::<i64>(), s in "[a-z]{0,4}") {
            let matcher = compile(&nested()).unwrap();
            let value = Value::list(vec![Value::int(a), Value::int(b), Value::string(s.clone())]);
            let mut bindings = Bindings::new();
            let matched = matcher.matches(&value, &mut bindings);

            prop_assert_eq!(matched, s.starts_with('k'));
            if !matched {
                prop_assert!(bindings.is_empty());
            }
        }

        #[test]
        fn binding_order_is_deterministic(items in proptest::collection::vec(any::<i64>(), 3)) {
            let matcher = compile(&Pattern::sequence(vec![
                Pattern::anonymous(),
                Pattern::capture(Pattern::wildcard()),
                Pattern::var("z"),
            ])).unwrap();

            let first = matcher.try_match(&ints(&items)).unwrap();
            let second = matcher.try_match(&ints(&items)).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), 3);
            prop_assert_eq!(first[0].as_int(), Some(items[0]));
        }
    }
}
