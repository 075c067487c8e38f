//! Compile-and-match conveniences.
//!
//! These compile the pattern on every call. Hold on to a [`Matcher`] when
//! the same pattern is matched repeatedly.

use tessera_value::Value;

use crate::compile::{compile, Matcher};
use crate::errors::Error;
use crate::pattern::Pattern;

/// Match `value` against `pattern`, returning the resolved bindings.
pub fn match_pattern(pattern: &Pattern, value: &Value) -> Result<Vec<Value>, Error> {
    Ok(compile(pattern)?.match_value(value)?)
}

/// Like [`match_pattern`], additionally requiring `guard` to accept the
/// bindings.
pub fn match_pattern_with_guard<G>(
    pattern: &Pattern,
    value: &Value,
    guard: G,
) -> Result<Vec<Value>, Error>
where
    G: FnOnce(&[Value]) -> bool,
{
    Ok(compile(pattern)?.match_with_guard(value, guard)?)
}

/// Match `value` against `pattern`, or return `default` if it does not
/// match. A malformed pattern is still an error.
pub fn match_or_default<G>(
    pattern: &Pattern,
    value: &Value,
    guard: G,
    default: Vec<Value>,
) -> Result<Vec<Value>, Error>
where
    G: FnOnce(&[Value]) -> bool,
{
    let matcher: Matcher = compile(pattern)?;
    Ok(matcher.match_or_default(value, guard, default))
}
