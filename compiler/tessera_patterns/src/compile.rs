//! Pattern compilation.
//!
//! `compile` turns a [`Pattern`] tree into a [`Matcher`]: a tree of match
//! nodes with child patterns compiled once and bitstring literals already
//! encoded. The matcher is immutable and shared behind an `Arc`, so it can
//! be cloned into many dispatch tables and used from many threads.
//!
//! # Binding Order
//!
//! Nodes append to the accumulator in depth-first, left-to-right order of
//! the pattern. Handlers receive their arguments positionally from this
//! sequence, so the order is part of the contract:
//!
//! | Node | Appends |
//! |------|---------|
//! | `Variable` | the value (named unless anonymous) |
//! | `Capture` | the inner bindings, then the whole value |
//! | `StartsWith` | the remainder after the prefix |
//! | `HeadTail` | the head, then the tail list |
//! | `Sequence`, `Keyed`, `Typed` | the children's bindings in order |
//! | `Bitstring` | one value per placeholder field |
//! | `Wildcard`, `Bound`, `Literal` | nothing |
//!
//! # Failure
//!
//! A failed match leaves the accumulator exactly as it was: whatever inner
//! nodes appended before the failing one is truncated away by
//! [`Matcher::matches`].

use std::fmt;
use std::sync::Arc;

use tessera_value::{Name, Value};

use crate::bindings::Bindings;
use crate::bitstring::BitstringPattern;
use crate::errors::{no_match, MatchError, PatternError};
use crate::pattern::Pattern;

#[derive(Debug)]
enum Node {
    Any,
    Bind(Option<Name>),
    Equals(Value),
    Capture(Box<Node>),
    StartsWith(String),
    HeadTail,
    Typed { type_name: Name, inner: Box<Node> },
    Sequence(Vec<Node>),
    Keyed(Vec<(Value, Node)>),
    Bitstring(BitstringPattern),
}

/// Compiled, reusable pattern.
#[derive(Clone)]
pub struct Matcher {
    root: Arc<Node>,
}

/// Compile a pattern into a matcher.
///
/// Fails only for malformed bitstring layouts: a literal field that cannot
/// be encoded, or an unsized placeholder that is not the last field.
#[tracing::instrument(level = "trace", skip_all)]
pub fn compile(pattern: &Pattern) -> Result<Matcher, PatternError> {
    Ok(Matcher {
        root: Arc::new(compile_node(pattern)?),
    })
}

fn compile_node(pattern: &Pattern) -> Result<Node, PatternError> {
    Ok(match pattern {
        Pattern::Wildcard => Node::Any,
        Pattern::Variable { name, .. } => Node::Bind(name.clone()),
        Pattern::Bound(value) | Pattern::Literal(value) => Node::Equals(value.clone()),
        Pattern::Capture(inner) => Node::Capture(Box::new(compile_node(inner)?)),
        Pattern::StartsWith(prefix) => Node::StartsWith(prefix.clone()),
        Pattern::HeadTail => Node::HeadTail,
        Pattern::Typed { type_name, inner } => Node::Typed {
            type_name: type_name.clone(),
            inner: Box::new(compile_node(inner)?),
        },
        Pattern::Sequence(items) => {
            Node::Sequence(items.iter().map(compile_node).collect::<Result<_, _>>()?)
        }
        Pattern::Keyed(entries) => Node::Keyed(
            entries
                .iter()
                .map(|(key, sub)| Ok((key.clone(), compile_node(sub)?)))
                .collect::<Result<_, PatternError>>()?,
        ),
        Pattern::Bitstring(fields) => Node::Bitstring(BitstringPattern::new(fields)?),
    })
}

impl Node {
    fn matches(&self, value: &Value, bindings: &mut Bindings) -> bool {
        match self {
            Node::Any => true,
            Node::Bind(None) => {
                bindings.push(value.clone());
                true
            }
            Node::Bind(Some(name)) => {
                bindings.push_named(name, value.clone());
                true
            }
            Node::Equals(expected) => value == expected,
            Node::Capture(inner) => {
                if inner.matches(value, bindings) {
                    bindings.push(value.clone());
                    true
                } else {
                    false
                }
            }
            Node::StartsWith(prefix) => match value
                .as_str()
                .and_then(|s| s.strip_prefix(prefix.as_str()))
            {
                Some(rest) => {
                    bindings.push(Value::string(rest));
                    true
                }
                None => false,
            },
            Node::HeadTail => match value.as_list() {
                Some([head, tail @ ..]) if !tail.is_empty() => {
                    bindings.push(head.clone());
                    bindings.push(Value::list(tail.to_vec()));
                    true
                }
                _ => false,
            },
            Node::Typed { type_name, inner } => {
                value.type_tag() == Some(type_name.as_str()) && inner.matches(value, bindings)
            }
            Node::Sequence(items) => match value.as_sequence() {
                Some(elements) if elements.len() == items.len() => items
                    .iter()
                    .zip(elements)
                    .all(|(item, element)| item.matches(element, bindings)),
                _ => false,
            },
            Node::Keyed(entries) => {
                value.is_associative()
                    && entries.iter().all(|(key, sub)| {
                        value
                            .lookup(key)
                            .is_some_and(|field| sub.matches(field, bindings))
                    })
            }
            Node::Bitstring(layout) => layout.matches(value, bindings),
        }
    }
}

impl Matcher {
    /// Match `value`, appending its bindings on success.
    ///
    /// On failure `bindings` is left as it was before the call.
    pub fn matches(&self, value: &Value, bindings: &mut Bindings) -> bool {
        let mark = bindings.len();
        if self.root.matches(value, bindings) {
            true
        } else {
            bindings.truncate(mark);
            false
        }
    }

    /// Match, resolve named bindings and run `guard` over the result.
    ///
    /// `None` covers all three ways of failing: a structural mismatch, a
    /// variable bound to two different values, and a guard returning
    /// `false`.
    pub fn try_match_with_guard<G>(&self, value: &Value, guard: G) -> Option<Vec<Value>>
    where
        G: FnOnce(&[Value]) -> bool,
    {
        let mut bindings = Bindings::new();
        if !self.matches(value, &mut bindings) {
            return None;
        }
        let resolved = bindings.resolve().ok()?.into_values();
        guard(resolved.as_slice()).then_some(resolved)
    }

    pub fn try_match(&self, value: &Value) -> Option<Vec<Value>> {
        self.try_match_with_guard(value, |_| true)
    }

    /// Match or fail with `No match for: <value>`.
    pub fn match_value(&self, value: &Value) -> Result<Vec<Value>, MatchError> {
        self.try_match(value).ok_or_else(|| no_match(value))
    }

    pub fn match_with_guard<G>(&self, value: &Value, guard: G) -> Result<Vec<Value>, MatchError>
    where
        G: FnOnce(&[Value]) -> bool,
    {
        self.try_match_with_guard(value, guard)
            .ok_or_else(|| no_match(value))
    }

    /// Match, or hand back `default` on any failure.
    pub fn match_or_default<G>(&self, value: &Value, guard: G, default: Vec<Value>) -> Vec<Value>
    where
        G: FnOnce(&[Value]) -> bool,
    {
        self.try_match_with_guard(value, guard).unwrap_or(default)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher").field(&self.root).finish()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
