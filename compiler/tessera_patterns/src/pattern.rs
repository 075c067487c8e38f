//! Pattern AST.
//!
//! A `Pattern` is pure data. It is turned into a reusable [`Matcher`] by
//! [`compile`], which is where all behavior lives.
//!
//! [`Matcher`]: crate::Matcher
//! [`compile`]: crate::compile

use tessera_value::{BitSegment, Name, Value};

/// Pattern node.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Matches anything, binds nothing.
    Wildcard,
    /// Matches anything and binds it.
    ///
    /// Unnamed variables and names starting with `_` bind anonymously;
    /// other names take part in the consistency check. `default` is only
    /// consulted when a clause is called with fewer arguments than it
    /// declares.
    Variable {
        name: Option<Name>,
        default: Option<Value>,
    },
    /// Matches a value equal to the one given; binds nothing.
    Bound(Value),
    /// Matches an exact literal (number, string, boolean, atom, null or a
    /// function by identity); binds nothing.
    Literal(Value),
    /// Matches what the inner pattern matches, then binds the whole value
    /// after the inner bindings.
    Capture(Box<Pattern>),
    /// Matches strings with the prefix and binds the remainder.
    StartsWith(String),
    /// Matches lists of two or more elements, binding the head then the
    /// tail list.
    HeadTail,
    /// Matches values whose type tag is `type_name` and whose contents match
    /// `inner`.
    Typed { type_name: Name, inner: Box<Pattern> },
    /// Matches a list or tuple of exactly this length, element by element.
    Sequence(Vec<Pattern>),
    /// Matches maps and objects containing at least these keys, in
    /// declaration order.
    Keyed(Vec<(Value, Pattern)>),
    /// Matches a bitstring (or string) laid out as these fields.
    Bitstring(Vec<BitSegment>),
}

impl Pattern {
    pub fn wildcard() -> Self {
        Pattern::Wildcard
    }

    /// Named variable.
    pub fn var(name: impl Into<Name>) -> Self {
        Pattern::Variable {
            name: Some(name.into()),
            default: None,
        }
    }

    /// Named variable carrying a default for optional-argument expansion.
    pub fn var_with_default(name: impl Into<Name>, default: impl Into<Value>) -> Self {
        Pattern::Variable {
            name: Some(name.into()),
            default: Some(default.into()),
        }
    }

    /// Unnamed variable.
    pub fn anonymous() -> Self {
        Pattern::Variable {
            name: None,
            default: None,
        }
    }

    pub fn bound(value: impl Into<Value>) -> Self {
        Pattern::Bound(value.into())
    }

    pub fn int(n: i64) -> Self {
        Pattern::Literal(Value::int(n))
    }

    pub fn float(f: f64) -> Self {
        Pattern::Literal(Value::float(f))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Pattern::Literal(Value::string(s))
    }

    pub fn boolean(b: bool) -> Self {
        Pattern::Literal(Value::Bool(b))
    }

    pub fn atom(name: impl Into<String>) -> Self {
        Pattern::Literal(Value::atom(name))
    }

    pub fn null() -> Self {
        Pattern::Literal(Value::Null)
    }

    /// Literal that matches only this very function value.
    pub fn function(func: &Value) -> Self {
        Pattern::Literal(func.clone())
    }

    pub fn capture(inner: Pattern) -> Self {
        Pattern::Capture(Box::new(inner))
    }

    pub fn starts_with(prefix: impl Into<String>) -> Self {
        Pattern::StartsWith(prefix.into())
    }

    pub fn head_tail() -> Self {
        Pattern::HeadTail
    }

    pub fn typed(type_name: impl Into<Name>, inner: Pattern) -> Self {
        Pattern::Typed {
            type_name: type_name.into(),
            inner: Box::new(inner),
        }
    }

    pub fn sequence(items: Vec<Pattern>) -> Self {
        Pattern::Sequence(items)
    }

    pub fn keyed<K: Into<Value>>(entries: impl IntoIterator<Item = (K, Pattern)>) -> Self {
        Pattern::Keyed(entries.into_iter().map(|(k, p)| (k.into(), p)).collect())
    }

    pub fn bitstring(fields: Vec<BitSegment>) -> Self {
        Pattern::Bitstring(fields)
    }

    /// Number of positional slots, for sequence patterns.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Pattern::Sequence(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Positions and defaults of the top-level variables that carry a
    /// default, in declaration order. Empty for non-sequence patterns.
    pub fn optional_slots(&self) -> Vec<(usize, Value)> {
        let Pattern::Sequence(items) = self else {
            return Vec::new();
        };
        items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Pattern::Variable {
                    default: Some(default),
                    ..
                } => Some((index, default.clone())),
                _ => None,
            })
            .collect()
    }
}

impl From<Vec<Pattern>> for Pattern {
    fn from(items: Vec<Pattern>) -> Self {
        Pattern::Sequence(items)
    }
}
