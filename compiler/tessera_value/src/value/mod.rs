//! Runtime values matched by the pattern engine.
//!
//! # Arc Enforcement
//!
//! All heap payloads go through factory methods on `Value`. The `Heap<T>`
//! wrapper has a module-private constructor, so external code cannot build
//! heap values directly:
//!
//! ```text
//! let s = Value::string("hello");                       // OK
//! let list = Value::list(vec![Value::int(1)]);          // OK
//! let s = Value::Str(Heap::new("hello".to_string()));   // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Thread Safety
//!
//! Every heap type is reference counted with `Arc`, so values (and the
//! compiled matchers that hold them) are `Send + Sync`.

mod composite;
mod heap;
mod name;

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use crate::bitstring::BitString;

pub use composite::{FunctionValue, NativeFn, ObjectValue};
pub use heap::Heap;
pub use name::Name;

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// The null value.
    Null,
    /// Process identifier.
    Pid(u64),
    /// Unique reference.
    Reference(u64),

    // Heap types
    /// Symbol-atom, rendered `:name`.
    Atom(Heap<String>),
    /// String value.
    Str(Heap<String>),
    /// Ordered list of values.
    List(Heap<Vec<Value>>),
    /// Fixed-size tuple of values.
    Tuple(Heap<Vec<Value>>),
    /// Map with arbitrary keys.
    Map(Heap<FxHashMap<Value, Value>>),

    // Composite types
    /// Object with string keys and an optional nominal type tag.
    Object(ObjectValue),
    /// Packed byte sequence.
    BitString(BitString),
    /// Callable value, compared by identity.
    Function(FunctionValue),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a string value.
    ///
    /// ```text
    /// let s = Value::string("hello");
    /// let s2 = Value::string(format!("value: {x}"));
    /// ```
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create an atom. The name is stored without the leading colon.
    #[inline]
    pub fn atom(name: impl Into<String>) -> Self {
        Value::Atom(Heap::new(name.into()))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }

    /// Create a map value. Later entries overwrite earlier ones with an
    /// equal key.
    ///
    /// ```text
    /// let m = Value::map([(Value::atom("a"), Value::int(1))]);
    /// ```
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(Heap::new(entries.into_iter().collect()))
    }

    /// Create an untyped object.
    pub fn object<K: Into<Name>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(ObjectValue::new(
            None,
            fields.into_iter().map(|(k, v)| (k.into(), v)),
        ))
    }

    /// Create an object carrying a nominal type tag, matched by
    /// `TypedObject` patterns.
    pub fn typed_object<K: Into<Name>>(
        type_name: impl Into<Name>,
        fields: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        Value::Object(ObjectValue::new(
            Some(type_name.into()),
            fields.into_iter().map(|(k, v)| (k.into(), v)),
        ))
    }

    #[inline]
    pub fn bitstring(bits: BitString) -> Self {
        Value::BitString(bits)
    }

    /// Create a callable value from a native closure.
    pub fn function<F>(name: impl Into<Name>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Function(FunctionValue::new(name.into(), func))
    }
}

// Value Methods

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    #[expect(
        clippy::cast_precision_loss,
        reason = "float segments accept integer values the same way the source notation does"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Value::Atom(a) => Some(a),
            _ => None,
        }
    }

    /// Borrow the elements of a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the elements of any fixed-length indexable sequence (list or
    /// tuple).
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bitstring(&self) -> Option<&BitString> {
        match self {
            Value::BitString(bits) => Some(bits),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(func) => Some(func),
            _ => None,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::Pid(_) => "pid",
            Value::Reference(_) => "reference",
            Value::Atom(_) => "atom",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::BitString(_) => "bitstring",
            Value::Function(_) => "function",
        }
    }

    /// Nominal type tag, compared against `TypedObject` patterns.
    ///
    /// Objects report the tag they were constructed with; tuples, bitstrings,
    /// PIDs and references report their built-in tag. Everything else has
    /// no tag and never matches a typed pattern.
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            Value::Object(obj) => obj.type_name().map(Name::as_str),
            Value::Tuple(_) => Some("Tuple"),
            Value::BitString(_) => Some("BitString"),
            Value::Pid(_) => Some("PID"),
            Value::Reference(_) => Some("Reference"),
            _ => None,
        }
    }

    /// Check whether the value is map-like or object-like.
    pub fn is_associative(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Object(_))
    }

    /// Look up `key` in an associative value.
    ///
    /// Objects are keyed by strings; atom and string keys both address an
    /// object field of the same name.
    pub fn lookup(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            Value::Object(obj) => match key {
                Value::Str(k) | Value::Atom(k) => obj.get(k),
                _ => None,
            },
            _ => None,
        }
    }

    /// Number of entries of an associative value.
    pub fn entry_count(&self) -> Option<usize> {
        match self {
            Value::Map(map) => Some(map.len()),
            Value::Object(obj) => Some(obj.len()),
            _ => None,
        }
    }
}

// Trait Implementations

// Floats compare by bit pattern, matching `Hash`: NaN equals itself and
// `0.0` differs from `-0.0`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Pid(a), Value::Pid(b)) | (Value::Reference(a), Value::Reference(b)) => a == b,
            (Value::Atom(a), Value::Atom(b)) | (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::BitString(a), Value::BitString(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Value::Int(n) => n.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
            Value::Pid(id) | Value::Reference(id) => id.hash(state),
            Value::Atom(s) | Value::Str(s) => s.hash(state),
            Value::List(items) | Value::Tuple(items) => {
                for item in items.iter() {
                    item.hash(state);
                }
            }
            // Iteration order is unspecified, so only the length is hashed.
            Value::Map(map) => map.len().hash(state),
            Value::Object(obj) => obj.hash(state),
            Value::BitString(bits) => bits.hash(state),
            Value::Function(func) => func.hash(state),
        }
    }
}

fn write_separated<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a Value>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "nil"),
            Value::Pid(id) => write!(f, "#PID<0.0.{id}>"),
            Value::Reference(id) => write!(f, "#Ref<0.0.0.{id}>"),
            Value::Atom(a) => write!(f, ":{}", &**a),
            Value::Str(s) => write!(f, "\"{}\"", &**s),
            Value::List(items) => {
                write!(f, "[")?;
                write_separated(f, items.iter())?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "{{")?;
                write_separated(f, items.iter())?;
                write!(f, "}}")
            }
            Value::Map(map) => {
                // Sort rendered entries so output is stable across runs.
                let mut entries: Vec<String> =
                    map.iter().map(|(k, v)| format!("{k} => {v}")).collect();
                entries.sort();
                write!(f, "%{{{}}}", entries.join(", "))
            }
            Value::Object(obj) => {
                write!(f, "%")?;
                if let Some(tag) = obj.type_name() {
                    write!(f, "{tag}")?;
                }
                write!(f, "{{")?;
                for (i, (k, v)) in obj.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::BitString(bits) => write!(f, "{bits}"),
            Value::Function(func) => write!(f, "#Function<{}>", func.name()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<BitString> for Value {
    fn from(bits: BitString) -> Self {
        Value::BitString(bits)
    }
}
