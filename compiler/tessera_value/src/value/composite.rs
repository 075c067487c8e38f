//! Composite value types: objects and functions.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{Heap, Name, Value};

// ObjectValue

/// Object-like associative value with string keys and an optional nominal
/// type tag.
///
/// Field order is the order the fields were given at construction, which is
/// also the order used for display. Equality ignores field order.
#[derive(Clone, Debug)]
pub struct ObjectValue {
    type_name: Option<Name>,
    fields: Heap<Vec<(Name, Value)>>,
}

impl ObjectValue {
    /// Build an object, keeping the last value for duplicated keys.
    pub(super) fn new(
        type_name: Option<Name>,
        entries: impl IntoIterator<Item = (Name, Value)>,
    ) -> Self {
        let mut fields: Vec<(Name, Value)> = Vec::new();
        for (key, value) in entries {
            if let Some(slot) = fields.iter_mut().find(|(k, _)| *k == key) {
                slot.1 = value;
            } else {
                fields.push((key, value));
            }
        }
        ObjectValue {
            type_name,
            fields: Heap::new(fields),
        }
    }

    /// Nominal type tag, if the object was constructed with one.
    pub fn type_name(&self) -> Option<&Name> {
        self.type_name.as_ref()
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> + '_ {
        self.fields.iter().map(|(k, v)| (k, v))
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|(k, v)| other.get(k.as_str()).is_some_and(|ov| ov == v))
    }
}

impl Eq for ObjectValue {}

impl Hash for ObjectValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Field order is not part of equality, so only order-free data is hashed.
        self.type_name.hash(state);
        self.fields.len().hash(state);
    }
}

// FunctionValue

/// Native function signature for callable values.
pub type NativeFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Callable value.
///
/// Two function values are equal only when they share the same underlying
/// closure allocation; the name is for display and diagnostics.
#[derive(Clone)]
pub struct FunctionValue {
    name: Name,
    func: Arc<NativeFn>,
}

impl FunctionValue {
    pub(super) fn new<F>(name: Name, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        FunctionValue {
            name,
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Invoke the function with positional arguments.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }

    /// Reference identity: true when both values wrap the same closure.
    pub fn same_function(&self, other: &FunctionValue) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.func).cast::<()>(),
            Arc::as_ptr(&other.func).cast::<()>(),
        )
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_function(other)
    }
}

impl Eq for FunctionValue {}

impl Hash for FunctionValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.func).cast::<()>(), state);
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name)
    }
}
