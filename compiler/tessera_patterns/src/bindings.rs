//! Binding accumulator and named-variable consistency.
//!
//! Matchers append to a [`Bindings`] in depth-first, left-to-right pattern
//! order. Named variables are recorded as [`Binding::Named`] and only
//! collapsed to plain values by [`Bindings::resolve`], which is where a
//! variable that occurs twice is required to bind equal values both times.

use rustc_hash::FxHashMap;
use tessera_value::{Name, Value};

/// One entry of the accumulator.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    Plain(Value),
    Named(Name, Value),
}

impl Binding {
    pub fn value(&self) -> &Value {
        match self {
            Binding::Plain(value) | Binding::Named(_, value) => value,
        }
    }
}

/// Ordered, append-only bindings of one match attempt.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    entries: Vec<Binding>,
}

/// A named variable bound to two different values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("variable `{name}` bound to both {first} and {second}")]
pub struct BindingConflict {
    pub name: Name,
    pub first: Value,
    pub second: Value,
}

/// Bindings after consistency resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolved {
    /// Every bound value in order, one per accumulator entry.
    pub values: Vec<Value>,
    /// Each named variable once, in order of first occurrence.
    pub named: Vec<(Name, Value)>,
}

impl Resolved {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v)
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    #[inline]
    pub fn push(&mut self, value: Value) {
        self.entries.push(Binding::Plain(value));
    }

    /// Bind `value` under `name`, or anonymously when the name is ignored.
    pub fn push_named(&mut self, name: &Name, value: Value) {
        if name.is_ignored() {
            self.push(value);
        } else {
            self.entries.push(Binding::Named(name.clone(), value));
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything appended after `len`.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.entries.iter()
    }

    /// Collapse named bindings into plain values.
    ///
    /// A name seen again with an equal value contributes its value a second
    /// time, so the output always has one value per entry. A name seen again
    /// with a different value is a conflict and the whole match is rejected.
    pub fn resolve(&self) -> Result<Resolved, BindingConflict> {
        let mut seen: FxHashMap<&Name, &Value> = FxHashMap::default();
        let mut resolved = Resolved {
            values: Vec::with_capacity(self.entries.len()),
            named: Vec::new(),
        };

        for entry in &self.entries {
            match entry {
                Binding::Plain(value) => resolved.values.push(value.clone()),
                Binding::Named(name, value) => {
                    match seen.get(name) {
                        Some(first) if *first != value => {
                            tracing::trace!(%name, first = %first, second = %value, "named binding conflict");
                            return Err(BindingConflict {
                                name: name.clone(),
                                first: (*first).clone(),
                                second: value.clone(),
                            });
                        }
                        Some(_) => {}
                        None => {
                            seen.insert(name, value);
                            resolved.named.push((name.clone(), value.clone()));
                        }
                    }
                    resolved.values.push(value.clone());
                }
            }
        }

        Ok(resolved)
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
