//! List and bitstring comprehensions.
//!
//! A comprehension draws rows from an ordered list of generators. Rows are
//! the cartesian product of the generators' outputs, first generator
//! outermost, and each row is the concatenation of the bindings its
//! generators produced. A guard filters rows; a body maps each surviving
//! row to a result.

use std::fmt;
use std::sync::Arc;

use tessera_patterns::{compile, Bindings, BitstringPattern, Matcher, Pattern, PatternError};
use tessera_value::bitstring::integer;
use tessera_value::{BitSegment, BitString, BitstringError, Value};

use crate::clause::Guard;

/// Source of binding rows for a comprehension.
#[derive(Clone, Debug)]
pub enum Generator {
    /// Every list item the pattern matches, in order.
    List { matcher: Matcher, items: Vec<Value> },
    /// Consecutive fixed-width chunks of a bitstring.
    Bitstring {
        layout: BitstringPattern,
        stride: usize,
        bits: BitString,
    },
}

impl Generator {
    pub fn list(
        pattern: &Pattern,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self, PatternError> {
        Ok(Generator::List {
            matcher: compile(pattern)?,
            items: items.into_iter().collect(),
        })
    }

    /// Walk `bits` in chunks of the layout's total width. Every field must
    /// be sized.
    pub fn bitstring(fields: &[BitSegment], bits: BitString) -> Result<Self, PatternError> {
        let layout = BitstringPattern::new(fields)?;
        let stride = layout.sized_byte_size()?;
        Ok(Generator::Bitstring {
            layout,
            stride,
            bits,
        })
    }

    /// Bindings of every matching item or chunk. Items that do not match
    /// are skipped; a bitstring stops at its first short chunk.
    pub fn rows(&self) -> Vec<Vec<Value>> {
        match self {
            Generator::List { matcher, items } => {
                items.iter().filter_map(|item| matcher.try_match(item)).collect()
            }
            Generator::Bitstring {
                layout,
                stride,
                bits,
            } => {
                let mut rows = Vec::new();
                if *stride == 0 {
                    return rows;
                }
                let mut offset = 0;
                while offset + stride <= bits.byte_size() {
                    let chunk = Value::BitString(bits.slice(offset, Some(offset + stride)));
                    let mut bindings = Bindings::new();
                    if layout.matches(&chunk, &mut bindings) {
                        if let Ok(resolved) = bindings.resolve() {
                            rows.push(resolved.into_values());
                        }
                    }
                    offset += stride;
                }
                rows
            }
        }
    }
}

/// Generators plus an optional row filter.
#[derive(Clone, Default)]
pub struct Comprehension {
    generators: Vec<Generator>,
    guard: Option<Arc<Guard>>,
}

impl Comprehension {
    pub fn new(generators: Vec<Generator>) -> Self {
        Comprehension {
            generators,
            guard: None,
        }
    }

    #[must_use]
    pub fn filter<G>(mut self, guard: G) -> Self
    where
        G: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Arc::new(guard));
        self
    }

    /// Rows that pass the filter. No generators means no rows.
    pub fn rows(&self) -> Vec<Vec<Value>> {
        if self.generators.is_empty() {
            return Vec::new();
        }

        let mut rows: Vec<Vec<Value>> = vec![Vec::new()];
        for generator in &self.generators {
            let produced = generator.rows();
            rows = rows
                .iter()
                .flat_map(|prefix| {
                    produced.iter().map(move |row| {
                        let mut joined = prefix.clone();
                        joined.extend(row.iter().cloned());
                        joined
                    })
                })
                .collect();
        }

        match &self.guard {
            Some(guard) => rows.into_iter().filter(|row| guard(row.as_slice())).collect(),
            None => rows,
        }
    }

    pub fn collect_list<R, F>(&self, mut body: F) -> Vec<R>
    where
        F: FnMut(&[Value]) -> R,
    {
        self.rows().iter().map(|row| body(row.as_slice())).collect()
    }

    /// Collect into a bitstring, each result written as an 8-bit integer.
    pub fn collect_bitstring<F>(&self, body: F) -> Result<BitString, BitstringError>
    where
        F: FnMut(&[Value]) -> Value,
    {
        let segments: Vec<BitSegment> = self
            .collect_list(body)
            .into_iter()
            .map(|value| integer(value))
            .collect();
        BitString::from_segments(&segments)
    }
}

impl fmt::Debug for Comprehension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comprehension")
            .field("generators", &self.generators)
            .field("filtered", &self.guard.is_some())
            .finish()
    }
}
