//! Clauses: one `(parameters, guard, handler)` entry of a multi-clause
//! definition.

use std::borrow::Cow;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use tessera_patterns::{compile, Bindings, Matcher, Pattern, PatternError};
use tessera_value::Value;

/// Predicate over a clause's resolved bindings.
pub type Guard = dyn Fn(&[Value]) -> bool + Send + Sync;

/// Body of a clause, called with the resolved bindings as positional
/// arguments.
pub type Handler<R> = dyn Fn(Vec<Value>) -> R + Send + Sync;

/// One clause of a dispatch table.
///
/// Each parameter pattern is compiled once, when the clause is built.
/// Top-level variables with a default make the clause callable with fewer
/// arguments; see [`Clause::arity_range`].
pub struct Clause<R> {
    params: Vec<Matcher>,
    optionals: Vec<(usize, Value)>,
    guard: Option<Arc<Guard>>,
    handler: Arc<Handler<R>>,
}

impl<R> Clause<R> {
    pub fn new<F>(params: Vec<Pattern>, handler: F) -> Result<Self, PatternError>
    where
        F: Fn(Vec<Value>) -> R + Send + Sync + 'static,
    {
        let optionals = Pattern::sequence(params.clone()).optional_slots();
        let params = params.iter().map(compile).collect::<Result<_, _>>()?;
        Ok(Clause {
            params,
            optionals,
            guard: None,
            handler: Arc::new(handler),
        })
    }

    #[must_use]
    pub fn with_guard<G>(mut self, guard: G) -> Self
    where
        G: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Arc::new(guard));
        self
    }

    /// Declared number of parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Argument counts this clause accepts: from the declared arity minus
    /// the number of defaulted parameters, up to the declared arity.
    pub fn arity_range(&self) -> RangeInclusive<usize> {
        self.arity().saturating_sub(self.optionals.len())..=self.arity()
    }

    /// Defaulted parameters as `(index, default)`, in declaration order.
    pub fn optionals(&self) -> &[(usize, Value)] {
        &self.optionals
    }

    /// Insert just enough defaults to bring `args` up to the declared arity.
    ///
    /// The trailing defaults are the ones used, inserted at their declared
    /// positions in declaration order. Argument lists that are already full,
    /// or too short to be completed, come back unchanged.
    pub fn fill_optionals<'a>(&self, args: &'a [Value]) -> Cow<'a, [Value]> {
        let arity = self.arity();
        let Some(needed) = arity.checked_sub(args.len()) else {
            return Cow::Borrowed(args);
        };
        if needed == 0 || needed > self.optionals.len() {
            return Cow::Borrowed(args);
        }

        let mut filled = args.to_vec();
        let skip = self.optionals.len() - needed;
        for (index, default) in &self.optionals[skip..] {
            let at = (*index).min(filled.len());
            filled.insert(at, default.clone());
            if filled.len() == arity {
                break;
            }
        }
        Cow::Owned(filled)
    }

    /// Match `args` against this clause.
    ///
    /// Returns the resolved bindings when the parameters match, repeated
    /// variable names agree and the guard accepts.
    pub fn try_bind(&self, args: &[Value]) -> Option<Vec<Value>> {
        let args = self.fill_optionals(args);
        if args.len() != self.params.len() {
            return None;
        }

        let mut bindings = Bindings::new();
        for (param, arg) in self.params.iter().zip(args.iter()) {
            if !param.matches(arg, &mut bindings) {
                return None;
            }
        }

        let resolved = bindings.resolve().ok()?.into_values();
        match &self.guard {
            Some(guard) if !guard(resolved.as_slice()) => None,
            _ => Some(resolved),
        }
    }

    /// Run the handler.
    pub fn call(&self, bindings: Vec<Value>) -> R {
        (self.handler)(bindings)
    }
}

impl<R> Clone for Clause<R> {
    fn clone(&self) -> Self {
        Clause {
            params: self.params.clone(),
            optionals: self.optionals.clone(),
            guard: self.guard.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<R> fmt::Debug for Clause<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clause")
            .field("params", &self.params)
            .field("optionals", &self.optionals)
            .field("guarded", &self.guard.is_some())
            .finish_non_exhaustive()
    }
}
