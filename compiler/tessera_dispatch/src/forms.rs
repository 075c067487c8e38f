//! `case` and `with` built on top of matchers and dispatch tables.

use std::fmt;

use tessera_patterns::{compile, Matcher, MatchError, Pattern, PatternError};
use tessera_value::Value;

use crate::table::DispatchTable;

/// Match a single subject against one-parameter clauses.
pub fn case<R>(subject: &Value, table: &DispatchTable<R>) -> Result<R, MatchError> {
    table.call(std::slice::from_ref(subject))
}

type Step = Box<dyn Fn(&[Value]) -> Value + Send + Sync>;
type Otherwise = Box<dyn Fn(Value) -> Value + Send + Sync>;

/// A chain of steps that must each produce a value matching their pattern.
///
/// Each step is called with the bindings accumulated so far. When a result
/// does not match, the chain stops and yields the `otherwise` handler's
/// result for it (or the unmatched result itself). When every step matches,
/// the success handler receives all the bindings.
///
/// ```text
/// with {:ok, a} <- fetch(),
///      {:ok, b} <- parse(a) do
///   combine(a, b)
/// else
///   err -> err
/// end
/// ```
#[derive(Default)]
pub struct With {
    steps: Vec<(Matcher, Step)>,
    otherwise: Option<Otherwise>,
}

impl With {
    pub fn new() -> Self {
        With::default()
    }

    pub fn step<F>(mut self, pattern: &Pattern, step: F) -> Result<Self, PatternError>
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.steps.push((compile(pattern)?, Box::new(step)));
        Ok(self)
    }

    #[must_use]
    pub fn otherwise<F>(mut self, handler: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.otherwise = Some(Box::new(handler));
        self
    }

    pub fn run<F>(&self, success: F) -> Value
    where
        F: FnOnce(Vec<Value>) -> Value,
    {
        let mut bindings = Vec::new();
        for (matcher, step) in &self.steps {
            let result = step(bindings.as_slice());
            match matcher.try_match(&result) {
                Some(bound) => bindings.extend(bound),
                None => {
                    return match &self.otherwise {
                        Some(otherwise) => otherwise(result),
                        None => result,
                    };
                }
            }
        }
        success(bindings)
    }
}

impl fmt::Debug for With {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("With")
            .field("steps", &self.steps.len())
            .field("otherwise", &self.otherwise.is_some())
            .finish()
    }
}
