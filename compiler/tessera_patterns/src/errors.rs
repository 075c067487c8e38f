//! Error types for pattern compilation and matching.
//!
//! Structural mismatch is never an error: matchers return `false`. These
//! types cover the two ways a caller can still fail:
//!
//! - `PatternError`: the pattern itself is malformed. Raised once, when it is
//!   compiled.
//! - `MatchError`: a value (or argument list) satisfied no pattern. Every
//!   kind renders as `No match for: <subject>`; the kind is kept for
//!   diagnostics only.

use std::fmt;

use tessera_value::{BitstringError, Value};

/// A pattern that cannot be compiled.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// A literal bitstring field could not be encoded.
    #[error(transparent)]
    Bitstring(#[from] BitstringError),

    /// A variable-length field appears before the last field position.
    #[error("a binary field without size is only allowed at the end of a binary pattern (field {index})")]
    UnsizedBinaryNotLast { index: usize },

    /// A bitstring generator needs every field to have a fixed width.
    #[error("bitstring generator field {index} has no size")]
    UnsizedGeneratorSegment { index: usize },
}

/// Why nothing matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchErrorKind {
    /// A single pattern rejected the value.
    NoMatch,
    /// No clause accepts this many arguments.
    NoArityMatch { arity: usize },
    /// Clauses of this arity exist but none matched.
    NoClauseMatch { arity: usize },
}

/// The rejected input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchSubject {
    Value(Value),
    Args(Vec<Value>),
}

impl fmt::Display for MatchSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchSubject::Value(value) => write!(f, "{value}"),
            MatchSubject::Args(args) => {
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{arg}")?;
                }
                Ok(())
            }
        }
    }
}

/// No pattern or clause matched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("No match for: {subject}")]
pub struct MatchError {
    pub kind: MatchErrorKind,
    pub subject: MatchSubject,
}

impl MatchError {
    pub fn kind(&self) -> MatchErrorKind {
        self.kind
    }

    pub fn subject(&self) -> &MatchSubject {
        &self.subject
    }
}

/// Either failure of a compile-and-match convenience call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Match(#[from] MatchError),
}

// Factories

#[cold]
pub fn no_match(value: &Value) -> MatchError {
    MatchError {
        kind: MatchErrorKind::NoMatch,
        subject: MatchSubject::Value(value.clone()),
    }
}

#[cold]
pub fn no_arity_match(args: &[Value]) -> MatchError {
    MatchError {
        kind: MatchErrorKind::NoArityMatch { arity: args.len() },
        subject: MatchSubject::Args(args.to_vec()),
    }
}

#[cold]
pub fn no_clause_match(args: &[Value]) -> MatchError {
    MatchError {
        kind: MatchErrorKind::NoClauseMatch { arity: args.len() },
        subject: MatchSubject::Args(args.to_vec()),
    }
}

#[cold]
pub fn unsized_binary_not_last(index: usize) -> PatternError {
    PatternError::UnsizedBinaryNotLast { index }
}

#[cold]
pub fn unsized_generator_segment(index: usize) -> PatternError {
    PatternError::UnsizedGeneratorSegment { index }
}
