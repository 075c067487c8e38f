//! Tessera Patterns - structural pattern matching over runtime values.
//!
//! This crate provides:
//! - The pattern AST (`Pattern`)
//! - The compiler that turns patterns into reusable `Matcher`s
//! - The binding accumulator and named-variable consistency check
//!   (`Bindings`, `Resolved`)
//! - The bitstring decoder used by bitstring patterns
//! - Match errors and the compile-and-match conveniences
//!
//! # Matching Model
//!
//! Matching never raises on a structural mismatch: matchers answer `false`
//! and the caller moves on. A match succeeds when the structure matches,
//! every repeated variable name bound equal values, and the guard (if any)
//! accepts the resolved bindings.

mod api;
mod bindings;
mod bitstring;
mod compile;
mod errors;
mod pattern;

pub use api::{match_or_default, match_pattern, match_pattern_with_guard};
pub use bindings::{Binding, BindingConflict, Bindings, Resolved};
pub use bitstring::BitstringPattern;
pub use compile::{compile, Matcher};
pub use errors::{
    no_arity_match, no_clause_match, no_match, Error, MatchError, MatchErrorKind, MatchSubject,
    PatternError,
};
pub use pattern::Pattern;
