//! Tessera Dispatch - multi-clause definitions over compiled patterns.
//!
//! This crate provides:
//! - `Clause`: parameter patterns, an optional guard and a handler
//! - `DispatchTable`: clauses grouped by accepted arity, first match wins
//! - Optional-argument expansion for clauses with defaulted parameters
//! - `case` and `With`, the single-subject and chained match forms
//! - List and bitstring comprehensions (`Generator`, `Comprehension`)

mod clause;
mod comprehension;
mod forms;
mod table;

pub use clause::{Clause, Guard, Handler};
pub use comprehension::{Comprehension, Generator};
pub use forms::{case, With};
pub use table::{compile_clauses, dispatch, DispatchTable};
