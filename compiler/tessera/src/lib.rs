//! Tessera - runtime structural pattern matching.
//!
//! Patterns are plain data ([`Pattern`]) compiled once into reusable
//! [`Matcher`]s. A successful match yields the bound sub-values in
//! depth-first, left-to-right pattern order; a variable name used twice must
//! bind equal values both times. On top of that:
//!
//! - [`DispatchTable`] picks the first of several [`Clause`]s that matches an
//!   argument list, with defaulted parameters widening the accepted arity
//! - bitstring patterns decode packed bytes field by field
//! - [`case`], [`With`] and [`Comprehension`] cover the remaining match forms
//!
//! ```text
//! let table = compile_clauses(vec![
//!     Clause::new(vec![Pattern::int(0)], |_| Value::atom("zero"))?,
//!     Clause::new(vec![Pattern::var("n")], |args| args[0].clone())?,
//! ]);
//! assert_eq!(dispatch(&table, &[Value::int(0)])?, Value::atom("zero"));
//! ```
//!
//! # Tracing
//!
//! The crates log through `tracing`. Call [`init_tracing`] to install a
//! subscriber; it does nothing unless `RUST_LOG` is set. Set
//! `TESSERA_LOG_TREE=1` for indented span output.

use std::sync::Once;

pub use tessera_dispatch::{
    case, compile_clauses, dispatch, Clause, Comprehension, DispatchTable, Generator, Guard,
    Handler, With,
};
pub use tessera_patterns::{
    compile, match_or_default, match_pattern, match_pattern_with_guard, Binding,
    BindingConflict, Bindings, BitstringPattern, Error, MatchError, MatchErrorKind, MatchSubject,
    Matcher, Pattern, PatternError, Resolved,
};
pub use tessera_value::{
    bitstring, BitAttr, BitSegment, BitString, BitstringError, FunctionValue, IdGenerator, Name,
    ObjectValue, SegmentType, SegmentValue, Value,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=tessera_dispatch=debug`
/// or `RUST_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }

        let filter = EnvFilter::from_default_env();
        let tree = std::env::var("TESSERA_LOG_TREE").is_ok_and(|v| v == "1");

        // Another subscriber may already be installed by the host.
        let _ = if tree {
            let layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init()
        };
    });
}
