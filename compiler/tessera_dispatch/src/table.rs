//! Dispatch tables: ordered clauses grouped by accepted arity.
//!
//! A table is built once from an ordered clause list. Every clause is filed
//! under each arity in its [`arity_range`], keeping declaration order within
//! a bucket. A call looks up the bucket for its argument count and takes the
//! first clause that binds; later clauses are never consulted once one
//! matches.
//!
//! [`arity_range`]: Clause::arity_range

use rustc_hash::FxHashMap;
use tessera_patterns::{no_arity_match, no_clause_match, MatchError};
use tessera_value::Value;

use crate::clause::Clause;

/// Immutable multi-clause dispatcher.
pub struct DispatchTable<R> {
    clauses: Vec<Clause<R>>,
    /// Arity to indices into `clauses`, ascending.
    arities: FxHashMap<usize, Vec<usize>>,
}

impl<R> DispatchTable<R> {
    #[tracing::instrument(level = "debug", skip_all, fields(clauses = clauses.len()))]
    pub fn new(clauses: Vec<Clause<R>>) -> Self {
        let mut arities: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
        for (index, clause) in clauses.iter().enumerate() {
            for arity in clause.arity_range() {
                arities.entry(arity).or_default().push(index);
            }
        }
        DispatchTable { clauses, arities }
    }

    pub fn clauses(&self) -> &[Clause<R>] {
        &self.clauses
    }

    /// Accepted argument counts, ascending.
    pub fn arities(&self) -> Vec<usize> {
        let mut arities: Vec<usize> = self.arities.keys().copied().collect();
        arities.sort_unstable();
        arities
    }

    pub fn accepts_arity(&self, arity: usize) -> bool {
        self.arities.contains_key(&arity)
    }

    /// Clauses registered for `arity`, in declaration order.
    pub fn clauses_for(&self, arity: usize) -> impl Iterator<Item = &Clause<R>> + '_ {
        self.arities
            .get(&arity)
            .into_iter()
            .flatten()
            .filter_map(|&index| self.clauses.get(index))
    }

    /// Find the first clause that binds `args`.
    pub fn select(&self, args: &[Value]) -> Result<(&Clause<R>, Vec<Value>), MatchError> {
        if !self.accepts_arity(args.len()) {
            let err = no_arity_match(args);
            tracing::debug!(arity = args.len(), %err, "arity not found");
            return Err(err);
        }

        for clause in self.clauses_for(args.len()) {
            if let Some(bindings) = clause.try_bind(args) {
                return Ok((clause, bindings));
            }
        }

        let err = no_clause_match(args);
        tracing::debug!(arity = args.len(), %err, "no clause matched");
        Err(err)
    }

    /// Select a clause and run its handler with the bindings.
    pub fn call(&self, args: &[Value]) -> Result<R, MatchError> {
        let (clause, bindings) = self.select(args)?;
        Ok(clause.call(bindings))
    }
}

impl<R> Clone for DispatchTable<R> {
    fn clone(&self) -> Self {
        DispatchTable {
            clauses: self.clauses.clone(),
            arities: self.arities.clone(),
        }
    }
}

impl<R> std::fmt::Debug for DispatchTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchTable")
            .field("clauses", &self.clauses)
            .field("arities", &self.arities())
            .finish()
    }
}

/// Build a dispatch table from clauses in declaration order.
pub fn compile_clauses<R>(clauses: Vec<Clause<R>>) -> DispatchTable<R> {
    DispatchTable::new(clauses)
}

/// Call the first matching clause of `table` with `args`.
pub fn dispatch<R>(table: &DispatchTable<R>, args: &[Value]) -> Result<R, MatchError> {
    table.call(args)
}
