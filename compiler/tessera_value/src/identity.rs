//! Identity-like values: process identifiers and references.

use crate::value::Value;

/// Caller-owned source of fresh PID and reference values.
///
/// Each kind has its own counter, starting at 1 and increasing by one per
/// call. Two generators never share state; whoever constructs identities
/// owns the generator that numbers them.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_pid: u64,
    last_reference: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_pid(&mut self) -> Value {
        self.last_pid += 1;
        Value::Pid(self.last_pid)
    }

    pub fn next_reference(&mut self) -> Value {
        self.last_reference += 1;
        Value::Reference(self.last_reference)
    }
}
