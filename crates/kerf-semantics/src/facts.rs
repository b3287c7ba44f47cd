//! Data-flow facts over a statement range.
//!
//! Computed by the host for the statements strictly after a declaration
//! (through the end of its block); the mark-as-const refactoring uses them
//! to prove "read somewhere, never written".

use std::collections::BTreeSet;

use crate::symbol::SymbolId;

/// Which symbols a statement range reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFlowFacts {
    read_inside: BTreeSet<SymbolId>,
    written_inside: BTreeSet<SymbolId>,
}

impl DataFlowFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read(mut self, symbol: SymbolId) -> Self {
        self.read_inside.insert(symbol);
        self
    }

    pub fn with_written(mut self, symbol: SymbolId) -> Self {
        self.written_inside.insert(symbol);
        self
    }

    pub fn is_read_inside(&self, symbol: SymbolId) -> bool {
        self.read_inside.contains(&symbol)
    }

    pub fn is_written_inside(&self, symbol: SymbolId) -> bool {
        self.written_inside.contains(&symbol)
    }

    pub fn read_inside(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.read_inside.iter().copied()
    }

    pub fn written_inside(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.written_inside.iter().copied()
    }
}
