//! Semantic model seam and semantic queries for kerf.
//!
//! The host compiler front end owns binding and type resolution; kerf
//! consumes them through the [`SemanticModel`] trait. A model is valid for
//! exactly one tree snapshot — queries answer by node position within that
//! snapshot.
//!
//! Everything here **fails closed**: an unresolved symbol, an error type,
//! or an ambiguous binding answers `None`/`false`, never a guess. Rules
//! must not transform code whose semantics they cannot prove.
//!
//! [`TableModel`] is a ready-made implementation backed by span-keyed
//! tables, used by hosts that precompute bindings and by the kerf test
//! suites.

pub mod facts;
pub mod model;
pub mod queries;
pub mod symbol;
pub mod table;

pub use facts::DataFlowFacts;
pub use model::{QueryResult, SemanticModel};
pub use symbol::{Symbol, SymbolId, SymbolKind, TypeFlavor, TypeInfo};
pub use table::{ModelBuilder, TableModel};
