//! Source-analysis engine: diagnostic rules, refactorings, and code
//! fixes over immutable syntax snapshots.
//!
//! ## Architecture
//!
//! - [`analyzer`] walks a tree once and dispatches nodes to the
//!   [`rules`], gated by a [`filter::RuleFilter`]; findings land in a
//!   [`diagnostics::Diagnostics`] sink.
//! - [`refactor`] computes [`refactor::CandidateEdit`]s for a cursor
//!   span via the [`refactorings`]; each candidate carries a title, a
//!   stable equivalence key, and a deferred apply function.
//! - [`fixes`] turns reported diagnostics into the same candidate
//!   shape, sharing applicability logic with the refactorings.
//!
//! Everything is read-only over the snapshot: applying an edit yields a
//! new tree and never touches the old one. Cancellation is cooperative
//! and all-or-nothing; a cancelled run produces no partial output.
//!
//! ## Example
//!
//! ```
//! use kerf::analyzer::Analyzer;
//! use kerf::filter::RuleFilter;
//! use kerf_core::cancel::CancellationToken;
//! use kerf_semantics::table::ModelBuilder;
//! use kerf_syntax::{factory, node::SyntaxTree};
//!
//! let tree = SyntaxTree::new(factory::complex_element_initializer(vec![
//!     factory::string_literal("\"key\""),
//!     factory::numeric_literal("1"),
//! ]));
//! let model = ModelBuilder::new().build();
//! let diagnostics = Analyzer::with_default_rules()
//!     .analyze(&tree, &model, &RuleFilter::all_enabled(), &CancellationToken::new())
//!     .unwrap();
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].rule.as_str(), "collection-initializer-pair");
//! ```

pub mod analyzer;
pub mod diagnostics;
pub mod filter;
pub mod fixes;
pub mod refactor;
pub mod refactorings;
pub mod rules;

pub use analyzer::{Analyzer, DiagnosticRule, RuleContext};
pub use diagnostics::{rule_ids, Diagnostic, Diagnostics, RuleId, Severity};
pub use filter::RuleFilter;
pub use fixes::{CodeFixProvider, FixContext, FixEngine};
pub use refactor::{
    CandidateEdit, EquivalenceKey, Refactoring, RefactoringContext, RefactoringEngine, Registrar,
};
