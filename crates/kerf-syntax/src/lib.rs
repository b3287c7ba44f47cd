//! Immutable C# syntax trees for kerf.
//!
//! This crate owns the tree representation the analysis engine works on:
//!
//! - **Green layer** ([`green`]): position-independent immutable nodes and
//!   tokens with owned trivia and structural sharing.
//! - **Red layer** ([`node`]): position-aware cursors with parents, spans,
//!   and host cursor mapping ([`SyntaxTree::find_node`]).
//! - **Typed views** ([`ast`]): kind-checked wrappers with shape-specific
//!   accessors.
//! - **Factory** ([`factory`]): construction helpers for replacement
//!   subtrees and test fixtures.
//! - **Queries** ([`query`]): the structural predicates rules start from.
//! - **Rewrite engine** ([`rewrite`]): atomic tree edits with trivia
//!   transfer.
//! - **Chain analysis** ([`chain`]): if/else-if/else bracing properties.
//!
//! Parsing is a host concern: a front end hands kerf a green tree (possibly
//! containing missing nodes for malformed input) and the matching source
//! text. Rendering back to text goes through [`Codegen`].
//!
//! # Quick start
//!
//! ```
//! use kerf_syntax::{factory, Codegen, SyntaxTree};
//!
//! let green = factory::expression_statement(factory::identifier_name("x"));
//! let tree = SyntaxTree::new(green);
//! assert_eq!(tree.text(), "x;\n");
//! assert_eq!(tree.root().text(), tree.green_root().to_source());
//! ```

pub mod ast;
pub mod chain;
pub mod codegen;
pub mod factory;
pub mod green;
pub mod kind;
pub mod node;
pub mod query;
pub mod rewrite;
pub mod trivia;

pub use ast::AstNode;
pub use codegen::{Codegen, CodegenState};
pub use green::{Annotation, GreenElement, GreenNode, GreenToken};
pub use kind::SyntaxKind;
pub use node::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTree};
pub use rewrite::RewriteError;
pub use trivia::{Trivia, TriviaKind};

// Span is defined in kerf-core; re-exported here for convenience.
pub use kerf_core::text::Span;
