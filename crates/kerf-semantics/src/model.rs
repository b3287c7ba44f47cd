//! The semantic model seam.
//!
//! A [`SemanticModel`] is the read-only query surface over the host
//! binder's knowledge for one tree snapshot. Obtaining one may be
//! expensive on the host side; every query is therefore cancellable, and
//! a cancelled query aborts the whole rule evaluation via `?`.
//!
//! Implementations answer by node position: the nodes handed in must come
//! from the snapshot the model was built for. A query about any other
//! node resolves to nothing, which rules treat as "not applicable".

use kerf_core::cancel::{CancellationToken, Cancelled};
use kerf_syntax::node::SyntaxNode;

use crate::facts::DataFlowFacts;
use crate::symbol::{Symbol, TypeInfo};

/// Result of a cancellable semantic query.
pub type QueryResult<T> = Result<T, Cancelled>;

/// Read-only binding/type queries for one tree snapshot.
///
/// Every method fails closed: `None`/`false` when the host cannot resolve
/// the node, and `Err(Cancelled)` when the host cancelled the analysis.
pub trait SemanticModel {
    /// The symbol declared by a variable declarator.
    fn declared_symbol(
        &self,
        declarator: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<Option<Symbol>>;

    /// The type of an expression or type-name node.
    fn type_of(
        &self,
        node: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<Option<TypeInfo>>;

    /// The type of an expression after implicit conversion at its use
    /// site. Falls back to [`type_of`](Self::type_of) when no conversion
    /// applies.
    fn converted_type_of(
        &self,
        node: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<Option<TypeInfo>>;

    /// Whether the declarator's initializer is a compile-time constant.
    fn has_constant_value(
        &self,
        declarator: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<bool>;

    /// The method a method-group expression resolves to, if any.
    fn method_symbol(
        &self,
        expression: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<Option<Symbol>>;

    /// Whether the expression binds to an event member (not a plain field
    /// or property of delegate type).
    fn is_event(
        &self,
        expression: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<bool>;

    /// Read/write facts for the statement range `first..=last` (both in
    /// the same block). `None` when the host's analysis did not succeed.
    fn analyze_data_flow(
        &self,
        first: &SyntaxNode,
        last: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<Option<DataFlowFacts>>;
}
