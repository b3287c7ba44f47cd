//! A span-keyed [`SemanticModel`] implementation.
//!
//! `TableModel` answers queries from tables keyed by node span. It backs
//! two callers: hosts that precompute bindings for a snapshot and hand
//! them to kerf wholesale, and the kerf test suites, which build models
//! with [`ModelBuilder`] alongside factory-built trees.
//!
//! Lookups miss (and therefore fail closed) for any node the tables do
//! not cover.

use std::collections::HashMap;

use kerf_core::cancel::CancellationToken;
use kerf_core::text::Span;
use kerf_syntax::node::SyntaxNode;

use crate::facts::DataFlowFacts;
use crate::model::{QueryResult, SemanticModel};
use crate::symbol::{Symbol, TypeInfo};

/// Span-keyed semantic tables for one tree snapshot.
#[derive(Debug, Default)]
pub struct TableModel {
    symbols: HashMap<Span, Symbol>,
    types: HashMap<Span, TypeInfo>,
    converted_types: HashMap<Span, TypeInfo>,
    constants: HashMap<Span, bool>,
    methods: HashMap<Span, Symbol>,
    events: HashMap<Span, bool>,
    flows: HashMap<Span, DataFlowFacts>,
}

impl SemanticModel for TableModel {
    fn declared_symbol(
        &self,
        declarator: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<Option<Symbol>> {
        token.checkpoint()?;
        Ok(self.symbols.get(&declarator.span()).cloned())
    }

    fn type_of(
        &self,
        node: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<Option<TypeInfo>> {
        token.checkpoint()?;
        Ok(self.types.get(&node.span()).cloned())
    }

    fn converted_type_of(
        &self,
        node: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<Option<TypeInfo>> {
        token.checkpoint()?;
        match self.converted_types.get(&node.span()) {
            Some(ty) => Ok(Some(ty.clone())),
            None => self.type_of(node, token),
        }
    }

    fn has_constant_value(
        &self,
        declarator: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<bool> {
        token.checkpoint()?;
        Ok(self.constants.get(&declarator.span()).copied().unwrap_or(false))
    }

    fn method_symbol(
        &self,
        expression: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<Option<Symbol>> {
        token.checkpoint()?;
        Ok(self.methods.get(&expression.span()).cloned())
    }

    fn is_event(
        &self,
        expression: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<bool> {
        token.checkpoint()?;
        Ok(self.events.get(&expression.span()).copied().unwrap_or(false))
    }

    fn analyze_data_flow(
        &self,
        first: &SyntaxNode,
        last: &SyntaxNode,
        token: &CancellationToken,
    ) -> QueryResult<Option<DataFlowFacts>> {
        token.checkpoint()?;
        let range = Span::new(first.span().start, last.span().end.max(first.span().start));
        Ok(self.flows.get(&range).cloned())
    }
}

/// Builder for [`TableModel`].
///
/// All registration methods key by the node's `span()` (trivia excluded).
#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: TableModel,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the symbol declared at a declarator.
    pub fn symbol(mut self, node: &SyntaxNode, symbol: Symbol) -> Self {
        self.model.symbols.insert(node.span(), symbol);
        self
    }

    /// Register the type of an expression or type-name node.
    pub fn typed(mut self, node: &SyntaxNode, ty: TypeInfo) -> Self {
        self.model.types.insert(node.span(), ty);
        self
    }

    /// Register a use-site converted type distinct from the natural type.
    pub fn converted(mut self, node: &SyntaxNode, ty: TypeInfo) -> Self {
        self.model.converted_types.insert(node.span(), ty);
        self
    }

    /// Mark a declarator's initializer as compile-time constant.
    pub fn constant(mut self, declarator: &SyntaxNode) -> Self {
        self.model.constants.insert(declarator.span(), true);
        self
    }

    /// Register the method a method-group expression resolves to.
    pub fn method(mut self, expression: &SyntaxNode, symbol: Symbol) -> Self {
        self.model.methods.insert(expression.span(), symbol);
        self
    }

    /// Mark an expression as binding to an event member.
    pub fn event(mut self, expression: &SyntaxNode) -> Self {
        self.model.events.insert(expression.span(), true);
        self
    }

    /// Register data-flow facts for the statement range `first..=last`.
    pub fn flow(mut self, first: &SyntaxNode, last: &SyntaxNode, facts: DataFlowFacts) -> Self {
        let range = Span::new(first.span().start, last.span().end);
        self.model.flows.insert(range, facts);
        self
    }

    pub fn build(self) -> TableModel {
        self.model
    }
}
