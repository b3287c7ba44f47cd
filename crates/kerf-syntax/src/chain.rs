//! If/else-if/else chain analysis.
//!
//! A chain is the linked sequence starting at a root `if`: each `else`
//! whose statement is another `if` continues the chain; a terminal `else`
//! (or no `else`) ends it. The analyzer computes chain-wide bracing
//! properties that drive the "unify bracing style" diagnostics and
//! refactorings.
//!
//! The walk is an explicit loop over a materialized branch list, never
//! recursion: deep chains are linear, not stack-bound.

use crate::ast::{AstNode, ElseClause, IfStatement};
use crate::kind::SyntaxKind;
use crate::node::SyntaxNode;
use crate::query;

/// One branch of a chain: the root `if`, a continuation `if` reached via
/// `else`, or the terminal `else` clause.
#[derive(Debug, Clone)]
pub struct Branch {
    node: SyntaxNode,
}

impl Branch {
    /// The branch's statement: the `if` body or the `else` body.
    pub fn statement(&self) -> Option<SyntaxNode> {
        match self.node.kind() {
            SyntaxKind::IfStatement => IfStatement::cast(self.node.clone())?.statement(),
            SyntaxKind::ElseClause => ElseClause::cast(self.node.clone())?.statement(),
            _ => None,
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.node
    }
}

/// The materialized branch sequence of a conditional chain.
#[derive(Debug)]
pub struct Chain {
    branches: Vec<Branch>,
}

impl Chain {
    /// Collect the chain rooted at `if_statement`.
    ///
    /// The result always has at least one branch (the root `if`).
    pub fn collect(if_statement: &IfStatement) -> Chain {
        let mut branches = vec![Branch {
            node: if_statement.syntax().clone(),
        }];
        let mut current = if_statement.clone();
        while let Some(else_clause) = current.else_clause() {
            match else_clause.statement().and_then(IfStatement::cast) {
                Some(next_if) => {
                    // else-if: the nested if is the next branch.
                    branches.push(Branch {
                        node: next_if.syntax().clone(),
                    });
                    current = next_if;
                }
                None => {
                    // Terminal else (or malformed clause): last branch.
                    branches.push(Branch {
                        node: else_clause.syntax().clone(),
                    });
                    break;
                }
            }
        }
        Chain { branches }
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

/// Chain-wide bracing properties.
///
/// Both flags stay `false` for single-branch chains: a lone `if` is
/// restyled by other rules, not by chain unification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainAnalysis {
    /// Some branch uses an embedded (unbraced) statement; offering "add
    /// braces across the chain" makes the chain uniform.
    pub replace_embedded_with_block: bool,
    /// Some branch uses a block, and every branch's effective statement
    /// could legally stand embedded; offering "remove braces across the
    /// chain" makes the chain uniform.
    pub replace_block_with_embedded: bool,
}

impl ChainAnalysis {
    /// Analyze a collected chain.
    pub fn analyze(chain: &Chain) -> ChainAnalysis {
        let mut any_embedded = false;
        let mut any_block = false;
        let mut all_support_embedded = true;

        for branch in chain.branches() {
            let Some(statement) = branch.statement() else {
                // A branch with no statement is malformed input; the chain
                // cannot be restyled safely.
                return ChainAnalysis::default();
            };

            if statement.kind() != SyntaxKind::Block {
                any_embedded = true;
            } else {
                any_block = true;
            }

            if all_support_embedded && !query::supports_embedded_form(&statement) {
                all_support_embedded = false;
            }
        }

        if chain.len() <= 1 {
            return ChainAnalysis::default();
        }

        ChainAnalysis {
            replace_embedded_with_block: any_embedded,
            replace_block_with_embedded: any_block && all_support_embedded,
        }
    }
}
