//! Structural predicates over syntax nodes.
//!
//! These are the pure building blocks every rule starts from. They never
//! fail: malformed input answers `false`/`None`.

use crate::ast::{AstNode, Block};
use crate::kind::SyntaxKind;
use crate::node::SyntaxNode;

/// Whether `node` is a parser-error placeholder. Every rule short-circuits
/// to "not applicable" on missing nodes.
pub fn is_missing(node: &SyntaxNode) -> bool {
    node.is_missing()
}

/// Whether `node` is a block containing exactly one statement.
pub fn is_block_with_single_statement(node: &SyntaxNode) -> bool {
    single_block_statement(node).is_some()
}

/// The single statement of a one-statement block, if that is what `node`
/// is.
pub fn single_block_statement(node: &SyntaxNode) -> Option<SyntaxNode> {
    let block = Block::cast(node.clone())?;
    let statements = block.statements();
    if statements.len() == 1 {
        statements.into_iter().next()
    } else {
        None
    }
}

/// A statement with single-statement blocks unwrapped: `{ x; }` answers
/// `x;`, anything else answers itself.
pub fn effective_statement(statement: &SyntaxNode) -> SyntaxNode {
    single_block_statement(statement).unwrap_or_else(|| statement.clone())
}

/// Whether a statement can legally stand alone in embedded (unbraced)
/// position. Local declarations and labeled statements cannot.
pub fn supports_embedded_form(statement: &SyntaxNode) -> bool {
    let effective = effective_statement(statement);
    // A multi-statement block unwraps to itself and is disqualified here:
    // it cannot become a single embedded statement.
    if effective.kind() == SyntaxKind::Block {
        return false;
    }
    !matches!(
        effective.kind(),
        SyntaxKind::LocalDeclarationStatement | SyntaxKind::LabeledStatement
    )
}

/// Whether any preprocessor directive falls within `node`'s span (its own
/// leading and trailing trivia excluded).
///
/// An edit across a directive could silently change which code is active,
/// so every rule gates on this before reporting.
pub fn span_contains_directives(node: &SyntaxNode) -> bool {
    node.descendant_trivia_in_range(node.span())
        .iter()
        .any(|t| t.is_directive())
}
