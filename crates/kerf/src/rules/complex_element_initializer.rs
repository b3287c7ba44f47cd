//! Two-element dictionary-style initializer entry.
//!
//! An initializer entry written as a bracketed pair, `{ key, value }`, is
//! the legacy two-argument add pattern and can be re-expressed with
//! indexer syntax. Only the exact two-element shape matches; one or
//! three-plus elements never do.

use kerf_core::cancel::Cancelled;
use kerf_syntax::ast::{AstNode, InitializerExpression};
use kerf_syntax::kind::SyntaxKind;
use kerf_syntax::node::SyntaxNode;
use kerf_syntax::query;

use crate::analyzer::{DiagnosticRule, RuleContext};
use crate::diagnostics::{rule_ids, Diagnostics, RuleId};

pub struct CollectionInitializerPair;

impl DiagnosticRule for CollectionInitializerPair {
    fn id(&self) -> RuleId {
        rule_ids::COLLECTION_INITIALIZER_PAIR
    }

    fn triggers(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ComplexElementInitializerExpression]
    }

    fn check(
        &self,
        node: &SyntaxNode,
        _ctx: &RuleContext<'_>,
        out: &mut Diagnostics,
    ) -> Result<(), Cancelled> {
        let Some(initializer) = InitializerExpression::cast(node.clone()) else {
            debug_assert!(false, "triggered on a non-initializer node");
            return Ok(());
        };
        if initializer.expressions().len() != 2 {
            return Ok(());
        }
        if query::span_contains_directives(node) {
            return Ok(());
        }
        out.report(self.id(), node.span(), self.severity());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerf_core::cancel::CancellationToken;
    use kerf_semantics::table::ModelBuilder;
    use kerf_syntax::factory;
    use kerf_syntax::green::GreenNode;
    use kerf_syntax::node::SyntaxTree;
    use kerf_syntax::trivia::Trivia;

    fn entry(count: usize) -> GreenNode {
        let expressions = (0..count)
            .map(|i| factory::numeric_literal(&i.to_string()))
            .collect();
        factory::complex_element_initializer(expressions)
    }

    fn run(green: GreenNode) -> usize {
        let tree = SyntaxTree::new(green);
        let ctx = RuleContext {
            model: &ModelBuilder::new().build(),
            token: &CancellationToken::new(),
        };
        let mut out = Diagnostics::new();
        CollectionInitializerPair
            .check(&tree.root(), &ctx, &mut out)
            .unwrap();
        out.len()
    }

    #[test]
    fn test_flagged_iff_exactly_two_elements() {
        for count in 0..6 {
            let expected = usize::from(count == 2);
            assert_eq!(run(entry(count)), expected, "arity {count}");
        }
    }

    #[test]
    fn test_directive_in_span_suppresses() {
        let key = factory::string_literal("\"k\"")
            .with_leading_trivia(vec![Trivia::directive("#if DEBUG\n")]);
        let green = factory::complex_element_initializer(vec![
            key,
            factory::numeric_literal("1"),
        ]);
        assert_eq!(run(green), 0);
    }
}
