//! Replace `default(T)` with a null literal.
//!
//! Offered only when the expression's converted type is a reference
//! type. Value types, including nullable value types, keep the `default`
//! expression; replacing them would change semantics.

use kerf_core::cancel::Cancelled;
use kerf_syntax::ast::{AstNode, DefaultExpression};
use kerf_syntax::factory;
use kerf_syntax::rewrite;

use crate::diagnostics::rule_ids;
use crate::refactor::{apply_error, EquivalenceKey, Refactoring, RefactoringContext, Registrar};

pub struct ReplaceDefaultWithNull;

impl Refactoring for ReplaceDefaultWithNull {
    fn id(&self) -> crate::diagnostics::RuleId {
        rule_ids::REPLACE_DEFAULT_WITH_NULL
    }

    fn compute(
        &self,
        ctx: &RefactoringContext<'_>,
        registrar: &mut Registrar,
    ) -> Result<(), Cancelled> {
        let Some(model) = ctx.model else {
            return Ok(());
        };
        let Some(node) = ctx.tree.find_node(ctx.span, true) else {
            return Ok(());
        };
        let Some(expression) = node.first_ancestor_or_self::<DefaultExpression>() else {
            return Ok(());
        };
        // The cursor may sit inside the expression or touch either edge.
        if !expression.syntax().span().contains_or_touches(&ctx.span) {
            return Ok(());
        }
        let Some(type_node) = expression.ty() else {
            return Ok(());
        };
        if type_node.is_missing() {
            return Ok(());
        }
        let Some(converted) = model.converted_type_of(expression.syntax(), ctx.token)? else {
            return Ok(());
        };
        if !converted.is_reference_type() {
            return Ok(());
        }

        let title = format!(
            "Replace '{}' with 'null'",
            expression.syntax().text_trimmed()
        );
        let tree = ctx.tree.clone();
        let target = expression.syntax().clone();
        registrar.register(
            title,
            EquivalenceKey::new(rule_ids::REPLACE_DEFAULT_WITH_NULL),
            move |token| {
                token.checkpoint()?;
                rewrite::replace_with_trivia_from(&tree, &target, factory::null_literal)
                    .map_err(apply_error)
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerf_core::cancel::CancellationToken;
    use kerf_core::text::Span;
    use kerf_semantics::symbol::{TypeFlavor, TypeInfo};
    use kerf_semantics::table::{ModelBuilder, TableModel};
    use kerf_syntax::green::GreenNode;
    use kerf_syntax::node::SyntaxTree;
    use kerf_syntax::trivia::Trivia;

    // `x = default(T);` so the expression has surrounding trivia to keep.
    fn assignment_tree(type_name: &str) -> SyntaxTree {
        let default_expression = factory::default_expression(factory::identifier_name(type_name))
            .with_leading_trivia(vec![Trivia::block_comment("/* pre */"), Trivia::space()])
            .with_trailing_trivia(vec![Trivia::space(), Trivia::block_comment("/* post */")]);
        SyntaxTree::new(factory::expression_statement(factory::assignment(
            kerf_syntax::kind::SyntaxKind::SimpleAssignmentExpression,
            factory::identifier_name("x"),
            default_expression,
        )))
    }

    fn default_node(tree: &SyntaxTree) -> DefaultExpression {
        tree.root()
            .descendants_with_self()
            .find_map(DefaultExpression::cast)
            .unwrap()
    }

    fn model_with_converted(tree: &SyntaxTree, flavor: TypeFlavor) -> TableModel {
        let expression = default_node(tree);
        ModelBuilder::new()
            .converted(expression.syntax(), TypeInfo::new("Foo", flavor))
            .build()
    }

    fn compute(tree: &SyntaxTree, model: &TableModel, span: Span) -> Vec<crate::refactor::CandidateEdit> {
        let token = CancellationToken::new();
        let ctx = RefactoringContext {
            tree,
            span,
            model: Some(model),
            token: &token,
        };
        let mut registrar = Registrar::new();
        ReplaceDefaultWithNull.compute(&ctx, &mut registrar).unwrap();
        registrar.into_edits()
    }

    #[test]
    fn test_reference_type_offers_with_rendered_title() {
        let tree = assignment_tree("Foo");
        let model = model_with_converted(&tree, TypeFlavor::Class);
        let span = Span::empty_at(default_node(&tree).syntax().span().start);
        let edits = compute(&tree, &model, span);
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].title, "Replace 'default(Foo)' with 'null'");
    }

    #[test]
    fn test_value_type_is_not_offered() {
        let tree = assignment_tree("Foo");
        for flavor in [
            TypeFlavor::Struct,
            TypeFlavor::Primitive,
            TypeFlavor::NullableValue,
            TypeFlavor::Enum,
        ] {
            let model = model_with_converted(&tree, flavor);
            let span = Span::empty_at(default_node(&tree).syntax().span().start);
            assert!(compute(&tree, &model, span).is_empty(), "{flavor:?}");
        }
    }

    #[test]
    fn test_unresolved_type_is_not_offered() {
        let tree = assignment_tree("Foo");
        let model = ModelBuilder::new().build();
        let span = Span::empty_at(default_node(&tree).syntax().span().start);
        assert!(compute(&tree, &model, span).is_empty());
    }

    #[test]
    fn test_missing_type_argument_is_not_offered() {
        let default_expression = factory::node(
            kerf_syntax::kind::SyntaxKind::DefaultExpression,
            vec![
                factory::token(kerf_syntax::kind::SyntaxKind::DefaultKeyword, "default").into(),
                factory::open_paren().into(),
                GreenNode::missing(kerf_syntax::kind::SyntaxKind::IdentifierName).into(),
                factory::close_paren().into(),
            ],
        );
        let tree = SyntaxTree::new(factory::expression_statement(default_expression));
        let expression = default_node(&tree);
        let model = ModelBuilder::new()
            .converted(expression.syntax(), TypeInfo::new("Foo", TypeFlavor::Class))
            .build();
        let span = Span::empty_at(expression.syntax().span().start);
        assert!(compute(&tree, &model, span).is_empty());
    }

    #[test]
    fn test_apply_preserves_surrounding_trivia() {
        let tree = assignment_tree("Foo");
        let model = model_with_converted(&tree, TypeFlavor::Class);
        let span = Span::empty_at(default_node(&tree).syntax().span().start);
        let mut edits = compute(&tree, &model, span);
        let edit = edits.pop().unwrap();

        let before = tree.text();
        assert_eq!(before, "x = /* pre */ default(Foo) /* post */;\n");
        let after = edit.apply(&CancellationToken::new()).unwrap();
        assert_eq!(after.text(), "x = /* pre */ null /* post */;\n");
        // The original snapshot is untouched.
        assert_eq!(tree.text(), before);
    }
}
