//! Local variable that could be declared `const`.
//!
//! The applicability check is shared with the refactoring of the same
//! name; the rule surfaces the opportunity as a diagnostic so the fix
//! provider can offer it without a cursor.

use kerf_core::cancel::Cancelled;
use kerf_syntax::ast::{AstNode, LocalDeclarationStatement};
use kerf_syntax::kind::SyntaxKind;
use kerf_syntax::node::SyntaxNode;

use crate::analyzer::{DiagnosticRule, RuleContext};
use crate::diagnostics::{rule_ids, Diagnostics, RuleId};
use crate::refactorings::mark_local_const::can_refactor;

pub struct MarkLocalConst;

impl DiagnosticRule for MarkLocalConst {
    fn id(&self) -> RuleId {
        rule_ids::MARK_LOCAL_CONST
    }

    fn triggers(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::LocalDeclarationStatement]
    }

    fn check(
        &self,
        node: &SyntaxNode,
        ctx: &RuleContext<'_>,
        out: &mut Diagnostics,
    ) -> Result<(), Cancelled> {
        let Some(declaration) = LocalDeclarationStatement::cast(node.clone()) else {
            debug_assert!(false, "triggered on a non-declaration node");
            return Ok(());
        };
        if can_refactor(&declaration, ctx.model, ctx.token)? {
            out.report(self.id(), node.span(), self.severity());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerf_core::cancel::CancellationToken;
    use kerf_semantics::facts::DataFlowFacts;
    use kerf_semantics::symbol::{Symbol, SymbolId, SymbolKind, TypeFlavor, TypeInfo};
    use kerf_semantics::table::ModelBuilder;
    use kerf_syntax::ast::Block;
    use kerf_syntax::factory;
    use kerf_syntax::node::SyntaxTree;

    #[test]
    fn test_const_candidate_is_reported() {
        let declaration = factory::local_declaration(
            vec![],
            factory::variable_declaration(
                factory::predefined_type("int"),
                vec![factory::variable_declarator(
                    "x",
                    Some(factory::numeric_literal("1")),
                )],
            ),
        );
        let usage = factory::expression_statement(factory::identifier_name("Use"));
        let tree = SyntaxTree::new(factory::block(vec![declaration, usage]));

        let block = Block::cast(tree.root()).unwrap();
        let statements = block.statements();
        let declaration = LocalDeclarationStatement::cast(statements[0].clone()).unwrap();
        let variable_declaration = declaration.declaration().unwrap();
        let declarator = &variable_declaration.variables()[0];
        let model = ModelBuilder::new()
            .typed(
                &variable_declaration.ty().unwrap(),
                TypeInfo::new("int", TypeFlavor::Primitive),
            )
            .constant(declarator.syntax())
            .symbol(
                declarator.syntax(),
                Symbol::new(SymbolId(1), "x", SymbolKind::Local),
            )
            .flow(
                &statements[1],
                &statements[1],
                DataFlowFacts::new().with_read(SymbolId(1)),
            )
            .build();

        let ctx = RuleContext {
            model: &model,
            token: &CancellationToken::new(),
        };
        let mut out = Diagnostics::new();
        MarkLocalConst
            .check(declaration.syntax(), &ctx, &mut out)
            .unwrap();
        assert_eq!(out.len(), 1);
    }
}
