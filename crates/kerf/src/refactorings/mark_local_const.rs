//! Mark a local variable as `const`.
//!
//! Offered for a non-const local declaration directly inside a block,
//! with at least one statement after it, whose declared type supports
//! constant values, whose every initializer is a compile-time constant,
//! and whose every declared symbol is read but never written in the
//! statements that follow. All conditions are conjunctive; any
//! uncertainty makes the candidate unavailable.
//!
//! Execution happens in two steps: an inferred `var` type is replaced
//! with the resolved explicit type name (annotated for the host's
//! simplifier), then the `const` modifier is inserted after any existing
//! modifiers. When it becomes the first token it inherits the
//! declaration's original leading trivia so a doc comment above the
//! statement stays put.

use kerf_core::cancel::{CancellationToken, Cancelled};
use kerf_semantics::model::{QueryResult, SemanticModel};
use kerf_semantics::queries;
use kerf_syntax::ast::{AstNode, Block, LocalDeclarationStatement};
use kerf_syntax::factory;
use kerf_syntax::green::{Annotation, GreenNode, GreenToken};
use kerf_syntax::kind::SyntaxKind;
use kerf_syntax::rewrite;
use kerf_syntax::trivia::Trivia;

use crate::diagnostics::rule_ids;
use crate::refactor::{apply_error, EquivalenceKey, Refactoring, RefactoringContext, Registrar};

/// Whether the declaration satisfies every condition for `const`.
pub fn can_refactor(
    declaration: &LocalDeclarationStatement,
    model: &dyn SemanticModel,
    token: &CancellationToken,
) -> QueryResult<bool> {
    if declaration.is_const() {
        return Ok(false);
    }
    let node = declaration.syntax();
    let Some(block) = node.parent().and_then(Block::cast) else {
        return Ok(false);
    };
    let statements = block.statements();
    if statements.len() <= 1 {
        return Ok(false);
    }
    let Some(index) = statements.iter().position(|statement| statement == node) else {
        return Ok(false);
    };
    if index >= statements.len() - 1 {
        return Ok(false);
    }

    let Some(variable_declaration) = declaration.declaration() else {
        return Ok(false);
    };
    if variable_declaration.syntax().is_missing() {
        return Ok(false);
    }
    let variables = variable_declaration.variables();
    if variables.is_empty() {
        return Ok(false);
    }
    let Some(type_node) = variable_declaration.ty() else {
        return Ok(false);
    };
    if queries::constant_capable_type(model, &type_node, token)?.is_none() {
        return Ok(false);
    }
    for declarator in &variables {
        let value = declarator
            .initializer()
            .and_then(|initializer| initializer.value());
        let Some(value) = value else {
            return Ok(false);
        };
        if value.is_missing() || !model.has_constant_value(declarator.syntax(), token)? {
            return Ok(false);
        }
    }

    // statements.len() >= 2 and index < len - 1 here, so both bounds hold.
    let first = &statements[index + 1];
    let last = &statements[statements.len() - 1];
    let Some(facts) = model.analyze_data_flow(first, last, token)? else {
        return Ok(false);
    };
    for declarator in &variables {
        let Some(symbol) = model.declared_symbol(declarator.syntax(), token)? else {
            return Ok(false);
        };
        if symbol.is_error
            || facts.is_written_inside(symbol.id)
            || !facts.is_read_inside(symbol.id)
        {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Build the `const` form of the declaration.
///
/// `None` when a `var` type cannot be resolved to an explicit name.
pub fn build_const_declaration(
    declaration: &LocalDeclarationStatement,
    model: &dyn SemanticModel,
    token: &CancellationToken,
) -> QueryResult<Option<GreenNode>> {
    let node = declaration.syntax();
    let mut green = node.green().clone();

    let Some(variable_declaration) = declaration.declaration() else {
        return Ok(None);
    };
    if variable_declaration.is_var() {
        let Some(type_node) = variable_declaration.ty() else {
            return Ok(None);
        };
        let Some(ty) = model.type_of(&type_node, token)? else {
            return Ok(None);
        };
        if ty.is_error() {
            return Ok(None);
        }
        let explicit = factory::identifier_name(&ty.name)
            .with_annotation(Annotation::Simplify)
            .with_leading_trivia(type_node.green().leading_trivia())
            .with_trailing_trivia(type_node.green().trailing_trivia());
        let new_declaration = variable_declaration
            .syntax()
            .green()
            .replace_child(type_node.index_in_parent(), explicit.into());
        green = green.replace_child(
            variable_declaration.syntax().index_in_parent(),
            new_declaration.into(),
        );
    }

    // Insert `const` after any existing modifiers, right before the
    // declaration. Only when it becomes the first token does it take over
    // the statement's leading trivia.
    let insert_index = variable_declaration.syntax().index_in_parent();
    let mut const_token = GreenToken::new(SyntaxKind::ConstKeyword, "const")
        .with_trailing_trivia(vec![Trivia::space()]);
    if declaration.modifiers().is_empty() {
        const_token = const_token.with_leading_trivia(green.leading_trivia());
        green = green.with_leading_trivia(Vec::new());
    }
    Ok(Some(green.insert_child(insert_index, const_token.into())))
}

pub struct MarkLocalConstRefactoring;

impl Refactoring for MarkLocalConstRefactoring {
    fn id(&self) -> crate::diagnostics::RuleId {
        rule_ids::MARK_LOCAL_CONST
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
        let Some(declaration) = node.first_ancestor_or_self::<LocalDeclarationStatement>() else {
            return Ok(());
        };
        if !can_refactor(&declaration, model, ctx.token)? {
            return Ok(());
        }
        let Some(replacement) = build_const_declaration(&declaration, model, ctx.token)? else {
            return Ok(());
        };

        let tree = ctx.tree.clone();
        let target = declaration.syntax().clone();
        registrar.register(
            "Mark local as const",
            EquivalenceKey::new(rule_ids::MARK_LOCAL_CONST),
            move |token| {
                token.checkpoint()?;
                rewrite::replace(&tree, &target, replacement).map_err(apply_error)
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerf_semantics::facts::DataFlowFacts;
    use kerf_semantics::symbol::{Symbol, SymbolId, SymbolKind, TypeFlavor, TypeInfo};
    use kerf_semantics::table::{ModelBuilder, TableModel};
    use kerf_syntax::node::SyntaxTree;
    use kerf_syntax::Codegen;

    // { int x = 1; Use(x); }
    fn block_tree(use_var: bool) -> SyntaxTree {
        let ty = if use_var {
            factory::var_type()
        } else {
            factory::predefined_type("int")
        };
        let declaration = factory::local_declaration(
            vec![],
            factory::variable_declaration(
                ty,
                vec![factory::variable_declarator(
                    "x",
                    Some(factory::numeric_literal("1")),
                )],
            ),
        );
        let usage = factory::expression_statement(factory::identifier_name("Use"));
        SyntaxTree::new(factory::block(vec![declaration, usage]))
    }

    fn tree_parts(tree: &SyntaxTree) -> (LocalDeclarationStatement, Vec<kerf_syntax::node::SyntaxNode>) {
        let block = Block::cast(tree.root()).unwrap();
        let statements = block.statements();
        let declaration = LocalDeclarationStatement::cast(statements[0].clone()).unwrap();
        (declaration, statements)
    }

    fn const_friendly_model(tree: &SyntaxTree, facts: DataFlowFacts) -> TableModel {
        let (declaration, statements) = tree_parts(tree);
        let variable_declaration = declaration.declaration().unwrap();
        let type_node = variable_declaration.ty().unwrap();
        let declarator = &variable_declaration.variables()[0];
        ModelBuilder::new()
            .typed(&type_node, TypeInfo::new("int", TypeFlavor::Primitive))
            .constant(declarator.syntax())
            .symbol(
                declarator.syntax(),
                Symbol::new(SymbolId(1), "x", SymbolKind::Local),
            )
            .flow(&statements[1], &statements[statements.len() - 1], facts)
            .build()
    }

    #[test]
    fn test_read_only_local_is_offered() {
        let tree = block_tree(false);
        let model =
            const_friendly_model(&tree, DataFlowFacts::new().with_read(SymbolId(1)));
        let (declaration, _) = tree_parts(&tree);
        assert!(can_refactor(&declaration, &model, &CancellationToken::new()).unwrap());
    }

    #[test]
    fn test_written_local_is_not_offered() {
        let tree = block_tree(false);
        let model = const_friendly_model(
            &tree,
            DataFlowFacts::new()
                .with_read(SymbolId(1))
                .with_written(SymbolId(1)),
        );
        let (declaration, _) = tree_parts(&tree);
        assert!(!can_refactor(&declaration, &model, &CancellationToken::new()).unwrap());
    }

    #[test]
    fn test_unread_local_is_not_offered() {
        let tree = block_tree(false);
        let model = const_friendly_model(&tree, DataFlowFacts::new());
        let (declaration, _) = tree_parts(&tree);
        assert!(!can_refactor(&declaration, &model, &CancellationToken::new()).unwrap());
    }

    #[test]
    fn test_last_statement_is_not_offered() {
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
        let tree = SyntaxTree::new(factory::block(vec![declaration]));
        let (declaration, _) = tree_parts(&tree);
        let model = ModelBuilder::new().build();
        assert!(!can_refactor(&declaration, &model, &CancellationToken::new()).unwrap());
    }

    #[test]
    fn test_non_constant_initializer_is_not_offered() {
        let tree = block_tree(false);
        let (declaration, statements) = tree_parts(&tree);
        let variable_declaration = declaration.declaration().unwrap();
        let type_node = variable_declaration.ty().unwrap();
        let declarator = &variable_declaration.variables()[0];
        // No `constant` fact for the declarator.
        let model = ModelBuilder::new()
            .typed(&type_node, TypeInfo::new("int", TypeFlavor::Primitive))
            .symbol(
                declarator.syntax(),
                Symbol::new(SymbolId(1), "x", SymbolKind::Local),
            )
            .flow(
                &statements[1],
                &statements[statements.len() - 1],
                DataFlowFacts::new().with_read(SymbolId(1)),
            )
            .build();
        assert!(!can_refactor(&declaration, &model, &CancellationToken::new()).unwrap());
    }

    #[test]
    fn test_const_build_prepends_modifier() {
        let tree = block_tree(false);
        let model =
            const_friendly_model(&tree, DataFlowFacts::new().with_read(SymbolId(1)));
        let (declaration, _) = tree_parts(&tree);
        let token = CancellationToken::new();
        let replacement = build_const_declaration(&declaration, &model, &token)
            .unwrap()
            .unwrap();
        assert!(replacement.to_source().starts_with("const int x = 1;"));
    }

    #[test]
    fn test_var_becomes_explicit_type() {
        let tree = block_tree(true);
        let model =
            const_friendly_model(&tree, DataFlowFacts::new().with_read(SymbolId(1)));
        let (declaration, _) = tree_parts(&tree);
        let token = CancellationToken::new();
        let replacement = build_const_declaration(&declaration, &model, &token)
            .unwrap()
            .unwrap();
        assert!(replacement.to_source().starts_with("const int x = 1;"));
    }

    #[test]
    fn test_const_follows_existing_modifiers() {
        let declaration = factory::local_declaration(
            vec![factory::token_spaced(SyntaxKind::StaticKeyword, "static")],
            factory::variable_declaration(
                factory::predefined_type("int"),
                vec![factory::variable_declarator(
                    "x",
                    Some(factory::numeric_literal("1")),
                )],
            ),
        )
        .with_leading_trivia(vec![Trivia::line_comment("// limit\n")]);
        let usage = factory::expression_statement(factory::identifier_name("Use"));
        let tree = SyntaxTree::new(factory::block(vec![declaration, usage]));
        let model =
            const_friendly_model(&tree, DataFlowFacts::new().with_read(SymbolId(1)));
        let (declaration, _) = tree_parts(&tree);
        let replacement =
            build_const_declaration(&declaration, &model, &CancellationToken::new())
                .unwrap()
                .unwrap();
        // `const` slots in after the modifier; the comment stays on `static`.
        assert!(replacement
            .to_source()
            .starts_with("// limit\nstatic const int x = 1;"));
    }

    #[test]
    fn test_leading_trivia_moves_to_const_keyword() {
        let declaration = factory::local_declaration(
            vec![],
            factory::variable_declaration(
                factory::predefined_type("int"),
                vec![factory::variable_declarator(
                    "x",
                    Some(factory::numeric_literal("1")),
                )],
            ),
        )
        .with_leading_trivia(vec![Trivia::line_comment("// limit\n")]);
        let usage = factory::expression_statement(factory::identifier_name("Use"));
        let tree = SyntaxTree::new(factory::block(vec![declaration, usage]));
        let model =
            const_friendly_model(&tree, DataFlowFacts::new().with_read(SymbolId(1)));
        let (declaration, _) = tree_parts(&tree);
        let replacement =
            build_const_declaration(&declaration, &model, &CancellationToken::new())
                .unwrap()
                .unwrap();
        assert!(replacement.to_source().starts_with("// limit\nconst int x = 1;"));
    }
}
