//! End-to-end tests: analyzer, refactoring engine, and fix engine
//! driving real edits over one snapshot.
//!
//! Semantic facts are supplied through the span-keyed table model, the
//! same seam a host binder would fill.

use itertools::Itertools;
use kerf::{Analyzer, Diagnostic, FixEngine, RefactoringEngine, RuleFilter};
use kerf_core::cancel::CancellationToken;
use kerf_core::text::Span;
use kerf_semantics::facts::DataFlowFacts;
use kerf_semantics::symbol::{Symbol, SymbolId, SymbolKind, TypeFlavor, TypeInfo};
use kerf_semantics::table::{ModelBuilder, TableModel};
use kerf_syntax::ast::{
    AssignmentExpression, AstNode, Block, DefaultExpression, LocalDeclarationStatement,
    ObjectCreationExpression,
};
use kerf_syntax::factory;
use kerf_syntax::green::Annotation;
use kerf_syntax::kind::SyntaxKind;
use kerf_syntax::node::SyntaxTree;

fn analyze(tree: &SyntaxTree, model: &TableModel) -> Vec<Diagnostic> {
    Analyzer::with_default_rules()
        .analyze(
            tree,
            model,
            &RuleFilter::all_enabled(),
            &CancellationToken::new(),
        )
        .unwrap()
}

// ---------------------------------------------------------------------------
// collection-initializer-pair
// ---------------------------------------------------------------------------

#[test]
fn initializer_entry_flagged_only_at_arity_two() {
    for arity in 0..6 {
        let expressions = (0..arity)
            .map(|i| factory::numeric_literal(&i.to_string()))
            .collect();
        let tree = SyntaxTree::new(factory::collection_initializer(vec![
            factory::complex_element_initializer(expressions),
        ]));
        let diagnostics = analyze(&tree, &ModelBuilder::new().build());
        assert_eq!(diagnostics.len(), usize::from(arity == 2), "arity {arity}");
    }
}

#[test]
fn analysis_never_mutates_the_snapshot() {
    let tree = SyntaxTree::new(factory::collection_initializer(vec![
        factory::complex_element_initializer(vec![
            factory::string_literal("\"k\""),
            factory::numeric_literal("1"),
        ]),
    ]));
    let before = tree.text();
    for _ in 0..2 {
        let _ = analyze(&tree, &ModelBuilder::new().build());
        assert_eq!(tree.text(), before);
    }
}

// ---------------------------------------------------------------------------
// remove-empty-destructor
// ---------------------------------------------------------------------------

#[test]
fn empty_destructor_flagged_and_removed() {
    let class = factory::class_declaration(
        "Widget",
        vec![
            factory::destructor("Widget", Some(factory::block(vec![]))),
            factory::destructor(
                "Widget2",
                Some(factory::block(vec![factory::expression_statement(
                    factory::identifier_name("Dispose"),
                )])),
            ),
        ],
    );
    let tree = SyntaxTree::new(class);
    let model = ModelBuilder::new().build();

    let diagnostics = analyze(&tree, &model);
    assert_eq!(
        diagnostics.iter().map(|d| d.rule.as_str()).collect_vec(),
        vec!["remove-empty-destructor"]
    );

    let mut fixes = FixEngine::with_default_providers()
        .compute(&tree, &diagnostics, None, &CancellationToken::new())
        .unwrap();
    assert_eq!(fixes.len(), 1);
    let after = fixes
        .pop()
        .unwrap()
        .apply(&CancellationToken::new())
        .unwrap();
    assert!(!after.text().contains("~Widget()"));
    assert!(after.text().contains("~Widget2()"));

    // The fixed tree no longer reports the diagnostic.
    assert!(analyze(&after, &model).is_empty());
}

#[test]
fn bodiless_destructor_is_left_alone() {
    let tree = SyntaxTree::new(factory::class_declaration(
        "Widget",
        vec![factory::destructor("Widget", None)],
    ));
    assert!(analyze(&tree, &ModelBuilder::new().build()).is_empty());
}

// ---------------------------------------------------------------------------
// redundant-delegate-creation
// ---------------------------------------------------------------------------

fn subscription_tree() -> SyntaxTree {
    SyntaxTree::new(factory::expression_statement(factory::assignment(
        SyntaxKind::AddAssignmentExpression,
        factory::identifier_name("myEvent"),
        factory::object_creation(
            factory::identifier_name("EventHandler"),
            vec![factory::identifier_name("OnClick")],
        ),
    )))
}

fn subscription_model(tree: &SyntaxTree) -> TableModel {
    let assignment = tree
        .root()
        .descendants_with_self()
        .find_map(AssignmentExpression::cast)
        .unwrap();
    let creation = ObjectCreationExpression::cast(assignment.right().unwrap()).unwrap();
    let method_ref = creation.argument_list().unwrap().arguments()[0]
        .expression()
        .unwrap();
    ModelBuilder::new()
        .event(&assignment.left().unwrap())
        .typed(
            &creation.ty().unwrap(),
            TypeInfo::new("EventHandler", TypeFlavor::Delegate),
        )
        .method(
            &method_ref,
            Symbol::new(SymbolId(10), "OnClick", SymbolKind::Method),
        )
        .build()
}

#[test]
fn delegate_wrapper_flagged_fixed_and_not_reflagged() {
    let tree = subscription_tree();
    assert_eq!(tree.text(), "myEvent += new EventHandler(OnClick);\n");
    let model = subscription_model(&tree);

    let diagnostics = analyze(&tree, &model);
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.rule.as_str(), "redundant-delegate-creation");

    let source = tree.text();
    let faded = diagnostic
        .fade_out
        .iter()
        .map(|span| &source[span.start as usize..span.end as usize])
        .collect_vec();
    assert_eq!(faded, vec!["new", "EventHandler", "(", ")"]);

    let mut fixes = FixEngine::with_default_providers()
        .compute(&tree, &diagnostics, None, &CancellationToken::new())
        .unwrap();
    assert_eq!(fixes.len(), 1);
    let after = fixes
        .pop()
        .unwrap()
        .apply(&CancellationToken::new())
        .unwrap();

    // The space once trailing the `new` keyword survives as leading
    // trivia of the method reference; collapsing it is the host
    // formatter's job, requested through the annotation.
    assert_eq!(after.text(), "myEvent +=  OnClick;\n");
    let survivor = after
        .root()
        .descendants_with_self()
        .find(|node| node.kind() == SyntaxKind::IdentifierName && node.text_trimmed() == "OnClick")
        .unwrap();
    assert!(survivor.green().has_annotation(Annotation::Format));

    // No creation left, so re-analysis is clean.
    assert!(analyze(&after, &ModelBuilder::new().build()).is_empty());
}

#[test]
fn delegate_wrapper_requires_resolved_semantics() {
    let tree = subscription_tree();
    // No event/type/method facts at all.
    assert!(analyze(&tree, &ModelBuilder::new().build()).is_empty());
}

// ---------------------------------------------------------------------------
// mark-local-const
// ---------------------------------------------------------------------------

struct ConstScenario {
    tree: SyntaxTree,
    model: TableModel,
}

fn const_scenario(facts: DataFlowFacts, constant: bool) -> ConstScenario {
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

    let mut builder = ModelBuilder::new()
        .typed(
            &variable_declaration.ty().unwrap(),
            TypeInfo::new("int", TypeFlavor::Primitive),
        )
        .symbol(
            declarator.syntax(),
            Symbol::new(SymbolId(1), "x", SymbolKind::Local),
        )
        .flow(&statements[1], &statements[1], facts);
    if constant {
        builder = builder.constant(declarator.syntax());
    }
    ConstScenario {
        model: builder.build(),
        tree,
    }
}

fn const_candidates(scenario: &ConstScenario) -> Vec<kerf::CandidateEdit> {
    let declaration = scenario
        .tree
        .root()
        .descendants_with_self()
        .find_map(LocalDeclarationStatement::cast)
        .unwrap();
    RefactoringEngine::with_default_refactorings()
        .compute(
            &scenario.tree,
            Span::empty_at(declaration.syntax().span().start),
            Some(&scenario.model),
            &RuleFilter::all_enabled(),
            &CancellationToken::new(),
        )
        .unwrap()
}

#[test]
fn read_only_constant_local_is_offered_and_applied() {
    let scenario = const_scenario(DataFlowFacts::new().with_read(SymbolId(1)), true);
    let mut candidates = const_candidates(&scenario);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].title, "Mark local as const");

    let after = candidates
        .pop()
        .unwrap()
        .apply(&CancellationToken::new())
        .unwrap();
    assert_eq!(after.text(), "{\nconst int x = 1;\nUse;\n}");

    // Already const, so neither the rule nor the refactoring fires again.
    assert!(analyze(&after, &ModelBuilder::new().build()).is_empty());
}

#[test]
fn written_local_is_not_offered() {
    let scenario = const_scenario(
        DataFlowFacts::new()
            .with_read(SymbolId(1))
            .with_written(SymbolId(1)),
        true,
    );
    assert!(const_candidates(&scenario).is_empty());
}

#[test]
fn non_constant_initializer_is_not_offered() {
    let scenario = const_scenario(DataFlowFacts::new().with_read(SymbolId(1)), false);
    assert!(const_candidates(&scenario).is_empty());
}

#[test]
fn const_rule_and_fix_agree_with_refactoring() {
    let scenario = const_scenario(DataFlowFacts::new().with_read(SymbolId(1)), true);
    let diagnostics = analyze(&scenario.tree, &scenario.model);
    assert_eq!(
        diagnostics.iter().map(|d| d.rule.as_str()).collect_vec(),
        vec!["mark-local-const"]
    );

    let mut fixes = FixEngine::with_default_providers()
        .compute(
            &scenario.tree,
            &diagnostics,
            Some(&scenario.model),
            &CancellationToken::new(),
        )
        .unwrap();
    assert_eq!(fixes.len(), 1);
    let after = fixes
        .pop()
        .unwrap()
        .apply(&CancellationToken::new())
        .unwrap();
    assert_eq!(after.text(), "{\nconst int x = 1;\nUse;\n}");
}

// ---------------------------------------------------------------------------
// replace-default-with-null
// ---------------------------------------------------------------------------

#[test]
fn default_expression_replaced_byte_for_byte() {
    let default_expression = factory::default_expression(factory::identifier_name("Foo"));
    let tree = SyntaxTree::new(factory::expression_statement(factory::assignment(
        SyntaxKind::SimpleAssignmentExpression,
        factory::identifier_name("x"),
        default_expression,
    )));
    assert_eq!(tree.text(), "x = default(Foo);\n");

    let target = tree
        .root()
        .descendants_with_self()
        .find_map(DefaultExpression::cast)
        .unwrap();
    let model = ModelBuilder::new()
        .converted(target.syntax(), TypeInfo::new("Foo", TypeFlavor::Class))
        .build();

    let mut candidates = RefactoringEngine::with_default_refactorings()
        .compute(
            &tree,
            Span::empty_at(target.syntax().span().start),
            Some(&model),
            &RuleFilter::all_enabled(),
            &CancellationToken::new(),
        )
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].title, "Replace 'default(Foo)' with 'null'");

    let after = candidates
        .pop()
        .unwrap()
        .apply(&CancellationToken::new())
        .unwrap();
    assert_eq!(after.text(), "x = null;\n");
    assert_eq!(tree.text(), "x = default(Foo);\n");
}

#[test]
fn default_of_value_type_is_never_offered() {
    let default_expression = factory::default_expression(factory::identifier_name("Point"));
    let tree = SyntaxTree::new(factory::expression_statement(factory::assignment(
        SyntaxKind::SimpleAssignmentExpression,
        factory::identifier_name("x"),
        default_expression,
    )));
    let target = tree
        .root()
        .descendants_with_self()
        .find_map(DefaultExpression::cast)
        .unwrap();
    let model = ModelBuilder::new()
        .converted(
            target.syntax(),
            TypeInfo::new("Point?", TypeFlavor::NullableValue),
        )
        .build();
    let candidates = RefactoringEngine::with_default_refactorings()
        .compute(
            &tree,
            Span::empty_at(target.syntax().span().start),
            Some(&model),
            &RuleFilter::all_enabled(),
            &CancellationToken::new(),
        )
        .unwrap();
    assert!(candidates.is_empty());
}

#[test]
fn refactorings_without_a_model_register_nothing() {
    let tree = subscription_tree();
    let candidates = RefactoringEngine::with_default_refactorings()
        .compute(
            &tree,
            Span::empty_at(0),
            None,
            &RuleFilter::all_enabled(),
            &CancellationToken::new(),
        )
        .unwrap();
    assert!(candidates.is_empty());
}
