//! Typed views over [`SyntaxNode`].
//!
//! A view is a zero-cost wrapper proving its node has a particular
//! [`SyntaxKind`]. Construction goes through `cast`, which fails unless
//! the tag matches; accessors then navigate by kind and position. There
//! are no unchecked downcasts anywhere in kerf.

use crate::kind::SyntaxKind;
use crate::node::{SyntaxNode, SyntaxToken};

/// A typed wrapper over a [`SyntaxNode`] of a known kind.
pub trait AstNode: Sized {
    /// Attempt to wrap `node`; `None` unless the kind matches.
    fn cast(node: SyntaxNode) -> Option<Self>;

    /// The underlying untyped node.
    fn syntax(&self) -> &SyntaxNode;
}

impl SyntaxNode {
    /// The nearest ancestor (or this node itself) castable to `T`.
    pub fn first_ancestor_or_self<T: AstNode>(&self) -> Option<T> {
        self.ancestors_with_self().find_map(T::cast)
    }
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $($kind:ident)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn cast(node: SyntaxNode) -> Option<Self> {
                match node.kind() {
                    $(SyntaxKind::$kind)|+ => Some($name(node)),
                    _ => None,
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(
    /// The root of a file: a list of member declarations and statements.
    CompilationUnit,
    CompilationUnit
);

ast_node!(
    /// `class C { ... }`
    ClassDeclaration,
    ClassDeclaration
);

ast_node!(
    /// `~C() { ... }` — a destructor (finalizer) declaration.
    DestructorDeclaration,
    DestructorDeclaration
);

ast_node!(
    /// `{ stmt* }`
    Block,
    Block
);

ast_node!(
    /// `if (cond) stmt else ...`
    IfStatement,
    IfStatement
);

ast_node!(
    /// `else stmt` (the statement may itself be an `if`).
    ElseClause,
    ElseClause
);

ast_node!(
    /// `const? T x = init, y = init;`
    LocalDeclarationStatement,
    LocalDeclarationStatement
);

ast_node!(
    /// `T x = init, y = init` without the semicolon.
    VariableDeclaration,
    VariableDeclaration
);

ast_node!(
    /// `x = init` — one declared variable.
    VariableDeclarator,
    VariableDeclarator
);

ast_node!(
    /// `= value`
    EqualsValueClause,
    EqualsValueClause
);

ast_node!(
    /// `left = right` or `left += right`.
    AssignmentExpression,
    SimpleAssignmentExpression | AddAssignmentExpression
);

ast_node!(
    /// `new T(args) { init }`
    ObjectCreationExpression,
    ObjectCreationExpression
);

ast_node!(
    /// `(arg, ...)`
    ArgumentList,
    ArgumentList
);

ast_node!(
    /// One argument in an argument list.
    Argument,
    Argument
);

ast_node!(
    /// A braced initializer: a collection initializer or one
    /// `{ expr, expr }` complex element within one.
    InitializerExpression,
    CollectionInitializerExpression | ComplexElementInitializerExpression
);

ast_node!(
    /// `default(T)`
    DefaultExpression,
    DefaultExpression
);

ast_node!(
    /// A bare identifier used as an expression or a type name.
    IdentifierName,
    IdentifierName
);

ast_node!(
    /// `label: stmt`
    LabeledStatement,
    LabeledStatement
);

// ============================================================================
// Accessors
// ============================================================================

impl CompilationUnit {
    pub fn members(&self) -> Vec<SyntaxNode> {
        self.0.children().collect()
    }
}

impl ClassDeclaration {
    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::IdentifierToken)
    }

    pub fn members(&self) -> Vec<SyntaxNode> {
        self.0.children().collect()
    }
}

impl DestructorDeclaration {
    pub fn tilde_token(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::TildeToken)
    }

    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::IdentifierToken)
    }

    /// The body block, absent for extern-like declarations.
    pub fn body(&self) -> Option<Block> {
        self.0.child_of_kind(SyntaxKind::Block).and_then(Block::cast)
    }
}

impl Block {
    pub fn open_brace_token(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::OpenBraceToken)
    }

    pub fn close_brace_token(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::CloseBraceToken)
    }

    /// The statements in source order.
    pub fn statements(&self) -> Vec<SyntaxNode> {
        self.0
            .children()
            .filter(|c| c.kind().is_statement())
            .collect()
    }
}

impl IfStatement {
    pub fn condition(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_expression())
    }

    /// The branch statement (embedded or block).
    pub fn statement(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_statement())
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        self.0
            .child_of_kind(SyntaxKind::ElseClause)
            .and_then(ElseClause::cast)
    }
}

impl ElseClause {
    /// The clause statement; an `IfStatement` here continues the chain.
    pub fn statement(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_statement())
    }
}

impl LocalDeclarationStatement {
    /// Modifier tokens preceding the declaration (`const`, `static`).
    pub fn modifiers(&self) -> Vec<SyntaxToken> {
        self.0
            .child_tokens()
            .filter(|t| {
                matches!(
                    t.kind(),
                    SyntaxKind::ConstKeyword | SyntaxKind::StaticKeyword
                )
            })
            .collect()
    }

    pub fn is_const(&self) -> bool {
        self.modifiers()
            .iter()
            .any(|t| t.kind() == SyntaxKind::ConstKeyword)
    }

    pub fn declaration(&self) -> Option<VariableDeclaration> {
        self.0
            .child_of_kind(SyntaxKind::VariableDeclaration)
            .and_then(VariableDeclaration::cast)
    }

    pub fn semicolon_token(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::SemicolonToken)
    }
}

impl VariableDeclaration {
    /// The declared type: the first type-name child.
    pub fn ty(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_type_name())
    }

    /// Whether the declared type is the inferred `var` placeholder.
    pub fn is_var(&self) -> bool {
        self.ty()
            .and_then(IdentifierName::cast)
            .map(|name| name.is_var())
            .unwrap_or(false)
    }

    pub fn variables(&self) -> Vec<VariableDeclarator> {
        self.0
            .children()
            .filter_map(VariableDeclarator::cast)
            .collect()
    }
}

impl VariableDeclarator {
    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::IdentifierToken)
    }

    pub fn initializer(&self) -> Option<EqualsValueClause> {
        self.0
            .child_of_kind(SyntaxKind::EqualsValueClause)
            .and_then(EqualsValueClause::cast)
    }
}

impl EqualsValueClause {
    pub fn value(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_expression())
    }
}

impl AssignmentExpression {
    pub fn left(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_expression())
    }

    pub fn operator_token(&self) -> Option<SyntaxToken> {
        self.0
            .child_tokens()
            .find(|t| matches!(t.kind(), SyntaxKind::EqualsToken | SyntaxKind::PlusEqualsToken))
    }

    pub fn right(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .filter(|c| c.kind().is_expression())
            .nth(1)
    }
}

impl ObjectCreationExpression {
    pub fn new_keyword(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::NewKeyword)
    }

    /// The constructed type name.
    pub fn ty(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_type_name())
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        self.0
            .child_of_kind(SyntaxKind::ArgumentList)
            .and_then(ArgumentList::cast)
    }

    pub fn initializer(&self) -> Option<InitializerExpression> {
        self.0
            .child_of_kind(SyntaxKind::CollectionInitializerExpression)
            .and_then(InitializerExpression::cast)
    }
}

impl ArgumentList {
    pub fn open_paren_token(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::OpenParenToken)
    }

    pub fn close_paren_token(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::CloseParenToken)
    }

    pub fn arguments(&self) -> Vec<Argument> {
        self.0.children().filter_map(Argument::cast).collect()
    }
}

impl Argument {
    pub fn expression(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_expression())
    }
}

impl InitializerExpression {
    /// The element expressions, commas excluded.
    pub fn expressions(&self) -> Vec<SyntaxNode> {
        self.0
            .children()
            .filter(|c| c.kind().is_expression())
            .collect()
    }
}

impl DefaultExpression {
    pub fn default_keyword(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::DefaultKeyword)
    }

    /// The type argument, possibly a missing placeholder on malformed
    /// input.
    pub fn ty(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_type_name())
    }
}

impl IdentifierName {
    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::IdentifierToken)
    }

    /// Whether this name is the contextual `var` keyword.
    pub fn is_var(&self) -> bool {
        self.identifier().map(|t| t.text() == "var").unwrap_or(false)
    }
}

impl LabeledStatement {
    pub fn label(&self) -> Option<SyntaxToken> {
        self.0.token_of_kind(SyntaxKind::IdentifierToken)
    }

    pub fn statement(&self) -> Option<SyntaxNode> {
        self.0.children().find(|c| c.kind().is_statement())
    }
}
