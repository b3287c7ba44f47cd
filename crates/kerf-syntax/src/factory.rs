//! Construction helpers for green nodes.
//!
//! The factory is how rewrites (and tests) build replacement subtrees. It
//! inserts single-space/newline trivia only where omitting it would glue
//! tokens together (`new T`, `else x`); everything else is left to the
//! caller or to a host formatting pass via [`Annotation::Format`].
//!
//! [`Annotation::Format`]: crate::green::Annotation::Format

use crate::green::{GreenElement, GreenNode, GreenToken};
use crate::kind::SyntaxKind;
use crate::trivia::Trivia;

// ============================================================================
// Tokens
// ============================================================================

pub fn token(kind: SyntaxKind, text: &str) -> GreenToken {
    GreenToken::new(kind, text)
}

/// A token followed by a single space.
pub fn token_spaced(kind: SyntaxKind, text: &str) -> GreenToken {
    GreenToken::new(kind, text).with_trailing_trivia(vec![Trivia::space()])
}

pub fn identifier(text: &str) -> GreenToken {
    GreenToken::new(SyntaxKind::IdentifierToken, text)
}

pub fn const_keyword() -> GreenToken {
    token_spaced(SyntaxKind::ConstKeyword, "const")
}

pub fn semicolon() -> GreenToken {
    GreenToken::new(SyntaxKind::SemicolonToken, ";")
}

pub fn comma_spaced() -> GreenToken {
    token_spaced(SyntaxKind::CommaToken, ",")
}

pub fn open_paren() -> GreenToken {
    GreenToken::new(SyntaxKind::OpenParenToken, "(")
}

pub fn close_paren() -> GreenToken {
    GreenToken::new(SyntaxKind::CloseParenToken, ")")
}

// ============================================================================
// Names, types, literals
// ============================================================================

pub fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> GreenNode {
    GreenNode::new(kind, children)
}

/// `name` as an expression or type name.
pub fn identifier_name(name: &str) -> GreenNode {
    GreenNode::new(SyntaxKind::IdentifierName, vec![identifier(name).into()])
}

/// A built-in type keyword used in type position (`int`, `string`, ...).
pub fn predefined_type(keyword: &str) -> GreenNode {
    GreenNode::new(
        SyntaxKind::PredefinedType,
        vec![GreenToken::new(SyntaxKind::IdentifierToken, keyword).into()],
    )
}

/// The inferred-type placeholder `var`.
pub fn var_type() -> GreenNode {
    identifier_name("var")
}

pub fn null_literal() -> GreenNode {
    GreenNode::new(
        SyntaxKind::NullLiteralExpression,
        vec![GreenToken::new(SyntaxKind::NullKeyword, "null").into()],
    )
}

pub fn numeric_literal(text: &str) -> GreenNode {
    GreenNode::new(
        SyntaxKind::NumericLiteralExpression,
        vec![GreenToken::new(SyntaxKind::NumericLiteralToken, text).into()],
    )
}

pub fn string_literal(text: &str) -> GreenNode {
    GreenNode::new(
        SyntaxKind::StringLiteralExpression,
        vec![GreenToken::new(SyntaxKind::StringLiteralToken, text).into()],
    )
}

// ============================================================================
// Statements
// ============================================================================

/// `{ stmt* }` with a newline after the open brace.
pub fn block(statements: Vec<GreenNode>) -> GreenNode {
    let mut children: Vec<GreenElement> = Vec::with_capacity(statements.len() + 2);
    children.push(
        GreenToken::new(SyntaxKind::OpenBraceToken, "{")
            .with_trailing_trivia(vec![Trivia::newline()])
            .into(),
    );
    children.extend(statements.into_iter().map(GreenElement::from));
    children.push(GreenToken::new(SyntaxKind::CloseBraceToken, "}").into());
    GreenNode::new(SyntaxKind::Block, children)
}

/// `expr;` followed by a newline.
pub fn expression_statement(expression: GreenNode) -> GreenNode {
    GreenNode::new(
        SyntaxKind::ExpressionStatement,
        vec![
            expression.into(),
            semicolon()
                .with_trailing_trivia(vec![Trivia::newline()])
                .into(),
        ],
    )
}

/// `if (cond) stmt` with an optional else clause.
pub fn if_statement(
    condition: GreenNode,
    statement: GreenNode,
    else_clause: Option<GreenNode>,
) -> GreenNode {
    let mut children: Vec<GreenElement> = vec![
        token_spaced(SyntaxKind::IfKeyword, "if").into(),
        open_paren().into(),
        condition.into(),
        close_paren()
            .with_trailing_trivia(vec![Trivia::space()])
            .into(),
        statement.into(),
    ];
    if let Some(else_clause) = else_clause {
        children.push(else_clause.into());
    }
    GreenNode::new(SyntaxKind::IfStatement, children)
}

/// `else stmt` (pass an `if_statement` to continue a chain).
pub fn else_clause(statement: GreenNode) -> GreenNode {
    GreenNode::new(
        SyntaxKind::ElseClause,
        vec![
            token_spaced(SyntaxKind::ElseKeyword, "else").into(),
            statement.into(),
        ],
    )
}

/// `label: stmt`
pub fn labeled_statement(label: &str, statement: GreenNode) -> GreenNode {
    GreenNode::new(
        SyntaxKind::LabeledStatement,
        vec![
            identifier(label).into(),
            token_spaced(SyntaxKind::ColonToken, ":").into(),
            statement.into(),
        ],
    )
}

/// `return expr?;` followed by a newline.
pub fn return_statement(expression: Option<GreenNode>) -> GreenNode {
    let mut children: Vec<GreenElement> = Vec::new();
    match expression {
        Some(expression) => {
            children.push(token_spaced(SyntaxKind::ReturnKeyword, "return").into());
            children.push(expression.into());
        }
        None => children.push(GreenToken::new(SyntaxKind::ReturnKeyword, "return").into()),
    }
    children.push(
        semicolon()
            .with_trailing_trivia(vec![Trivia::newline()])
            .into(),
    );
    GreenNode::new(SyntaxKind::ReturnStatement, children)
}

// ============================================================================
// Declarations
// ============================================================================

/// `modifiers* declaration ;` followed by a newline.
pub fn local_declaration(modifiers: Vec<GreenToken>, declaration: GreenNode) -> GreenNode {
    let mut children: Vec<GreenElement> =
        modifiers.into_iter().map(GreenElement::from).collect();
    children.push(declaration.into());
    children.push(
        semicolon()
            .with_trailing_trivia(vec![Trivia::newline()])
            .into(),
    );
    GreenNode::new(SyntaxKind::LocalDeclarationStatement, children)
}

/// `T x = init, y = init` — the type carries a trailing space.
pub fn variable_declaration(ty: GreenNode, declarators: Vec<GreenNode>) -> GreenNode {
    let ty = ty.with_trailing_trivia(vec![Trivia::space()]);
    let mut children: Vec<GreenElement> = vec![ty.into()];
    let count = declarators.len();
    for (i, declarator) in declarators.into_iter().enumerate() {
        children.push(declarator.into());
        if i + 1 < count {
            children.push(comma_spaced().into());
        }
    }
    GreenNode::new(SyntaxKind::VariableDeclaration, children)
}

/// `name = value` or a bare `name`.
pub fn variable_declarator(name: &str, initializer: Option<GreenNode>) -> GreenNode {
    let mut children: Vec<GreenElement> = Vec::new();
    match initializer {
        Some(value) => {
            children.push(
                identifier(name)
                    .with_trailing_trivia(vec![Trivia::space()])
                    .into(),
            );
            children.push(equals_value_clause(value).into());
        }
        None => children.push(identifier(name).into()),
    }
    GreenNode::new(SyntaxKind::VariableDeclarator, children)
}

/// `= value`
pub fn equals_value_clause(value: GreenNode) -> GreenNode {
    GreenNode::new(
        SyntaxKind::EqualsValueClause,
        vec![token_spaced(SyntaxKind::EqualsToken, "=").into(), value.into()],
    )
}

/// `~Name() body` — a destructor declaration.
pub fn destructor(name: &str, body: Option<GreenNode>) -> GreenNode {
    let parameter_list = GreenNode::new(
        SyntaxKind::ParameterList,
        vec![open_paren().into(), close_paren().into()],
    );
    let mut children: Vec<GreenElement> = vec![
        GreenToken::new(SyntaxKind::TildeToken, "~").into(),
        identifier(name).into(),
        parameter_list.into(),
    ];
    match body {
        Some(body) => children.push(body.with_leading_trivia(vec![Trivia::space()]).into()),
        None => children.push(semicolon().into()),
    }
    GreenNode::new(SyntaxKind::DestructorDeclaration, children)
}

/// `class Name { members* }`
pub fn class_declaration(name: &str, members: Vec<GreenNode>) -> GreenNode {
    let mut children: Vec<GreenElement> = vec![
        token_spaced(SyntaxKind::ClassKeyword, "class").into(),
        identifier(name)
            .with_trailing_trivia(vec![Trivia::space()])
            .into(),
        GreenToken::new(SyntaxKind::OpenBraceToken, "{")
            .with_trailing_trivia(vec![Trivia::newline()])
            .into(),
    ];
    children.extend(members.into_iter().map(GreenElement::from));
    children.push(
        GreenToken::new(SyntaxKind::CloseBraceToken, "}")
            .with_trailing_trivia(vec![Trivia::newline()])
            .into(),
    );
    GreenNode::new(SyntaxKind::ClassDeclaration, children)
}

pub fn compilation_unit(members: Vec<GreenNode>) -> GreenNode {
    GreenNode::new(
        SyntaxKind::CompilationUnit,
        members.into_iter().map(GreenElement::from).collect(),
    )
}

// ============================================================================
// Expressions
// ============================================================================

/// `left op right` for `=` / `+=`.
///
/// # Panics
/// Debug-asserts that `kind` is an assignment kind; falls back to `=` in
/// release.
pub fn assignment(kind: SyntaxKind, left: GreenNode, right: GreenNode) -> GreenNode {
    debug_assert!(kind.is_assignment(), "assignment() requires an assignment kind");
    let op_text = if kind == SyntaxKind::AddAssignmentExpression {
        "+="
    } else {
        "="
    };
    let op_kind = if kind == SyntaxKind::AddAssignmentExpression {
        SyntaxKind::PlusEqualsToken
    } else {
        SyntaxKind::EqualsToken
    };
    let kind = if kind.is_assignment() {
        kind
    } else {
        SyntaxKind::SimpleAssignmentExpression
    };
    GreenNode::new(
        kind,
        vec![
            left.into(),
            GreenToken::new(op_kind, op_text)
                .with_leading_trivia(vec![Trivia::space()])
                .with_trailing_trivia(vec![Trivia::space()])
                .into(),
            right.into(),
        ],
    )
}

/// `new T(args)`
pub fn object_creation(ty: GreenNode, arguments: Vec<GreenNode>) -> GreenNode {
    GreenNode::new(
        SyntaxKind::ObjectCreationExpression,
        vec![
            token_spaced(SyntaxKind::NewKeyword, "new").into(),
            ty.into(),
            argument_list(arguments).into(),
        ],
    )
}

/// `(arg, ...)` — wraps bare expressions into `Argument` nodes.
pub fn argument_list(arguments: Vec<GreenNode>) -> GreenNode {
    let mut children: Vec<GreenElement> = vec![open_paren().into()];
    let count = arguments.len();
    for (i, expression) in arguments.into_iter().enumerate() {
        children.push(GreenNode::new(SyntaxKind::Argument, vec![expression.into()]).into());
        if i + 1 < count {
            children.push(comma_spaced().into());
        }
    }
    children.push(close_paren().into());
    GreenNode::new(SyntaxKind::ArgumentList, children)
}

/// `{ expr, expr }` — one complex element of a collection initializer.
pub fn complex_element_initializer(expressions: Vec<GreenNode>) -> GreenNode {
    braced_initializer(SyntaxKind::ComplexElementInitializerExpression, expressions)
}

/// `{ elem, elem }` — a collection initializer.
pub fn collection_initializer(elements: Vec<GreenNode>) -> GreenNode {
    braced_initializer(SyntaxKind::CollectionInitializerExpression, elements)
}

fn braced_initializer(kind: SyntaxKind, expressions: Vec<GreenNode>) -> GreenNode {
    let mut children: Vec<GreenElement> = vec![GreenToken::new(SyntaxKind::OpenBraceToken, "{")
        .with_trailing_trivia(vec![Trivia::space()])
        .into()];
    let count = expressions.len();
    for (i, expression) in expressions.into_iter().enumerate() {
        children.push(expression.into());
        if i + 1 < count {
            children.push(comma_spaced().into());
        }
    }
    children.push(
        GreenToken::new(SyntaxKind::CloseBraceToken, "}")
            .with_leading_trivia(vec![Trivia::space()])
            .into(),
    );
    GreenNode::new(kind, children)
}

/// `default(T)`
pub fn default_expression(ty: GreenNode) -> GreenNode {
    GreenNode::new(
        SyntaxKind::DefaultExpression,
        vec![
            GreenToken::new(SyntaxKind::DefaultKeyword, "default").into(),
            open_paren().into(),
            ty.into(),
            close_paren().into(),
        ],
    )
}
