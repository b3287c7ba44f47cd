//! The closed enumeration of syntax kinds.
//!
//! Every node and token in a kerf tree carries exactly one [`SyntaxKind`].
//! Kind-specific structure is accessed through the typed views in
//! [`crate::ast`], never through unchecked downcasts: a view's `cast` fails
//! unless the tag matches.
//!
//! The enumeration covers the C# surface the analysis engine inspects. It
//! is intentionally not a full C# grammar; the host front end may hand kerf
//! trees containing kinds the rules never trigger on, and the walkers pass
//! through them untouched.

use serde::Serialize;

/// Tag identifying the shape of a node or token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    // ------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------
    IdentifierToken,
    NumericLiteralToken,
    StringLiteralToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    SemicolonToken,
    CommaToken,
    ColonToken,
    DotToken,
    EqualsToken,
    PlusEqualsToken,
    TildeToken,

    // Keyword tokens
    NewKeyword,
    ConstKeyword,
    StaticKeyword,
    IfKeyword,
    ElseKeyword,
    ReturnKeyword,
    DefaultKeyword,
    NullKeyword,
    TrueKeyword,
    FalseKeyword,
    ClassKeyword,

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------
    CompilationUnit,
    ClassDeclaration,
    DestructorDeclaration,
    ParameterList,

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------
    Block,
    IfStatement,
    ElseClause,
    LocalDeclarationStatement,
    ExpressionStatement,
    LabeledStatement,
    ReturnStatement,
    EmptyStatement,

    // ------------------------------------------------------------------
    // Declaration parts
    // ------------------------------------------------------------------
    VariableDeclaration,
    VariableDeclarator,
    EqualsValueClause,

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------
    IdentifierName,
    PredefinedType,
    SimpleAssignmentExpression,
    AddAssignmentExpression,
    ObjectCreationExpression,
    ArgumentList,
    Argument,
    CollectionInitializerExpression,
    ComplexElementInitializerExpression,
    DefaultExpression,
    InvocationExpression,
    SimpleMemberAccessExpression,
    NumericLiteralExpression,
    StringLiteralExpression,
    NullLiteralExpression,
    TrueLiteralExpression,
    FalseLiteralExpression,
}

impl SyntaxKind {
    /// Whether this kind tags a statement node.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::IfStatement
                | SyntaxKind::LocalDeclarationStatement
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::LabeledStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::EmptyStatement
        )
    }

    /// Whether this kind tags an expression node.
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::IdentifierName
                | SyntaxKind::PredefinedType
                | SyntaxKind::SimpleAssignmentExpression
                | SyntaxKind::AddAssignmentExpression
                | SyntaxKind::ObjectCreationExpression
                | SyntaxKind::CollectionInitializerExpression
                | SyntaxKind::ComplexElementInitializerExpression
                | SyntaxKind::DefaultExpression
                | SyntaxKind::InvocationExpression
                | SyntaxKind::SimpleMemberAccessExpression
                | SyntaxKind::NumericLiteralExpression
                | SyntaxKind::StringLiteralExpression
                | SyntaxKind::NullLiteralExpression
                | SyntaxKind::TrueLiteralExpression
                | SyntaxKind::FalseLiteralExpression
        )
    }

    /// Whether this kind tags an assignment expression (`=` or `+=`).
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            SyntaxKind::SimpleAssignmentExpression | SyntaxKind::AddAssignmentExpression
        )
    }

    /// Whether this kind tags a type-name node.
    pub fn is_type_name(self) -> bool {
        matches!(self, SyntaxKind::IdentifierName | SyntaxKind::PredefinedType)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_and_expression_are_disjoint() {
        let all = [
            SyntaxKind::Block,
            SyntaxKind::IfStatement,
            SyntaxKind::IdentifierName,
            SyntaxKind::ObjectCreationExpression,
            SyntaxKind::ElseClause,
            SyntaxKind::EqualsValueClause,
        ];
        for kind in all {
            assert!(
                !(kind.is_statement() && kind.is_expression()),
                "{kind:?} cannot be both a statement and an expression"
            );
        }
    }

    #[test]
    fn test_else_clause_is_neither() {
        assert!(!SyntaxKind::ElseClause.is_statement());
        assert!(!SyntaxKind::ElseClause.is_expression());
    }
}
