//! The fail-closed semantic query layer.
//!
//! Thin compositions of [`SemanticModel`] lookups and structural checks,
//! shared by the diagnostic rules and the refactorings. Every function
//! here answers `None`/`false` whenever any piece of semantic information
//! is unresolved; callers never transform code on uncertain answers.

use kerf_core::cancel::CancellationToken;
use kerf_syntax::ast::ObjectCreationExpression;
use kerf_syntax::node::SyntaxNode;
use tracing::trace;

use crate::model::{QueryResult, SemanticModel};
use crate::symbol::{Symbol, SymbolKind, TypeFlavor, TypeInfo};

/// The resolved type of a type-name node, provided it supports constant
/// values (primitive-like, string, enum).
pub fn constant_capable_type(
    model: &dyn SemanticModel,
    type_node: &SyntaxNode,
    token: &CancellationToken,
) -> QueryResult<Option<TypeInfo>> {
    let Some(ty) = model.type_of(type_node, token)? else {
        return Ok(None);
    };
    if ty.supports_constant_value() {
        Ok(Some(ty))
    } else {
        Ok(None)
    }
}

/// Whether `expression` binds to an event member. Missing nodes answer
/// `false`.
pub fn is_event_access(
    model: &dyn SemanticModel,
    expression: &SyntaxNode,
    token: &CancellationToken,
) -> QueryResult<bool> {
    if expression.is_missing() {
        return Ok(false);
    }
    model.is_event(expression, token)
}

/// Whether the creation constructs a delegate/handler type.
pub fn is_delegate_creation(
    model: &dyn SemanticModel,
    creation: &ObjectCreationExpression,
    token: &CancellationToken,
) -> QueryResult<bool> {
    let Some(type_node) = creation.ty() else {
        return Ok(false);
    };
    if type_node.is_missing() {
        return Ok(false);
    }
    Ok(model
        .type_of(&type_node, token)?
        .map(|ty| ty.flavor == TypeFlavor::Delegate)
        .unwrap_or(false))
}

/// The single method-reference argument of a delegate creation.
///
/// Answers the argument expression and its resolved method symbol iff the
/// creation's argument list has exactly one argument, that argument is a
/// method group, and the model resolves it to a real (non-error) method.
pub fn delegate_creation_target_method(
    model: &dyn SemanticModel,
    creation: &ObjectCreationExpression,
    token: &CancellationToken,
) -> QueryResult<Option<(SyntaxNode, Symbol)>> {
    let Some(argument_list) = creation.argument_list() else {
        return Ok(None);
    };
    let arguments = argument_list.arguments();
    if arguments.len() != 1 {
        return Ok(None);
    }
    let Some(expression) = arguments[0].expression() else {
        return Ok(None);
    };
    if expression.is_missing() {
        return Ok(None);
    }
    let Some(method) = model.method_symbol(&expression, token)? else {
        return Ok(None);
    };
    if method.kind != SymbolKind::Method || method.is_error {
        trace!(name = %method.name, "method-group resolution rejected");
        return Ok(None);
    }
    Ok(Some((expression, method)))
}
