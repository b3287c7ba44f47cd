//! Redundant delegate wrapper on event subscription.
//!
//! `myEvent += new EventHandler(OnClick);` wraps a method group in an
//! explicit delegate creation the compiler would infer; the wrapper can
//! be removed, leaving `myEvent += OnClick;`. The report spans the whole
//! right-hand expression; the `new` keyword, the delegate type name, and
//! the argument-list parentheses are marked for de-emphasis so a host can
//! strike them through while leaving the surviving method reference
//! untouched.
//!
//! The directive gate is scoped to the object-creation span only, not the
//! whole assignment.

use kerf_core::cancel::Cancelled;
use kerf_semantics::queries;
use kerf_syntax::ast::{AssignmentExpression, AstNode, ObjectCreationExpression};
use kerf_syntax::kind::SyntaxKind;
use kerf_syntax::node::SyntaxNode;
use kerf_syntax::query;

use crate::analyzer::{DiagnosticRule, RuleContext};
use crate::diagnostics::{rule_ids, Diagnostics, RuleId};

pub struct RedundantDelegateCreation;

impl DiagnosticRule for RedundantDelegateCreation {
    fn id(&self) -> RuleId {
        rule_ids::REDUNDANT_DELEGATE_CREATION
    }

    fn triggers(&self) -> &'static [SyntaxKind] {
        &[
            SyntaxKind::SimpleAssignmentExpression,
            SyntaxKind::AddAssignmentExpression,
        ]
    }

    fn check(
        &self,
        node: &SyntaxNode,
        ctx: &RuleContext<'_>,
        out: &mut Diagnostics,
    ) -> Result<(), Cancelled> {
        let Some(assignment) = AssignmentExpression::cast(node.clone()) else {
            debug_assert!(false, "triggered on a non-assignment node");
            return Ok(());
        };
        let Some(right) = assignment.right() else {
            return Ok(());
        };
        let Some(creation) = ObjectCreationExpression::cast(right) else {
            return Ok(());
        };
        if !queries::is_delegate_creation(ctx.model, &creation, ctx.token)? {
            return Ok(());
        }
        if queries::delegate_creation_target_method(ctx.model, &creation, ctx.token)?.is_none() {
            return Ok(());
        }
        let Some(left) = assignment.left() else {
            return Ok(());
        };
        if left.is_missing() || !queries::is_event_access(ctx.model, &left, ctx.token)? {
            return Ok(());
        }
        if query::span_contains_directives(creation.syntax()) {
            return Ok(());
        }

        let mut fade_out = Vec::new();
        if let Some(new_keyword) = creation.new_keyword() {
            fade_out.push(new_keyword.span());
        }
        if let Some(ty) = creation.ty() {
            fade_out.push(ty.span());
        }
        if let Some(argument_list) = creation.argument_list() {
            if let Some(open) = argument_list.open_paren_token() {
                fade_out.push(open.span());
            }
            if let Some(close) = argument_list.close_paren_token() {
                fade_out.push(close.span());
            }
        }
        out.report_with_fade_out(
            self.id(),
            creation.syntax().span(),
            fade_out,
            self.severity(),
        );
        Ok(())
    }
}
