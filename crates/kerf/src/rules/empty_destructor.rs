//! Empty destructor removal.
//!
//! A destructor with a body containing zero statements does nothing yet
//! forces finalization overhead; report the whole declaration so a fix
//! can delete it. A bodiless declaration (extern-like) and a declaration
//! whose span contains conditional-compilation directives are left alone.

use kerf_core::cancel::Cancelled;
use kerf_syntax::ast::{AstNode, DestructorDeclaration};
use kerf_syntax::kind::SyntaxKind;
use kerf_syntax::node::SyntaxNode;
use kerf_syntax::query;

use crate::analyzer::{DiagnosticRule, RuleContext};
use crate::diagnostics::{rule_ids, Diagnostics, RuleId, Severity};

pub struct RemoveEmptyDestructor;

impl DiagnosticRule for RemoveEmptyDestructor {
    fn id(&self) -> RuleId {
        rule_ids::REMOVE_EMPTY_DESTRUCTOR
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn triggers(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::DestructorDeclaration]
    }

    fn check(
        &self,
        node: &SyntaxNode,
        _ctx: &RuleContext<'_>,
        out: &mut Diagnostics,
    ) -> Result<(), Cancelled> {
        let Some(destructor) = DestructorDeclaration::cast(node.clone()) else {
            debug_assert!(false, "triggered on a non-destructor node");
            return Ok(());
        };
        let Some(body) = destructor.body() else {
            return Ok(());
        };
        if !body.statements().is_empty() {
            return Ok(());
        }
        if query::span_contains_directives(node) {
            return Ok(());
        }
        out.report(self.id(), node.span(), self.severity());
        Ok(())
    }
}
