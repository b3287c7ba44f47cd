//! Code fix providers.
//!
//! A fix provider turns an already-reported diagnostic into one or more
//! [`CandidateEdit`](crate::refactor::CandidateEdit)s, reusing the same
//! registrar (and therefore the same equivalence-key deduplication) as
//! the refactorings. A provider declares which rule ids it can fix and
//! anchors each fix on the node found at the diagnostic's span.

use kerf_core::cancel::{CancellationToken, Cancelled};
use kerf_semantics::model::SemanticModel;
use kerf_syntax::ast::{
    AstNode, DestructorDeclaration, LocalDeclarationStatement, ObjectCreationExpression,
};
use kerf_syntax::node::{SyntaxNode, SyntaxTree};
use kerf_syntax::rewrite;
use tracing::debug;

use crate::diagnostics::{rule_ids, Diagnostic, RuleId};
use crate::refactor::{apply_error, EquivalenceKey, Registrar};
use crate::refactorings::mark_local_const;

/// What a fix provider may consult.
pub struct FixContext<'a> {
    pub tree: &'a SyntaxTree,
    pub diagnostics: &'a [Diagnostic],
    pub model: Option<&'a dyn SemanticModel>,
    pub token: &'a CancellationToken,
}

impl FixContext<'_> {
    /// The node anchoring a diagnostic: innermost at the reported span.
    fn anchor(&self, diagnostic: &Diagnostic) -> Option<SyntaxNode> {
        self.tree.find_node(diagnostic.span, true)
    }
}

/// One fix provider, keyed by the diagnostics it understands.
pub trait CodeFixProvider {
    fn fixable_ids(&self) -> &'static [RuleId];

    fn register_fixes(
        &self,
        ctx: &FixContext<'_>,
        registrar: &mut Registrar,
    ) -> Result<(), Cancelled>;
}

/// Removes the redundant delegate wrapper, keeping the method reference.
pub struct AssignmentFixProvider;

impl CodeFixProvider for AssignmentFixProvider {
    fn fixable_ids(&self) -> &'static [RuleId] {
        &[rule_ids::REDUNDANT_DELEGATE_CREATION]
    }

    fn register_fixes(
        &self,
        ctx: &FixContext<'_>,
        registrar: &mut Registrar,
    ) -> Result<(), Cancelled> {
        for diagnostic in ctx.diagnostics {
            if diagnostic.rule != rule_ids::REDUNDANT_DELEGATE_CREATION {
                continue;
            }
            ctx.token.checkpoint()?;
            let creation = ctx
                .anchor(diagnostic)
                .and_then(|node| node.first_ancestor_or_self::<ObjectCreationExpression>());
            let Some(creation) = creation else {
                debug!(span = %diagnostic.span, "no object creation at diagnostic span");
                continue;
            };
            let method_reference = creation
                .argument_list()
                .map(|list| list.arguments())
                .and_then(|arguments| arguments.first().cloned())
                .and_then(|argument| argument.expression());
            let Some(method_reference) = method_reference else {
                continue;
            };

            let tree = ctx.tree.clone();
            let wrapper = creation.syntax().clone();
            registrar.register(
                "Remove redundant delegate creation",
                EquivalenceKey::new(rule_ids::REDUNDANT_DELEGATE_CREATION),
                move |token| {
                    token.checkpoint()?;
                    rewrite::unwrap_to_inner(&tree, &wrapper, &method_reference)
                        .map_err(apply_error)
                },
            );
        }
        Ok(())
    }
}

/// Deletes an empty destructor declaration.
pub struct DestructorFixProvider;

impl CodeFixProvider for DestructorFixProvider {
    fn fixable_ids(&self) -> &'static [RuleId] {
        &[rule_ids::REMOVE_EMPTY_DESTRUCTOR]
    }

    fn register_fixes(
        &self,
        ctx: &FixContext<'_>,
        registrar: &mut Registrar,
    ) -> Result<(), Cancelled> {
        for diagnostic in ctx.diagnostics {
            if diagnostic.rule != rule_ids::REMOVE_EMPTY_DESTRUCTOR {
                continue;
            }
            ctx.token.checkpoint()?;
            let destructor = ctx
                .anchor(diagnostic)
                .and_then(|node| node.first_ancestor_or_self::<DestructorDeclaration>());
            let Some(destructor) = destructor else {
                debug!(span = %diagnostic.span, "no destructor at diagnostic span");
                continue;
            };

            let tree = ctx.tree.clone();
            let target = destructor.syntax().clone();
            registrar.register(
                "Remove empty destructor",
                EquivalenceKey::new(rule_ids::REMOVE_EMPTY_DESTRUCTOR),
                move |token| {
                    token.checkpoint()?;
                    rewrite::remove(&tree, &target).map_err(apply_error)
                },
            );
        }
        Ok(())
    }
}

/// Marks a constant-capable local as `const`, sharing the refactoring's
/// builder.
pub struct LocalDeclarationFixProvider;

impl CodeFixProvider for LocalDeclarationFixProvider {
    fn fixable_ids(&self) -> &'static [RuleId] {
        &[rule_ids::MARK_LOCAL_CONST]
    }

    fn register_fixes(
        &self,
        ctx: &FixContext<'_>,
        registrar: &mut Registrar,
    ) -> Result<(), Cancelled> {
        let Some(model) = ctx.model else {
            return Ok(());
        };
        for diagnostic in ctx.diagnostics {
            if diagnostic.rule != rule_ids::MARK_LOCAL_CONST {
                continue;
            }
            ctx.token.checkpoint()?;
            let declaration = ctx
                .anchor(diagnostic)
                .and_then(|node| node.first_ancestor_or_self::<LocalDeclarationStatement>());
            let Some(declaration) = declaration else {
                debug!(span = %diagnostic.span, "no local declaration at diagnostic span");
                continue;
            };
            let Some(replacement) =
                mark_local_const::build_const_declaration(&declaration, model, ctx.token)?
            else {
                continue;
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
        }
        Ok(())
    }
}

/// Runs every registered provider over a diagnostic batch.
pub struct FixEngine {
    providers: Vec<Box<dyn CodeFixProvider>>,
}

impl FixEngine {
    pub fn with_default_providers() -> Self {
        FixEngine {
            providers: vec![
                Box::new(AssignmentFixProvider),
                Box::new(DestructorFixProvider),
                Box::new(LocalDeclarationFixProvider),
            ],
        }
    }

    pub fn new(providers: Vec<Box<dyn CodeFixProvider>>) -> Self {
        FixEngine { providers }
    }

    /// Compute fixes for the batch. Providers whose fixable ids do not
    /// appear in the batch are skipped.
    pub fn compute(
        &self,
        tree: &SyntaxTree,
        diagnostics: &[Diagnostic],
        model: Option<&dyn SemanticModel>,
        token: &CancellationToken,
    ) -> Result<Vec<crate::refactor::CandidateEdit>, Cancelled> {
        let ctx = FixContext {
            tree,
            diagnostics,
            model,
            token,
        };
        let mut registrar = Registrar::new();
        for provider in &self.providers {
            token.checkpoint()?;
            let relevant = diagnostics
                .iter()
                .any(|diagnostic| provider.fixable_ids().contains(&diagnostic.rule));
            if !relevant {
                continue;
            }
            provider.register_fixes(&ctx, &mut registrar)?;
        }
        Ok(registrar.into_edits())
    }
}
