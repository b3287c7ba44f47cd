//! Refactoring candidates.
//!
//! A refactoring inspects the node under the host's cursor span and, when
//! applicable, registers one or more [`CandidateEdit`]s: a title for the
//! host's menu, a stable [`EquivalenceKey`] for deduplication, and a
//! deferred apply function executed only if the user picks the candidate.
//! Applicability checking and execution are decoupled on purpose; the
//! check is pure and the apply function owns everything it needs.

use std::collections::HashSet;

use kerf_core::cancel::{CancellationToken, Cancelled};
use kerf_core::error::KerfError;
use kerf_core::text::Span;
use kerf_semantics::model::SemanticModel;
use kerf_syntax::node::SyntaxTree;
use kerf_syntax::rewrite::RewriteError;
use tracing::debug;

use crate::diagnostics::RuleId;
use crate::filter::RuleFilter;
use crate::refactorings;

/// Stable identity of a candidate: rule id plus an optional variant
/// suffix. Two engines proposing the same key propose the same edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EquivalenceKey {
    pub rule: RuleId,
    pub variant: Option<&'static str>,
}

impl EquivalenceKey {
    pub fn new(rule: RuleId) -> Self {
        EquivalenceKey {
            rule,
            variant: None,
        }
    }

    pub fn with_variant(rule: RuleId, variant: &'static str) -> Self {
        EquivalenceKey {
            rule,
            variant: Some(variant),
        }
    }
}

impl std::fmt::Display for EquivalenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.variant {
            Some(variant) => write!(f, "{}.{}", self.rule, variant),
            None => write!(f, "{}", self.rule),
        }
    }
}

type ApplyFn = Box<dyn FnOnce(&CancellationToken) -> Result<SyntaxTree, KerfError>>;

/// A deferred edit: checked now, applied later.
pub struct CandidateEdit {
    pub title: String,
    pub key: EquivalenceKey,
    apply: ApplyFn,
}

impl CandidateEdit {
    /// Execute the edit. Atomic: either a complete new tree or an error
    /// with the original tree untouched.
    pub fn apply(self, token: &CancellationToken) -> Result<SyntaxTree, KerfError> {
        token.checkpoint()?;
        (self.apply)(token)
    }
}

impl std::fmt::Debug for CandidateEdit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateEdit")
            .field("title", &self.title)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Collects candidates, deduplicating by equivalence key.
#[derive(Default)]
pub struct Registrar {
    edits: Vec<CandidateEdit>,
    seen: HashSet<EquivalenceKey>,
}

impl Registrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a candidate; later registrations with an already-seen key
    /// are dropped.
    pub fn register(
        &mut self,
        title: impl Into<String>,
        key: EquivalenceKey,
        apply: impl FnOnce(&CancellationToken) -> Result<SyntaxTree, KerfError> + 'static,
    ) {
        if !self.seen.insert(key) {
            debug!(%key, "duplicate candidate dropped");
            return;
        }
        self.edits.push(CandidateEdit {
            title: title.into(),
            key,
            apply: Box::new(apply),
        });
    }

    pub fn into_edits(self) -> Vec<CandidateEdit> {
        self.edits
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

/// What a refactoring may consult when computing candidates.
///
/// The semantic model is optional; model-dependent refactorings register
/// nothing when the host skipped model construction.
pub struct RefactoringContext<'a> {
    pub tree: &'a SyntaxTree,
    /// The host cursor or selection span.
    pub span: Span,
    pub model: Option<&'a dyn SemanticModel>,
    pub token: &'a CancellationToken,
}

/// One refactoring provider.
pub trait Refactoring {
    /// The rule id this provider registers candidates under; the host's
    /// [`RuleFilter`] gates the provider by it.
    fn id(&self) -> RuleId;

    fn compute(
        &self,
        ctx: &RefactoringContext<'_>,
        registrar: &mut Registrar,
    ) -> Result<(), Cancelled>;
}

/// Runs the registered refactorings for a cursor span.
pub struct RefactoringEngine {
    refactorings: Vec<Box<dyn Refactoring>>,
}

impl RefactoringEngine {
    pub fn with_default_refactorings() -> Self {
        RefactoringEngine {
            refactorings: vec![
                Box::new(refactorings::mark_local_const::MarkLocalConstRefactoring),
                Box::new(refactorings::replace_default_with_null::ReplaceDefaultWithNull),
            ],
        }
    }

    pub fn new(refactorings: Vec<Box<dyn Refactoring>>) -> Self {
        RefactoringEngine { refactorings }
    }

    /// Compute every candidate for the span, skipping providers the
    /// filter disables. A cancelled computation yields no candidates.
    pub fn compute(
        &self,
        tree: &SyntaxTree,
        span: Span,
        model: Option<&dyn SemanticModel>,
        filter: &RuleFilter,
        token: &CancellationToken,
    ) -> Result<Vec<CandidateEdit>, Cancelled> {
        let ctx = RefactoringContext {
            tree,
            span,
            model,
            token,
        };
        let mut registrar = Registrar::new();
        for refactoring in &self.refactorings {
            token.checkpoint()?;
            if !filter.is_enabled(refactoring.id()) {
                continue;
            }
            refactoring.compute(&ctx, &mut registrar)?;
        }
        Ok(registrar.into_edits())
    }
}

/// Map a rewrite failure into the host-facing error type.
pub(crate) fn apply_error(err: RewriteError) -> KerfError {
    KerfError::apply_failed(err.to_string())
}
