//! The diagnostic driver.
//!
//! The [`Analyzer`] walks a tree snapshot once and dispatches each node to
//! the rules whose trigger kinds match, gated by the host's
//! [`RuleFilter`]. Rules are independent and read-only; analysis of one
//! snapshot never mutates anything and can run concurrently with analyses
//! of other snapshots.
//!
//! Cancellation is all-or-nothing: a cancelled analysis returns
//! `Err(Cancelled)` and no diagnostics.

use kerf_core::cancel::{CancellationToken, Cancelled};
use kerf_semantics::model::SemanticModel;
use kerf_syntax::kind::SyntaxKind;
use kerf_syntax::node::{SyntaxNode, SyntaxTree};
use tracing::trace;

use crate::diagnostics::{Diagnostic, Diagnostics, RuleId, Severity};
use crate::filter::RuleFilter;
use crate::rules;

/// Everything a rule evaluation may consult.
pub struct RuleContext<'a> {
    pub model: &'a dyn SemanticModel,
    pub token: &'a CancellationToken,
}

/// One independent diagnostic rule.
///
/// A rule is invoked only for nodes whose kind appears in
/// [`triggers`](Self::triggers). It must fail closed: malformed input,
/// unresolved semantics, or directive-spanning targets report nothing.
pub trait DiagnosticRule {
    fn id(&self) -> RuleId;

    /// Default severity for this rule's findings.
    fn severity(&self) -> Severity {
        Severity::Info
    }

    /// Node kinds that trigger this rule.
    fn triggers(&self) -> &'static [SyntaxKind];

    /// Evaluate one node; push findings into `out`.
    fn check(
        &self,
        node: &SyntaxNode,
        ctx: &RuleContext<'_>,
        out: &mut Diagnostics,
    ) -> Result<(), Cancelled>;
}

/// Walks a snapshot and runs the registered rules.
pub struct Analyzer {
    rules: Vec<Box<dyn DiagnosticRule>>,
}

impl Analyzer {
    /// An analyzer with the built-in rule set.
    pub fn with_default_rules() -> Self {
        Analyzer {
            rules: vec![
                Box::new(rules::complex_element_initializer::CollectionInitializerPair),
                Box::new(rules::empty_destructor::RemoveEmptyDestructor),
                Box::new(rules::redundant_delegate_creation::RedundantDelegateCreation),
                Box::new(rules::mark_local_const::MarkLocalConst),
            ],
        }
    }

    /// An analyzer with a custom rule set.
    pub fn new(rules: Vec<Box<dyn DiagnosticRule>>) -> Self {
        Analyzer { rules }
    }

    /// Run every enabled rule over the snapshot.
    pub fn analyze(
        &self,
        tree: &SyntaxTree,
        model: &dyn SemanticModel,
        filter: &RuleFilter,
        token: &CancellationToken,
    ) -> Result<Vec<Diagnostic>, Cancelled> {
        let ctx = RuleContext { model, token };
        let mut out = Diagnostics::new();

        for node in tree.root().descendants_with_self() {
            token.checkpoint()?;
            for rule in &self.rules {
                if !rule.triggers().contains(&node.kind()) {
                    continue;
                }
                if !filter.is_enabled(rule.id()) {
                    continue;
                }
                trace!(rule = %rule.id(), node = %node, "rule triggered");
                rule.check(&node, &ctx, &mut out)?;
            }
        }

        Ok(out.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerf_semantics::table::ModelBuilder;
    use kerf_syntax::factory;

    fn two_pair_tree() -> SyntaxTree {
        SyntaxTree::new(factory::collection_initializer(vec![
            factory::complex_element_initializer(vec![
                factory::string_literal("\"k\""),
                factory::numeric_literal("1"),
            ]),
            factory::complex_element_initializer(vec![
                factory::string_literal("\"j\""),
                factory::numeric_literal("2"),
            ]),
        ]))
    }

    #[test]
    fn test_analyze_reports_per_matching_node() {
        let tree = two_pair_tree();
        let model = ModelBuilder::new().build();
        let analyzer = Analyzer::with_default_rules();
        let diagnostics = analyzer
            .analyze(&tree, &model, &RuleFilter::all_enabled(), &CancellationToken::new())
            .unwrap();
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_filter_suppresses_rule() {
        let tree = two_pair_tree();
        let model = ModelBuilder::new().build();
        let analyzer = Analyzer::with_default_rules();
        let filter = RuleFilter::all_enabled()
            .disable(crate::diagnostics::rule_ids::COLLECTION_INITIALIZER_PAIR);
        let diagnostics = analyzer
            .analyze(&tree, &model, &filter, &CancellationToken::new())
            .unwrap();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_cancelled_analysis_reports_nothing() {
        let tree = two_pair_tree();
        let model = ModelBuilder::new().build();
        let analyzer = Analyzer::with_default_rules();
        let token = CancellationToken::new();
        token.cancel();
        assert!(analyzer
            .analyze(&tree, &model, &RuleFilter::all_enabled(), &token)
            .is_err());
    }

    #[test]
    fn test_analysis_does_not_mutate_tree() {
        let tree = two_pair_tree();
        let before = tree.text();
        let model = ModelBuilder::new().build();
        let analyzer = Analyzer::with_default_rules();
        let _ = analyzer
            .analyze(&tree, &model, &RuleFilter::all_enabled(), &CancellationToken::new())
            .unwrap();
        assert_eq!(tree.text(), before);
    }
}
