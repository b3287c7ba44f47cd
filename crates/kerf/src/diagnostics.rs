//! Diagnostic value objects and the reporting sink.
//!
//! A [`Diagnostic`] is a plain value: rule identity, the primary span, and
//! optional fade-out sub-spans marking redundant syntax for visual
//! de-emphasis. The core never stores diagnostics; the host consumes the
//! collected vector immediately.

use serde::Serialize;

use kerf_core::text::Span;

/// Stable identifier of a diagnostic rule or refactoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RuleId(pub &'static str);

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// The built-in rule identifiers.
pub mod rule_ids {
    use super::RuleId;

    /// Two-element complex initializer entry re-expressible with indexer
    /// syntax.
    pub const COLLECTION_INITIALIZER_PAIR: RuleId = RuleId("collection-initializer-pair");
    /// Destructor with an empty body.
    pub const REMOVE_EMPTY_DESTRUCTOR: RuleId = RuleId("remove-empty-destructor");
    /// `event += new Handler(Method)` where the wrapper is redundant.
    pub const REDUNDANT_DELEGATE_CREATION: RuleId = RuleId("redundant-delegate-creation");
    /// Local variable that could be declared `const`.
    pub const MARK_LOCAL_CONST: RuleId = RuleId("mark-local-const");
    /// `default(T)` where `T` is a reference type.
    pub const REPLACE_DEFAULT_WITH_NULL: RuleId = RuleId("replace-default-with-null");
}

/// How prominently the host should surface a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One reported finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule: RuleId,
    pub span: Span,
    /// Redundant sub-spans the host may render struck-through/faded.
    pub fade_out: Vec<Span>,
    pub severity: Severity,
}

/// Collecting sink handed to rule evaluators.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a finding with no fade-out spans.
    pub fn report(&mut self, rule: RuleId, span: Span, severity: Severity) {
        self.report_with_fade_out(rule, span, Vec::new(), severity);
    }

    /// Report a finding with fade-out sub-spans.
    pub fn report_with_fade_out(
        &mut self,
        rule: RuleId,
        span: Span,
        fade_out: Vec<Span>,
        severity: Severity,
    ) {
        tracing::debug!(rule = %rule, %span, "diagnostic reported");
        self.items.push(Diagnostic {
            rule,
            span,
            fade_out,
            severity,
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
