//! Rule enablement.
//!
//! Which rules are enabled is host configuration; the core consumes it
//! only as a boolean gate checked before each evaluator runs. The default
//! filter enables everything.

use std::collections::HashSet;

use crate::diagnostics::RuleId;

/// Boolean per-rule gate. Rules default to enabled.
#[derive(Debug, Clone, Default)]
pub struct RuleFilter {
    disabled: HashSet<&'static str>,
}

impl RuleFilter {
    /// A filter with every rule enabled.
    pub fn all_enabled() -> Self {
        Self::default()
    }

    /// Disable one rule.
    pub fn disable(mut self, rule: RuleId) -> Self {
        self.disabled.insert(rule.as_str());
        self
    }

    pub fn is_enabled(&self, rule: RuleId) -> bool {
        !self.disabled.contains(rule.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::rule_ids;

    #[test]
    fn test_default_enables_everything() {
        let filter = RuleFilter::all_enabled();
        assert!(filter.is_enabled(rule_ids::MARK_LOCAL_CONST));
    }

    #[test]
    fn test_disable_is_per_rule() {
        let filter = RuleFilter::all_enabled().disable(rule_ids::MARK_LOCAL_CONST);
        assert!(!filter.is_enabled(rule_ids::MARK_LOCAL_CONST));
        assert!(filter.is_enabled(rule_ids::REMOVE_EMPTY_DESTRUCTOR));
    }
}
