//! The built-in diagnostic rules.
//!
//! Each rule is a small stateless struct implementing
//! [`DiagnosticRule`](crate::analyzer::DiagnosticRule). Rules fail
//! closed: a missing subtree, an unresolved symbol, or a directive in the
//! gated span means no diagnostic, never an error.

pub mod complex_element_initializer;
pub mod empty_destructor;
pub mod mark_local_const;
pub mod redundant_delegate_creation;
