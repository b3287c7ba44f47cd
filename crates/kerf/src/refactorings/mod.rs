//! The built-in refactorings.
//!
//! Each module exposes its applicability check as a standalone function
//! so the corresponding diagnostic rule and code fix can share it.

pub mod mark_local_const;
pub mod replace_default_with_null;
