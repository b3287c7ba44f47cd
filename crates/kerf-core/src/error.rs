//! Unified error type surfaced to hosts.
//!
//! Subsystems carry their own error enums (`RewriteError` in `kerf-syntax`,
//! [`Cancelled`] here); `KerfError` is the single type a host sees at the
//! API boundary, with a stable code and an optional JSON `details` payload.
//!
//! ## Design
//!
//! - **Fail closed**: malformed input never becomes an error — evaluators
//!   answer "not applicable" instead. `KerfError` covers the cases that
//!   must reach the host: cancellation and failed edit application.
//! - **Bridging**: `impl From<X> for KerfError` bridges subsystem errors.

use serde::Serialize;
use thiserror::Error;

use crate::cancel::Cancelled;

/// Stable error codes for host-facing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The host cancelled the operation.
    Cancelled,
    /// An edit could not be applied (target node no longer in the tree).
    ApplyFailed,
    /// A bug or unexpected state inside kerf.
    Internal,
}

/// Unified error type for host consumption.
#[derive(Debug, Error)]
pub enum KerfError {
    /// The host cancelled an in-flight analysis or edit.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    /// Edit application failed; the original tree is unchanged.
    #[error("edit could not be applied: {message}")]
    ApplyFailed {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Internal invariant violation (a bug in kerf, not in host input).
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl KerfError {
    /// The stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            KerfError::Cancelled(_) => ErrorCode::Cancelled,
            KerfError::ApplyFailed { .. } => ErrorCode::ApplyFailed,
            KerfError::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Construct an apply failure with no structured details.
    pub fn apply_failed(message: impl Into<String>) -> Self {
        KerfError::ApplyFailed {
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(KerfError::from(Cancelled).code(), ErrorCode::Cancelled);
        assert_eq!(
            KerfError::apply_failed("node detached").code(),
            ErrorCode::ApplyFailed
        );
    }

    #[test]
    fn test_code_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorCode::ApplyFailed).unwrap();
        assert_eq!(json, "\"apply_failed\"");
    }
}
