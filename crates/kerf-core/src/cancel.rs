//! Cooperative cancellation.
//!
//! Analysis and edit application are synchronous but long-running; hosts
//! cancel them by flipping a shared flag. Every semantic query and every
//! rule/fix evaluation checks the token at its entry points, so a cancelled
//! invocation unwinds via `Err(Cancelled)` without emitting a partial
//! diagnostic or a partial edit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

/// Raised when a host cancels an in-flight analysis or edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation was cancelled by the host")]
pub struct Cancelled;

/// A cloneable cancellation flag shared between a host and the analysis
/// it started.
///
/// Clones observe the same underlying flag. The default token is never
/// cancelled; use it when no host token is available (tests, one-shot
/// tools).
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation to every holder of this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Check the flag without failing.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Fail with [`Cancelled`] if the flag is set.
    ///
    /// Call this at suspension points: before a semantic query, before each
    /// rule evaluation, before applying an edit.
    pub fn checkpoint(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}
