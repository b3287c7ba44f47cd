//! Core infrastructure for kerf.
//!
//! This crate holds the pieces shared by every other kerf crate:
//!
//! - [`text`]: byte spans and offset/line:column conversions
//! - [`cancel`]: cooperative cancellation tokens
//! - [`error`]: the unified [`KerfError`] type surfaced to hosts
//!
//! `kerf-core` deliberately knows nothing about syntax trees or semantic
//! models; those live in `kerf-syntax` and `kerf-semantics`.

pub mod cancel;
pub mod error;
pub mod text;

pub use cancel::{CancellationToken, Cancelled};
pub use error::KerfError;
pub use text::Span;
