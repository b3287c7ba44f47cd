//! Byte spans and text position utilities.
//!
//! ## Coordinate Conventions
//!
//! - Byte offsets are **0-indexed**; spans are half-open `[start, end)`
//! - Lines and columns are **1-indexed** (matching editor conventions)
//!
//! Spans measure byte offsets into UTF-8 source. Hosts that need
//! editor-facing positions convert with [`offset_to_position`].

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Span
// ============================================================================

/// A byte range into source text. Start is inclusive, end is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u64,
    /// End byte offset (exclusive).
    pub end: u64,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: u64, end: u64) -> Self {
        assert!(
            start <= end,
            "Span start ({}) must be <= end ({})",
            start,
            end
        );
        Span { start, end }
    }

    /// A zero-width span at the given offset.
    pub fn empty_at(offset: u64) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span overlaps with another.
    ///
    /// Adjacent spans (one ends where another starts) do NOT overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if this span contains another span entirely.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if this span contains a byte offset.
    pub fn contains_offset(&self, offset: u64) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Check if `other` is contained in this span or touches either edge.
    ///
    /// Used for cursor-span applicability gates: a zero-width cursor sitting
    /// immediately before or after a node still targets it.
    pub fn contains_or_touches(&self, other: &Span) -> bool {
        self.contains(other) || other.end == self.start || other.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

// ============================================================================
// Position Conversions
// ============================================================================

/// Convert a byte offset to a 1-indexed `(line, col)` pair.
///
/// Columns count bytes, not characters. If `offset` exceeds the content
/// length, the position at end of content is returned.
pub fn offset_to_position(content: &str, offset: u64) -> (u32, u32) {
    let offset = (offset as usize).min(content.len());
    let mut line = 1u32;
    let mut col = 1u32;

    for (i, byte) in content.bytes().enumerate() {
        if i >= offset {
            break;
        }
        if byte == b'\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}

/// Slice `content` at `span`, clamping out-of-range offsets to the content
/// length. Never panics on malformed spans.
pub fn slice<'a>(content: &'a str, span: &Span) -> &'a str {
    let start = (span.start as usize).min(content.len());
    let end = (span.end as usize).min(content.len()).max(start);
    &content[start..end]
}

// ============================================================================
// Tests
// ============================================================================
