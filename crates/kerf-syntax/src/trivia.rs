//! Trivia atoms: whitespace, comments, and preprocessor directives.
//!
//! Trivia is text that surrounds tokens without being part of the grammar.
//! Each token owns an ordered list of leading and trailing atoms; the
//! rewrite engine moves these lists around so that edits never lose
//! comments or formatting.
//!
//! Directives (`#if`, `#endif`, ...) are trivia to the grammar but load
//! bearing for analysis: an edit proposed across a directive could change
//! which code is compiled, so every rule checks
//! [`span_contains_directives`](crate::query::span_contains_directives)
//! before reporting.

use std::fmt;

/// The flavor of a trivia atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    /// Spaces and tabs.
    Whitespace,
    /// A line terminator.
    EndOfLine,
    /// `// ...` up to (not including) the line terminator.
    LineComment,
    /// `/* ... */` including the delimiters.
    BlockComment,
    /// A preprocessor directive line, e.g. `#if DEBUG`.
    Directive,
}

/// One atom of trivia: a kind plus its exact source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trivia {
    kind: TriviaKind,
    text: Box<str>,
}

impl Trivia {
    pub fn new(kind: TriviaKind, text: impl Into<Box<str>>) -> Self {
        Trivia {
            kind,
            text: text.into(),
        }
    }

    /// A single space.
    pub fn space() -> Self {
        Trivia::new(TriviaKind::Whitespace, " ")
    }

    /// Arbitrary horizontal whitespace.
    pub fn whitespace(text: &str) -> Self {
        Trivia::new(TriviaKind::Whitespace, text)
    }

    /// A `\n` line terminator.
    pub fn newline() -> Self {
        Trivia::new(TriviaKind::EndOfLine, "\n")
    }

    /// A `// ...` comment. The text must include the `//` prefix.
    pub fn line_comment(text: &str) -> Self {
        Trivia::new(TriviaKind::LineComment, text)
    }

    /// A `/* ... */` comment including delimiters.
    pub fn block_comment(text: &str) -> Self {
        Trivia::new(TriviaKind::BlockComment, text)
    }

    /// A preprocessor directive line, e.g. `#if DEBUG`.
    pub fn directive(text: &str) -> Self {
        Trivia::new(TriviaKind::Directive, text)
    }

    pub fn kind(&self) -> TriviaKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Width of the atom in bytes.
    pub fn width(&self) -> u64 {
        self.text.len() as u64
    }

    pub fn is_directive(&self) -> bool {
        self.kind == TriviaKind::Directive
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TriviaKind::LineComment | TriviaKind::BlockComment)
    }
}

impl fmt::Display for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Total byte width of a trivia list.
pub fn trivia_width(trivia: &[Trivia]) -> u64 {
    trivia.iter().map(Trivia::width).sum()
}
