//! Source rendering for green trees.
//!
//! Rendering is the inverse of parsing: emitting every token with its
//! leading and trailing trivia reproduces the original source text
//! byte-for-byte. Tests lean on this to prove that rewrites preserve
//! formatting and comments.

use crate::green::{GreenElement, GreenNode, GreenToken};
use crate::trivia::Trivia;

/// Accumulates rendered source text.
#[derive(Debug, Default)]
pub struct CodegenState {
    out: String,
}

impl CodegenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Render a tree fragment into a [`CodegenState`].
pub trait Codegen {
    fn codegen(&self, state: &mut CodegenState);

    /// Convenience: render to a fresh string.
    fn to_source(&self) -> String {
        let mut state = CodegenState::new();
        self.codegen(&mut state);
        state.finish()
    }
}

impl Codegen for Trivia {
    fn codegen(&self, state: &mut CodegenState) {
        state.push(self.text());
    }
}

impl Codegen for GreenToken {
    fn codegen(&self, state: &mut CodegenState) {
        for trivia in self.leading_trivia() {
            trivia.codegen(state);
        }
        state.push(self.text());
        for trivia in self.trailing_trivia() {
            trivia.codegen(state);
        }
    }
}

impl Codegen for GreenNode {
    fn codegen(&self, state: &mut CodegenState) {
        for child in self.children() {
            child.codegen(state);
        }
    }
}

impl Codegen for GreenElement {
    fn codegen(&self, state: &mut CodegenState) {
        match self {
            GreenElement::Node(n) => n.codegen(state),
            GreenElement::Token(t) => t.codegen(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::SyntaxKind as K;

    #[test]
    fn test_token_renders_with_trivia() {
        let token = GreenToken::new(K::IdentifierToken, "foo")
            .with_leading_trivia(vec![Trivia::whitespace("  ")])
            .with_trailing_trivia(vec![Trivia::line_comment("// t"), Trivia::newline()]);
        assert_eq!(token.to_source(), "  foo// t\n");
    }

    #[test]
    fn test_rendered_length_matches_full_width() {
        let node = GreenNode::new(
            K::ArgumentList,
            vec![
                GreenToken::new(K::OpenParenToken, "(").into(),
                GreenToken::new(K::IdentifierToken, "x")
                    .with_trailing_trivia(vec![Trivia::space()])
                    .into(),
                GreenToken::new(K::CloseParenToken, ")").into(),
            ],
        );
        assert_eq!(node.to_source().len() as u64, node.full_width());
    }
}
