//! The red tree: position-aware cursors over green nodes.
//!
//! A [`SyntaxNode`] pairs a green node with its parent link, its child
//! index, and its absolute byte offset. Red nodes are built lazily during
//! traversal and are cheap to clone; the green tree underneath is never
//! copied.
//!
//! ## Spans
//!
//! - `full_span()` covers the node including its leading and trailing
//!   trivia.
//! - `span()` covers the node's tokens only, trivia excluded. This is the
//!   span diagnostics anchor to.
//!
//! The containment invariant holds by construction: a node's full span
//! contains the full spans of all its descendants.

use std::fmt;
use std::sync::Arc;

use kerf_core::text::Span;

use crate::codegen::Codegen;
use crate::green::{GreenElement, GreenNode, GreenToken};
use crate::kind::SyntaxKind;
use crate::trivia::Trivia;

// ============================================================================
// SyntaxTree
// ============================================================================

/// An immutable tree snapshot: a green root plus the red root cursor.
///
/// Edits (see [`crate::rewrite`]) produce a new `SyntaxTree`; existing
/// snapshots remain valid and unchanged.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    root: GreenNode,
}

impl SyntaxTree {
    pub fn new(root: GreenNode) -> Self {
        SyntaxTree { root }
    }

    /// The green root (identity is meaningful: rewrites check membership
    /// against it).
    pub fn green_root(&self) -> &GreenNode {
        &self.root
    }

    /// The red root cursor at offset 0.
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode {
            data: Arc::new(NodeData {
                green: self.root.clone(),
                parent: None,
                index: 0,
                offset: 0,
            }),
        }
    }

    /// Render the full source text of this snapshot.
    pub fn text(&self) -> String {
        self.root.to_source()
    }

    /// Map a host cursor/selection span to a node.
    ///
    /// Descends to the innermost node whose full span contains `span`;
    /// with `innermost_for_tie == false`, climbs back to the outermost
    /// node sharing that same full span (mirroring host editor
    /// conventions for tie-breaking).
    pub fn find_node(&self, span: Span, innermost_for_tie: bool) -> Option<SyntaxNode> {
        let root = self.root();
        if !root.full_span().contains(&span) {
            return None;
        }
        let mut node = root;
        loop {
            let next = node
                .children()
                .find(|child| child.full_span().contains(&span));
            match next {
                Some(child) => node = child,
                None => break,
            }
        }
        if !innermost_for_tie {
            while let Some(parent) = node.parent() {
                if parent.full_span() == node.full_span() {
                    node = parent;
                } else {
                    break;
                }
            }
        }
        Some(node)
    }
}

// ============================================================================
// SyntaxNode
// ============================================================================

#[derive(Debug)]
struct NodeData {
    green: GreenNode,
    parent: Option<SyntaxNode>,
    index: usize,
    offset: u64,
}

/// A position-aware, cheaply-cloneable cursor over a green node.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    data: Arc<NodeData>,
}

impl SyntaxNode {
    pub fn kind(&self) -> SyntaxKind {
        self.data.green.kind()
    }

    pub fn green(&self) -> &GreenNode {
        &self.data.green
    }

    pub fn is_missing(&self) -> bool {
        self.data.green.is_missing()
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        self.data.parent.clone()
    }

    /// Index of this node in its parent's child list.
    pub fn index_in_parent(&self) -> usize {
        self.data.index
    }

    /// Absolute byte offset of the start of this node's full span.
    pub fn full_start(&self) -> u64 {
        self.data.offset
    }

    /// Span including leading/trailing trivia.
    pub fn full_span(&self) -> Span {
        Span::new(self.data.offset, self.data.offset + self.data.green.full_width())
    }

    /// Span of the node's tokens, trivia excluded.
    pub fn span(&self) -> Span {
        let full = self.full_span();
        let start = full.start + self.data.green.leading_width();
        let end = full.end - self.data.green.trailing_width();
        if start <= end {
            Span::new(start, end)
        } else {
            Span::empty_at(full.start)
        }
    }

    /// Child nodes and tokens in source order.
    pub fn children_with_tokens(&self) -> impl Iterator<Item = SyntaxElement> + '_ {
        let mut offset = self.data.offset;
        self.data
            .green
            .children()
            .iter()
            .enumerate()
            .map(move |(index, child)| {
                let child_offset = offset;
                offset += child.full_width();
                match child {
                    GreenElement::Node(green) => SyntaxElement::Node(SyntaxNode {
                        data: Arc::new(NodeData {
                            green: green.clone(),
                            parent: Some(self.clone()),
                            index,
                            offset: child_offset,
                        }),
                    }),
                    GreenElement::Token(green) => SyntaxElement::Token(SyntaxToken {
                        green: green.clone(),
                        parent: self.clone(),
                        index,
                        offset: child_offset,
                    }),
                }
            })
    }

    /// Child nodes in source order.
    pub fn children(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.children_with_tokens().filter_map(SyntaxElement::into_node)
    }

    /// Child tokens in source order.
    pub fn child_tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.children_with_tokens().filter_map(SyntaxElement::into_token)
    }

    /// First child node with the given kind.
    pub fn child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode> {
        self.children().find(|c| c.kind() == kind)
    }

    /// First child token with the given kind.
    pub fn token_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxToken> {
        self.child_tokens().find(|t| t.kind() == kind)
    }

    /// This node and all descendant nodes, pre-order.
    ///
    /// Implemented as an explicit stack; no recursion depth risk on deep
    /// trees.
    pub fn descendants_with_self(&self) -> Descendants {
        Descendants {
            stack: vec![self.clone()],
        }
    }

    /// All descendant tokens, in source order.
    pub fn descendant_tokens(&self) -> Vec<SyntaxToken> {
        let mut out = Vec::new();
        collect_tokens(self, &mut out);
        out
    }

    /// First token in this subtree.
    pub fn first_token(&self) -> Option<SyntaxToken> {
        self.descendant_tokens().into_iter().next()
    }

    /// Last token in this subtree.
    pub fn last_token(&self) -> Option<SyntaxToken> {
        self.descendant_tokens().into_iter().next_back()
    }

    /// Ancestors, nearest first, excluding this node.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> {
        let mut current = self.parent();
        std::iter::from_fn(move || {
            let next = current.take()?;
            current = next.parent();
            Some(next)
        })
    }

    /// This node followed by its ancestors, nearest first.
    pub fn ancestors_with_self(&self) -> impl Iterator<Item = SyntaxNode> {
        std::iter::once(self.clone()).chain(self.ancestors())
    }

    /// Render this subtree's source text, trivia included.
    pub fn text(&self) -> String {
        self.data.green.to_source()
    }

    /// Render this subtree's source text without the node's own leading
    /// and trailing trivia.
    pub fn text_trimmed(&self) -> String {
        let full = self.text();
        let lead = self.data.green.leading_width() as usize;
        let trail = self.data.green.trailing_width() as usize;
        full[lead..full.len() - trail].to_string()
    }

    /// Every trivia atom in this subtree whose own range falls entirely
    /// within `range` (absolute offsets). Token text is never included;
    /// this is the primitive behind directive checks and wrapper-removal
    /// trivia transfer.
    pub fn descendant_trivia_in_range(&self, range: Span) -> Vec<Trivia> {
        let mut out = Vec::new();
        for token in self.descendant_tokens() {
            let mut pos = token.full_start();
            for trivia in token.green().leading_trivia() {
                let span = Span::new(pos, pos + trivia.width());
                pos = span.end;
                if range.contains(&span) {
                    out.push(trivia.clone());
                }
            }
            pos += token.green().width();
            for trivia in token.green().trailing_trivia() {
                let span = Span::new(pos, pos + trivia.width());
                pos = span.end;
                if range.contains(&span) {
                    out.push(trivia.clone());
                }
            }
        }
        out
    }
}

fn collect_tokens(node: &SyntaxNode, out: &mut Vec<SyntaxToken>) {
    for child in node.children_with_tokens() {
        match child {
            SyntaxElement::Token(t) => out.push(t),
            SyntaxElement::Node(n) => collect_tokens(&n, out),
        }
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        GreenNode::ptr_eq(&self.data.green, &other.data.green)
            && self.data.offset == other.data.offset
    }
}

impl Eq for SyntaxNode {}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind(), self.full_span())
    }
}

/// Pre-order node iterator backed by an explicit stack.
pub struct Descendants {
    stack: Vec<SyntaxNode>,
}

impl Iterator for Descendants {
    type Item = SyntaxNode;

    fn next(&mut self) -> Option<SyntaxNode> {
        let node = self.stack.pop()?;
        let children: Vec<SyntaxNode> = node.children().collect();
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}

// ============================================================================
// SyntaxToken
// ============================================================================

/// A position-aware token cursor.
#[derive(Debug, Clone)]
pub struct SyntaxToken {
    green: GreenToken,
    parent: SyntaxNode,
    index: usize,
    offset: u64,
}

impl SyntaxToken {
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    pub fn text(&self) -> &str {
        self.green.text()
    }

    pub fn is_missing(&self) -> bool {
        self.green.is_missing()
    }

    pub fn parent(&self) -> &SyntaxNode {
        &self.parent
    }

    /// Index of this token in its parent's child list.
    pub fn index_in_parent(&self) -> usize {
        self.index
    }

    pub fn full_start(&self) -> u64 {
        self.offset
    }

    pub fn full_span(&self) -> Span {
        Span::new(self.offset, self.offset + self.green.full_width())
    }

    /// Span of the token text, trivia excluded.
    pub fn span(&self) -> Span {
        let start = self.offset + self.green.leading_width();
        Span::new(start, start + self.green.width())
    }

    pub fn leading_trivia(&self) -> &[Trivia] {
        self.green.leading_trivia()
    }

    pub fn trailing_trivia(&self) -> &[Trivia] {
        self.green.trailing_trivia()
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &Self) -> bool {
        GreenToken::ptr_eq(&self.green, &other.green) && self.offset == other.offset
    }
}

impl Eq for SyntaxToken {}

// ============================================================================
// SyntaxElement
// ============================================================================

/// Either a red node or a red token.
#[derive(Debug, Clone)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElement::Node(n) => n.kind(),
            SyntaxElement::Token(t) => t.kind(),
        }
    }

    pub fn full_span(&self) -> Span {
        match self {
            SyntaxElement::Node(n) => n.full_span(),
            SyntaxElement::Token(t) => t.full_span(),
        }
    }

    pub fn into_node(self) -> Option<SyntaxNode> {
        match self {
            SyntaxElement::Node(n) => Some(n),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<SyntaxToken> {
        match self {
            SyntaxElement::Token(t) => Some(t),
            SyntaxElement::Node(_) => None,
        }
    }
}
