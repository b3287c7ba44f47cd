//! The green tree: immutable, position-independent nodes with structural
//! sharing.
//!
//! Green nodes know their kind, their children, and their total byte width,
//! but not where they sit in a document. Absolute positions come from the
//! red layer ([`crate::node`]), which threads offsets down from the root
//! during traversal.
//!
//! ## Immutability and sharing
//!
//! All green data lives behind `Arc`. An "edit" never mutates: the
//! `with_*`/`replace_child` builders return a new node whose unchanged
//! children are shared by reference with the original. Rebuilding a spine
//! from an edited node to the root is O(depth); everything off the spine
//! is shared. Old trees remain valid.
//!
//! ## Missing nodes
//!
//! A host parser represents malformed input with zero-width "missing"
//! tokens and nodes. The `missing` flag is preserved through builders so
//! rules can fail closed on them.

use std::fmt;
use std::sync::Arc;

use crate::kind::SyntaxKind;
use crate::trivia::{trivia_width, Trivia};

// ============================================================================
// Annotations
// ============================================================================

/// A marker attached to a green node for a downstream host pass.
///
/// kerf does not reformat or simplify; it annotates the nodes it produces
/// so the host's formatting/simplification passes know where to look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// The node (typically an explicit type name) may be simplified by the
    /// host, e.g. fully-qualified name reduction.
    Simplify,
    /// The node's surrounding whitespace should be normalized by the host
    /// formatter.
    Format,
}

// ============================================================================
// Green tokens
// ============================================================================

#[derive(Debug)]
struct GreenTokenData {
    kind: SyntaxKind,
    text: Box<str>,
    leading: Vec<Trivia>,
    trailing: Vec<Trivia>,
    missing: bool,
}

/// An immutable token: kind, text, and owned leading/trailing trivia.
#[derive(Debug, Clone)]
pub struct GreenToken {
    data: Arc<GreenTokenData>,
}

impl GreenToken {
    /// Create a token with no trivia.
    pub fn new(kind: SyntaxKind, text: impl Into<Box<str>>) -> Self {
        GreenToken {
            data: Arc::new(GreenTokenData {
                kind,
                text: text.into(),
                leading: Vec::new(),
                trailing: Vec::new(),
                missing: false,
            }),
        }
    }

    /// Create a zero-width missing token (parser error placeholder).
    pub fn missing(kind: SyntaxKind) -> Self {
        GreenToken {
            data: Arc::new(GreenTokenData {
                kind,
                text: "".into(),
                leading: Vec::new(),
                trailing: Vec::new(),
                missing: true,
            }),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    pub fn text(&self) -> &str {
        &self.data.text
    }

    pub fn leading_trivia(&self) -> &[Trivia] {
        &self.data.leading
    }

    pub fn trailing_trivia(&self) -> &[Trivia] {
        &self.data.trailing
    }

    pub fn is_missing(&self) -> bool {
        self.data.missing
    }

    /// Byte width of the token text alone.
    pub fn width(&self) -> u64 {
        self.data.text.len() as u64
    }

    /// Byte width including leading and trailing trivia.
    pub fn full_width(&self) -> u64 {
        self.leading_width() + self.width() + self.trailing_width()
    }

    pub fn leading_width(&self) -> u64 {
        trivia_width(&self.data.leading)
    }

    pub fn trailing_width(&self) -> u64 {
        trivia_width(&self.data.trailing)
    }

    /// A copy of this token with different leading trivia.
    pub fn with_leading_trivia(&self, leading: Vec<Trivia>) -> GreenToken {
        GreenToken {
            data: Arc::new(GreenTokenData {
                kind: self.data.kind,
                text: self.data.text.clone(),
                leading,
                trailing: self.data.trailing.clone(),
                missing: self.data.missing,
            }),
        }
    }

    /// A copy of this token with different trailing trivia.
    pub fn with_trailing_trivia(&self, trailing: Vec<Trivia>) -> GreenToken {
        GreenToken {
            data: Arc::new(GreenTokenData {
                kind: self.data.kind,
                text: self.data.text.clone(),
                leading: self.data.leading.clone(),
                trailing,
                missing: self.data.missing,
            }),
        }
    }

    /// Pointer identity (shared substructure check).
    pub fn ptr_eq(a: &GreenToken, b: &GreenToken) -> bool {
        Arc::ptr_eq(&a.data, &b.data)
    }
}

// ============================================================================
// Green elements and nodes
// ============================================================================

/// A child slot of a green node: either a nested node or a token.
#[derive(Debug, Clone)]
pub enum GreenElement {
    Node(GreenNode),
    Token(GreenToken),
}

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            GreenElement::Node(n) => n.kind(),
            GreenElement::Token(t) => t.kind(),
        }
    }

    pub fn full_width(&self) -> u64 {
        match self {
            GreenElement::Node(n) => n.full_width(),
            GreenElement::Token(t) => t.full_width(),
        }
    }

    pub fn as_node(&self) -> Option<&GreenNode> {
        match self {
            GreenElement::Node(n) => Some(n),
            GreenElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&GreenToken> {
        match self {
            GreenElement::Token(t) => Some(t),
            GreenElement::Node(_) => None,
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        GreenElement::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        GreenElement::Token(token)
    }
}

#[derive(Debug)]
struct GreenNodeData {
    kind: SyntaxKind,
    children: Vec<GreenElement>,
    full_width: u64,
    missing: bool,
    annotations: Vec<Annotation>,
}

/// An immutable interior node: kind plus ordered children.
#[derive(Debug, Clone)]
pub struct GreenNode {
    data: Arc<GreenNodeData>,
}

impl GreenNode {
    /// Create a node from its children. Width is cached at construction.
    pub fn new(kind: SyntaxKind, children: Vec<GreenElement>) -> Self {
        let full_width = children.iter().map(GreenElement::full_width).sum();
        GreenNode {
            data: Arc::new(GreenNodeData {
                kind,
                children,
                full_width,
                missing: false,
                annotations: Vec::new(),
            }),
        }
    }

    /// Create a zero-width missing node (parser error placeholder).
    pub fn missing(kind: SyntaxKind) -> Self {
        GreenNode {
            data: Arc::new(GreenNodeData {
                kind,
                children: Vec::new(),
                full_width: 0,
                missing: true,
                annotations: Vec::new(),
            }),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    pub fn children(&self) -> &[GreenElement] {
        &self.data.children
    }

    pub fn is_missing(&self) -> bool {
        self.data.missing
    }

    pub fn full_width(&self) -> u64 {
        self.data.full_width
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.data.annotations
    }

    pub fn has_annotation(&self, annotation: Annotation) -> bool {
        self.data.annotations.contains(&annotation)
    }

    /// Pointer identity (shared substructure check).
    pub fn ptr_eq(a: &GreenNode, b: &GreenNode) -> bool {
        Arc::ptr_eq(&a.data, &b.data)
    }

    /// The first token in this subtree, in source order.
    pub fn first_token(&self) -> Option<&GreenToken> {
        for child in &self.data.children {
            match child {
                GreenElement::Token(t) => return Some(t),
                GreenElement::Node(n) => {
                    if let Some(t) = n.first_token() {
                        return Some(t);
                    }
                }
            }
        }
        None
    }

    /// The last token in this subtree, in source order.
    pub fn last_token(&self) -> Option<&GreenToken> {
        for child in self.data.children.iter().rev() {
            match child {
                GreenElement::Token(t) => return Some(t),
                GreenElement::Node(n) => {
                    if let Some(t) = n.last_token() {
                        return Some(t);
                    }
                }
            }
        }
        None
    }

    /// Leading trivia of the subtree (the first token's leading list).
    pub fn leading_trivia(&self) -> Vec<Trivia> {
        self.first_token()
            .map(|t| t.leading_trivia().to_vec())
            .unwrap_or_default()
    }

    /// Trailing trivia of the subtree (the last token's trailing list).
    pub fn trailing_trivia(&self) -> Vec<Trivia> {
        self.last_token()
            .map(|t| t.trailing_trivia().to_vec())
            .unwrap_or_default()
    }

    /// Width of the subtree's leading trivia.
    pub fn leading_width(&self) -> u64 {
        self.first_token().map(GreenToken::leading_width).unwrap_or(0)
    }

    /// Width of the subtree's trailing trivia.
    pub fn trailing_width(&self) -> u64 {
        self.last_token().map(GreenToken::trailing_width).unwrap_or(0)
    }

    fn with_data(&self, f: impl FnOnce(&mut GreenNodeData)) -> GreenNode {
        let mut data = GreenNodeData {
            kind: self.data.kind,
            children: self.data.children.clone(),
            full_width: self.data.full_width,
            missing: self.data.missing,
            annotations: self.data.annotations.clone(),
        };
        f(&mut data);
        data.full_width = data.children.iter().map(GreenElement::full_width).sum();
        GreenNode { data: Arc::new(data) }
    }

    /// A copy of this node with the child at `index` replaced.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds (internal contract; callers index
    /// children they just enumerated).
    pub fn replace_child(&self, index: usize, new_child: GreenElement) -> GreenNode {
        self.with_data(|data| {
            data.children[index] = new_child;
        })
    }

    /// A copy of this node with the child at `index` removed.
    pub fn remove_child(&self, index: usize) -> GreenNode {
        self.with_data(|data| {
            data.children.remove(index);
        })
    }

    /// A copy of this node with `new_child` inserted at `index`.
    pub fn insert_child(&self, index: usize, new_child: GreenElement) -> GreenNode {
        self.with_data(|data| {
            data.children.insert(index, new_child);
        })
    }

    /// A copy of this node with the given annotation attached.
    pub fn with_annotation(&self, annotation: Annotation) -> GreenNode {
        self.with_data(|data| {
            if !data.annotations.contains(&annotation) {
                data.annotations.push(annotation);
            }
        })
    }

    /// A copy of this subtree with the first token's leading trivia
    /// replaced. Rebuilds only the spine down to that token.
    pub fn with_leading_trivia(&self, leading: Vec<Trivia>) -> GreenNode {
        self.rebuild_edge_token(true, |t| t.with_leading_trivia(leading))
    }

    /// A copy of this subtree with the last token's trailing trivia
    /// replaced.
    pub fn with_trailing_trivia(&self, trailing: Vec<Trivia>) -> GreenNode {
        self.rebuild_edge_token(false, |t| t.with_trailing_trivia(trailing))
    }

    fn rebuild_edge_token(
        &self,
        first: bool,
        replace: impl FnOnce(&GreenToken) -> GreenToken,
    ) -> GreenNode {
        // Walk toward the edge-most child that can hold a token. A childless
        // node has no token to re-trivia; return it unchanged.
        let Some(index) = self.edge_token_child(first) else {
            return self.clone();
        };
        let new_child: GreenElement = match &self.data.children[index] {
            GreenElement::Token(t) => replace(t).into(),
            GreenElement::Node(n) => n.rebuild_edge_token(first, replace).into(),
        };
        self.replace_child(index, new_child)
    }

    // Pick the child that actually contains the edge token: the first (or
    // last) child whose subtree is token-bearing.
    fn edge_token_child(&self, first: bool) -> Option<usize> {
        let mut indices: Vec<usize> = (0..self.data.children.len()).collect();
        if !first {
            indices.reverse();
        }
        for i in indices {
            match &self.data.children[i] {
                GreenElement::Token(_) => return Some(i),
                GreenElement::Node(n) => {
                    if n.first_token().is_some() {
                        return Some(i);
                    }
                }
            }
        }
        None
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}b", self.kind(), self.full_width())
    }
}
