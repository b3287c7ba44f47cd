//! The rewrite engine: structural edits over immutable trees.
//!
//! Every edit takes a snapshot plus a target node inside it and returns a
//! **new** snapshot; the original remains valid. Unaffected subtrees are
//! shared between old and new trees, so edits cost O(depth), not O(size).
//!
//! ## Trivia transfer
//!
//! By default a replacement inherits the target's leading and trailing
//! trivia, so comments and indentation around the edited node survive.
//! Wrapper-removal edits instead use [`unwrap_to_inner`]: trivia sitting
//! *inside* the removed wrapper (between its start and the surviving inner
//! expression, and between the inner expression and the wrapper's end) is
//! reattached to the survivor, so a comment inside `new Handler(/*x*/ M)`
//! is not lost.
//!
//! ## Atomicity
//!
//! An edit either returns a complete new tree or fails with
//! [`RewriteError`]; no intermediate state is observable. A target that is
//! not part of the given snapshot (stale cursor after a host-side change)
//! fails with [`RewriteError::NotInTree`].

use thiserror::Error;
use tracing::trace;

use kerf_core::text::Span;

use crate::green::{Annotation, GreenNode};
use crate::node::{SyntaxNode, SyntaxTree};

/// Why an edit could not be applied. The input tree is never modified.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    /// The target node does not belong to the tree being edited.
    #[error("target node is not part of the edited tree")]
    NotInTree,
    /// The target is the root; it has no parent to splice into.
    #[error("cannot remove the root node")]
    CannotRemoveRoot,
}

/// Check that `target` was obtained from `tree`'s root.
fn ensure_in_tree(tree: &SyntaxTree, target: &SyntaxNode) -> Result<(), RewriteError> {
    let mut top = target.clone();
    while let Some(parent) = top.parent() {
        top = parent;
    }
    if GreenNode::ptr_eq(top.green(), tree.green_root()) {
        Ok(())
    } else {
        Err(RewriteError::NotInTree)
    }
}

/// Rebuild the spine from `target` to the root with `replacement` spliced
/// into the target's slot.
fn rebuild_spine(target: &SyntaxNode, replacement: GreenNode) -> GreenNode {
    let mut new_green = replacement;
    let mut child = target.clone();
    while let Some(parent) = child.parent() {
        new_green = parent
            .green()
            .replace_child(child.index_in_parent(), new_green.into());
        child = parent;
    }
    new_green
}

/// Replace `target` with `replacement`, as-is.
///
/// The replacement's own trivia is used unchanged; callers that want the
/// target's surrounding trivia preserved should use
/// [`replace_with_trivia_from`].
pub fn replace(
    tree: &SyntaxTree,
    target: &SyntaxNode,
    replacement: GreenNode,
) -> Result<SyntaxTree, RewriteError> {
    ensure_in_tree(tree, target)?;
    trace!(target = %target, "rewrite: replace");
    Ok(SyntaxTree::new(rebuild_spine(target, replacement)))
}

/// Replace `target` with the built replacement carrying the target's
/// leading and trailing trivia.
///
/// This is the default trivia-transfer rule: whitespace and comments
/// around the old node survive onto the new one.
pub fn replace_with_trivia_from(
    tree: &SyntaxTree,
    target: &SyntaxNode,
    build: impl FnOnce() -> GreenNode,
) -> Result<SyntaxTree, RewriteError> {
    ensure_in_tree(tree, target)?;
    let replacement = build()
        .with_leading_trivia(target.green().leading_trivia())
        .with_trailing_trivia(target.green().trailing_trivia());
    replace(tree, target, replacement)
}

/// Remove `target` from its parent's child list.
///
/// The removed node's trivia is dropped with it.
pub fn remove(tree: &SyntaxTree, target: &SyntaxNode) -> Result<SyntaxTree, RewriteError> {
    ensure_in_tree(tree, target)?;
    let Some(parent) = target.parent() else {
        return Err(RewriteError::CannotRemoveRoot);
    };
    trace!(target = %target, "rewrite: remove");
    let new_parent = parent.green().remove_child(target.index_in_parent());
    Ok(SyntaxTree::new(rebuild_spine(&parent, new_parent)))
}

/// Replace a wrapper node with one of its inner descendants, reattaching
/// the trivia that sat inside the wrapper.
///
/// Trivia strictly between the wrapper's full start and the inner node's
/// span start becomes the survivor's leading trivia; trivia between the
/// inner node's span end and the wrapper's full end becomes its trailing
/// trivia. Token text belonging to the removed wrapper syntax (keywords,
/// parentheses) is discarded.
pub fn unwrap_to_inner(
    tree: &SyntaxTree,
    wrapper: &SyntaxNode,
    inner: &SyntaxNode,
) -> Result<SyntaxTree, RewriteError> {
    ensure_in_tree(tree, wrapper)?;
    debug_assert!(
        wrapper.full_span().contains(&inner.full_span()),
        "unwrap_to_inner: inner must be a descendant of wrapper"
    );
    if !wrapper.full_span().contains(&inner.full_span()) {
        return Err(RewriteError::NotInTree);
    }

    let wrapper_full = wrapper.full_span();
    let inner_span = inner.span();
    let leading =
        wrapper.descendant_trivia_in_range(Span::new(wrapper_full.start, inner_span.start));
    let trailing = wrapper.descendant_trivia_in_range(Span::new(inner_span.end, wrapper_full.end));
    trace!(
        wrapper = %wrapper,
        inner = %inner,
        leading = leading.len(),
        trailing = trailing.len(),
        "rewrite: unwrap_to_inner"
    );

    let replacement = inner
        .green()
        .clone()
        .with_annotation(Annotation::Format)
        .with_leading_trivia(leading)
        .with_trailing_trivia(trailing);
    replace(tree, wrapper, replacement)
}
