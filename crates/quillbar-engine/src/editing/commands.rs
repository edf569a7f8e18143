use std::ops::Range;

use crate::editing::{EditableTree, NodeId, NodeKind, Selection};

/// Inline style applied by [`Cmd::WrapSelection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStyle {
    Bold,
    Italic,
    Code,
}

impl InlineStyle {
    fn node_kind(self) -> NodeKind {
        match self {
            InlineStyle::Bold => NodeKind::Bold,
            InlineStyle::Italic => NodeKind::Italic,
            InlineStyle::Code => NodeKind::Code,
        }
    }
}

/// A user edit, expressed as an explicit command against the tree.
///
/// The host surface translates native input events (keystrokes, toolbar
/// buttons, Enter) into commands; nothing mutates the arena directly.
/// Every command is total: offsets clamp to character boundaries, and
/// commands against unknown or detached nodes apply nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Insert text into a text node at a byte offset. Targeting a block
    /// container inserts at the end of its last text run, creating one
    /// for an empty block.
    InsertText {
        node: NodeId,
        at: usize,
        text: String,
    },
    /// Delete a byte range from a text node.
    DeleteRange { node: NodeId, range: Range<usize> },
    /// Split the block containing a text node at a byte offset (Enter).
    /// List items split into sibling items; a heading's tail becomes a
    /// paragraph, matching how rich editors break out of headings.
    SplitBlock { node: NodeId, at: usize },
    /// Wrap the current selection in an inline style. Refused inside an
    /// existing style wrapper: inline styles never nest.
    WrapSelection { style: InlineStyle },
    /// Remove a whole block; removing the last item of a list removes
    /// the list container too.
    RemoveBlock { node: NodeId },
}

pub(crate) fn apply(tree: &mut EditableTree, cmd: Cmd) -> (Vec<NodeId>, Option<Selection>) {
    match cmd {
        Cmd::InsertText { node, at, text } => insert_text(tree, node, at, &text),
        Cmd::DeleteRange { node, range } => delete_range(tree, node, range),
        Cmd::SplitBlock { node, at } => split_block(tree, node, at),
        Cmd::WrapSelection { style } => wrap_selection(tree, style),
        Cmd::RemoveBlock { node } => remove_block(tree, node),
    }
}

const NOOP: (Vec<NodeId>, Option<Selection>) = (Vec::new(), None);

/// Largest character boundary in `s` not beyond `at`.
fn clamp_boundary(s: &str, at: usize) -> usize {
    let mut i = at.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// First text node in the subtree, depth-first.
fn first_text(tree: &EditableTree, id: NodeId) -> Option<NodeId> {
    if tree.kind(id)? == NodeKind::Text {
        return Some(id);
    }
    for &child in tree.children(id) {
        if let Some(t) = first_text(tree, child) {
            return Some(t);
        }
    }
    None
}

fn insert_text(
    tree: &mut EditableTree,
    node: NodeId,
    at: usize,
    text: &str,
) -> (Vec<NodeId>, Option<Selection>) {
    if text.is_empty() || !tree.is_attached(node) {
        return NOOP;
    }
    let Some(kind) = tree.kind(node) else {
        return NOOP;
    };

    let (target, at) = match kind {
        NodeKind::Text => (node, at),
        NodeKind::List | NodeKind::LineBreak => return NOOP,
        // Typing into a block (or style wrapper) lands at the end of its
        // last text run. An empty block gains its first text node here;
        // a Blank that gains text reads back as a paragraph.
        _ => match tree.children(node).last().copied().filter(|&c| {
            tree.kind(c) == Some(NodeKind::Text)
        }) {
            Some(last) => {
                let end = tree.text(last).map_or(0, str::len);
                (last, end)
            }
            None => {
                let t = tree.alloc_text("");
                tree.append_child(node, t);
                (t, 0)
            }
        },
    };

    let Some(n) = tree.node_mut(target) else {
        return NOOP;
    };
    let at = clamp_boundary(&n.text, at);
    n.text.insert_str(at, text);
    let caret = at + text.len();

    (
        vec![target],
        Some(Selection {
            node: target,
            range: caret..caret,
        }),
    )
}

fn delete_range(
    tree: &mut EditableTree,
    node: NodeId,
    range: Range<usize>,
) -> (Vec<NodeId>, Option<Selection>) {
    if !tree.is_attached(node) || tree.kind(node) != Some(NodeKind::Text) {
        return NOOP;
    }
    let Some(n) = tree.node_mut(node) else {
        return NOOP;
    };
    let start = clamp_boundary(&n.text, range.start.min(range.end));
    let end = clamp_boundary(&n.text, range.start.max(range.end));
    if start == end {
        return NOOP;
    }
    n.text.replace_range(start..end, "");

    (
        vec![node],
        Some(Selection {
            node,
            range: start..start,
        }),
    )
}

fn split_block(
    tree: &mut EditableTree,
    node: NodeId,
    at: usize,
) -> (Vec<NodeId>, Option<Selection>) {
    if !tree.is_attached(node) || tree.kind(node) != Some(NodeKind::Text) {
        return NOOP;
    }
    let Some(block) = tree.block_of(node) else {
        return NOOP;
    };
    if tree.kind(block) == Some(NodeKind::List) {
        return NOOP;
    }

    // Direct child of the block on the path down to the text node.
    let mut child = node;
    while tree.parent(child) != Some(block) {
        match tree.parent(child) {
            Some(p) => child = p,
            // Text node *is* the block's root-level node (no parent):
            // nothing sensible to split.
            None => return NOOP,
        }
    }

    let child_idx = tree.child_index(child).unwrap_or(0);

    // Work out where the tail begins. Splitting in the middle of a text
    // run that sits inside a style wrapper snaps to the wrapper boundary
    // instead of tearing the wrapper apart.
    let (tail_text, tail_from) = if child == node {
        let text = tree.text(node).unwrap_or_default().to_string();
        let at = clamp_boundary(&text, at);
        let tail = text[at..].to_string();
        if let Some(n) = tree.node_mut(node) {
            n.text.truncate(at);
        }
        (Some(tail).filter(|t| !t.is_empty()), child_idx + 1)
    } else if at == 0 {
        (None, child_idx)
    } else {
        (None, child_idx + 1)
    };

    let new_kind = match tree.kind(block) {
        Some(NodeKind::ListItem) => NodeKind::ListItem,
        // Enter at the end of a heading drops into a plain paragraph.
        _ => NodeKind::Paragraph,
    };
    let new_block = tree.alloc(new_kind);

    if let Some(t) = tail_text {
        let tn = tree.alloc_text(&t);
        tree.append_child(new_block, tn);
    }
    let movers: Vec<NodeId> = tree.children(block)[tail_from.min(tree.children(block).len())..]
        .to_vec();
    for m in movers {
        tree.detach(m);
        tree.append_child(new_block, m);
    }
    if tree.children(new_block).is_empty() {
        let t = tree.alloc_text("");
        tree.append_child(new_block, t);
    }

    // New block lands right after the split block, as a list sibling for
    // items and a top-level root otherwise.
    match tree.parent(block) {
        Some(p) => {
            let idx = tree.child_index(block).unwrap_or(0);
            tree.insert_child_at(p, idx + 1, new_block);
        }
        None => {
            let idx = tree.root_index(block).unwrap_or(0);
            tree.insert_root_at(idx + 1, new_block);
        }
    }

    let caret = first_text(tree, new_block);
    (
        vec![block, new_block],
        caret.map(|node| Selection { node, range: 0..0 }),
    )
}

fn wrap_selection(tree: &mut EditableTree, style: InlineStyle) -> (Vec<NodeId>, Option<Selection>) {
    let Some(sel) = tree.selection().cloned() else {
        return NOOP;
    };
    let node = sel.node;
    if !tree.is_attached(node) || tree.kind(node) != Some(NodeKind::Text) {
        return NOOP;
    }
    // No nesting: wrapping text already inside a style wrapper is refused.
    if let Some(p) = tree.parent(node) {
        if tree.kind(p).is_some_and(NodeKind::is_inline_style) {
            return NOOP;
        }
    }

    let text = tree.text(node).unwrap_or_default().to_string();
    let start = clamp_boundary(&text, sel.range.start.min(sel.range.end));
    let end = clamp_boundary(&text, sel.range.start.max(sel.range.end));
    if start == end {
        return NOOP;
    }

    let before = &text[..start];
    let mid = &text[start..end];
    let after = &text[end..];

    let Some(idx) = tree.child_index(node) else {
        return NOOP;
    };
    let parent = tree.parent(node);

    if let Some(n) = tree.node_mut(node) {
        n.text.truncate(start);
    }

    let wrapper = tree.alloc(style.node_kind());
    let inner = tree.alloc_text(mid);
    tree.append_child(wrapper, inner);

    let insert_at = if before.is_empty() {
        tree.detach(node);
        idx
    } else {
        idx + 1
    };

    let insert_sibling = |tree: &mut EditableTree, at: usize, id: NodeId| match parent {
        Some(p) => tree.insert_child_at(p, at, id),
        None => tree.insert_root_at(at, id),
    };
    insert_sibling(tree, insert_at, wrapper);
    if !after.is_empty() {
        let tail = tree.alloc_text(after);
        insert_sibling(tree, insert_at + 1, tail);
    }

    let caret = tree.text(inner).map_or(0, str::len);
    (
        vec![parent.unwrap_or(wrapper)],
        Some(Selection {
            node: inner,
            range: caret..caret,
        }),
    )
}

fn remove_block(tree: &mut EditableTree, node: NodeId) -> (Vec<NodeId>, Option<Selection>) {
    if !tree.is_attached(node) || !tree.kind(node).is_some_and(NodeKind::is_block) {
        return NOOP;
    }

    // Drop the selection if it pointed inside the removed subtree.
    if let Some(sel) = tree.selection() {
        if tree.is_descendant(sel.node, node) {
            tree.set_selection(None);
        }
    }

    let parent = tree.parent(node);
    tree.detach(node);

    // Removing the last item empties the list; drop the container too.
    if let Some(list) = parent {
        if tree.kind(list) == Some(NodeKind::List) && tree.children(list).is_empty() {
            tree.detach(list);
            return (vec![list], None);
        }
        return (vec![list], None);
    }
    (vec![node], None)
}
