use std::ops::Range;

use crate::editing::{Cmd, Patch, commands};

/// Stable handle to a node in an [`EditableTree`] arena.
///
/// Ids are never reused within one tree. A detached node's id stays valid
/// as a handle but the node is no longer reachable from the roots, and
/// commands targeting it become no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tagged kind of an editable-tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Empty-line placeholder preserving vertical spacing.
    Blank,
    /// Single emphasised line; level is not tracked.
    Heading,
    /// Plain block container.
    Paragraph,
    /// Bullet list container; children are `ListItem`s.
    List,
    /// One bullet item; child of a `List`.
    ListItem,
    /// Inline style wrappers. Never nested inside each other.
    Bold,
    Italic,
    Code,
    /// Leaf carrying the actual text payload.
    Text,
    /// Hard line break inside a block.
    LineBreak,
}

impl NodeKind {
    /// Block-level containers that can appear at the top of the tree.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            NodeKind::Blank
                | NodeKind::Heading
                | NodeKind::Paragraph
                | NodeKind::List
                | NodeKind::ListItem
        )
    }

    /// Inline style wrappers (`Bold`/`Italic`/`Code`).
    pub fn is_inline_style(self) -> bool {
        matches!(self, NodeKind::Bold | NodeKind::Italic | NodeKind::Code)
    }
}

/// Cursor or selection anchored to a single text node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The text node holding the caret.
    pub node: NodeId,
    /// Byte range within that node's text; empty range is a caret.
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    pub kind: NodeKind,
    /// Payload for `Text` nodes; empty for every other kind.
    pub text: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// The live, user-mutable rich-text representation backing the edit
/// surface: a mutable node arena plus a selection.
///
/// The tree is the editing-time counterpart of the persisted text body.
/// It is produced by [`crate::convert::to_editable_tree`], mutated through
/// [`Cmd`]s compiled by [`EditableTree::apply`], and read back into
/// canonical text by [`crate::convert::from_editable_tree`], which infers
/// structure from node shape rather than trusting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditableTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    selection: Option<Selection>,
    version: u64,
}

const NO_CHILDREN: &[NodeId] = &[];

impl EditableTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level block nodes in document order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind)
    }

    /// Text payload of a node; empty for non-text kinds, `None` for an
    /// unknown id.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.text.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children in order; empty slice for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(NO_CHILDREN, |n| &n.children)
    }

    /// Version counter, incremented once per applied command.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    /// Applies a command, returning the resulting [`Patch`].
    ///
    /// Commands are total: out-of-range offsets clamp to character
    /// boundaries and commands against unknown or detached nodes apply
    /// nothing. The version bumps on every call either way, so hosts can
    /// re-render unconditionally after an input event.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let (changed, new_selection) = commands::apply(self, cmd);
        if let Some(sel) = &new_selection {
            self.selection = Some(sel.clone());
        }
        self.version += 1;
        Patch {
            changed,
            new_selection,
            version: self.version,
        }
    }

    // ---- arena internals, shared with convert and commands ----

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            text: String::new(),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub(crate) fn alloc_text(&mut self, text: &str) -> NodeId {
        let id = self.alloc(NodeKind::Text);
        self.nodes[id.index()].text = text.to_string();
        id
    }

    pub(crate) fn push_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    pub(crate) fn insert_root_at(&mut self, index: usize, id: NodeId) {
        let index = index.min(self.roots.len());
        self.roots.insert(index, id);
    }

    pub(crate) fn root_index(&self, id: NodeId) -> Option<usize> {
        self.roots.iter().position(|&r| r == id)
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(n) = self.node_mut(child) {
            n.parent = Some(parent);
        }
        if let Some(n) = self.node_mut(parent) {
            n.children.push(child);
        }
    }

    pub(crate) fn insert_child_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if let Some(n) = self.node_mut(child) {
            n.parent = Some(parent);
        }
        if let Some(n) = self.node_mut(parent) {
            let index = index.min(n.children.len());
            n.children.insert(index, child);
        }
    }

    /// Position of `id` within its parent's child list, or within the
    /// roots when it has no parent.
    pub(crate) fn child_index(&self, id: NodeId) -> Option<usize> {
        match self.parent(id) {
            Some(p) => self.children(p).iter().position(|&c| c == id),
            None => self.root_index(id),
        }
    }

    /// Unlinks a node from its parent or from the roots. The slot stays
    /// allocated; the subtree simply becomes unreachable.
    pub(crate) fn detach(&mut self, id: NodeId) {
        match self.parent(id) {
            Some(p) => {
                if let Some(n) = self.node_mut(p) {
                    n.children.retain(|&c| c != id);
                }
                if let Some(n) = self.node_mut(id) {
                    n.parent = None;
                }
            }
            None => self.roots.retain(|&r| r != id),
        }
    }

    /// True when the node is reachable from the roots.
    pub(crate) fn is_attached(&self, id: NodeId) -> bool {
        let mut cur = id;
        loop {
            match self.parent(cur) {
                Some(p) => cur = p,
                None => return self.roots.contains(&cur),
            }
        }
    }

    /// Nearest ancestor (possibly `id` itself) that is block-level.
    pub(crate) fn block_of(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = id;
        loop {
            if self.kind(cur)?.is_block() {
                return Some(cur);
            }
            cur = self.parent(cur)?;
        }
    }

    /// True when `id` lies in the subtree rooted at `ancestor`.
    pub(crate) fn is_descendant(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cur = id;
        loop {
            if cur == ancestor {
                return true;
            }
            match self.parent(cur) {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree() {
        let tree = EditableTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.version(), 0);
        assert!(tree.selection().is_none());
    }

    #[test]
    fn alloc_and_link() {
        let mut tree = EditableTree::new();
        let para = tree.alloc(NodeKind::Paragraph);
        let text = tree.alloc_text("hi");
        tree.push_root(para);
        tree.append_child(para, text);

        assert_eq!(tree.roots(), &[para]);
        assert_eq!(tree.children(para), &[text]);
        assert_eq!(tree.parent(text), Some(para));
        assert_eq!(tree.text(text), Some("hi"));
        assert!(tree.is_attached(text));
    }

    #[test]
    fn detach_makes_subtree_unreachable() {
        let mut tree = EditableTree::new();
        let para = tree.alloc(NodeKind::Paragraph);
        let text = tree.alloc_text("hi");
        tree.push_root(para);
        tree.append_child(para, text);

        tree.detach(para);
        assert!(tree.roots().is_empty());
        assert!(!tree.is_attached(para));
        assert!(!tree.is_attached(text));
        // The handle itself stays valid
        assert_eq!(tree.text(text), Some("hi"));
    }

    #[test]
    fn block_of_walks_through_inline_styles() {
        let mut tree = EditableTree::new();
        let para = tree.alloc(NodeKind::Paragraph);
        let bold = tree.alloc(NodeKind::Bold);
        let text = tree.alloc_text("b");
        tree.push_root(para);
        tree.append_child(para, bold);
        tree.append_child(bold, text);

        assert_eq!(tree.block_of(text), Some(para));
        assert_eq!(tree.block_of(bold), Some(para));
        assert_eq!(tree.block_of(para), Some(para));
    }

    #[test]
    fn child_index_covers_roots_and_children() {
        let mut tree = EditableTree::new();
        let a = tree.alloc(NodeKind::Paragraph);
        let b = tree.alloc(NodeKind::Paragraph);
        tree.push_root(a);
        tree.push_root(b);
        assert_eq!(tree.child_index(b), Some(1));

        let t = tree.alloc_text("x");
        tree.append_child(b, t);
        assert_eq!(tree.child_index(t), Some(0));
    }
}
