use crate::editing::{EditableTree, NodeId, NodeKind};
use crate::parsing::{Block, InlineSpan, parse_blocks, tokenize};

/// Projects a canonical text body into an editable tree.
///
/// One tree root per parsed block. Blank lines become placeholder nodes
/// so the edit surface preserves vertical spacing exactly; without them,
/// consecutive blank lines would collapse on the first round-trip.
///
/// This is a pure, idempotent projection: the same content always yields
/// a structurally identical tree.
pub fn to_editable_tree(content: &str) -> EditableTree {
    let mut tree = EditableTree::new();
    for block in parse_blocks(content) {
        match block {
            Block::Blank => {
                let id = tree.alloc(NodeKind::Blank);
                tree.push_root(id);
            }
            Block::Heading { text } => {
                let id = tree.alloc(NodeKind::Heading);
                fill_inline(&mut tree, id, &text);
                tree.push_root(id);
            }
            Block::Paragraph { text } => {
                let id = tree.alloc(NodeKind::Paragraph);
                fill_inline(&mut tree, id, &text);
                tree.push_root(id);
            }
            Block::BulletList { items } => {
                let list = tree.alloc(NodeKind::List);
                for item in &items {
                    let li = tree.alloc(NodeKind::ListItem);
                    fill_inline(&mut tree, li, item);
                    tree.append_child(list, li);
                }
                tree.push_root(list);
            }
        }
    }
    tree
}

/// Populates a block container with inline nodes from the tokenizer.
///
/// Styled spans become a wrapper node with a single text child; the
/// payload is verbatim, matching the tokenizer's no-nesting rule.
fn fill_inline(tree: &mut EditableTree, parent: NodeId, text: &str) {
    for span in tokenize(text) {
        match span {
            InlineSpan::Text(t) => {
                let id = tree.alloc_text(&t);
                tree.append_child(parent, id);
            }
            InlineSpan::Bold(t) => append_styled(tree, parent, NodeKind::Bold, &t),
            InlineSpan::Italic(t) => append_styled(tree, parent, NodeKind::Italic, &t),
            InlineSpan::Code(t) => append_styled(tree, parent, NodeKind::Code, &t),
        }
    }
}

fn append_styled(tree: &mut EditableTree, parent: NodeId, kind: NodeKind, text: &str) {
    let wrapper = tree.alloc(kind);
    let inner = tree.alloc_text(text);
    tree.append_child(wrapper, inner);
    tree.append_child(parent, wrapper);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_become_placeholder_nodes() {
        let tree = to_editable_tree("a\n\n\nb");
        let kinds: Vec<_> = tree.roots().iter().map(|&r| tree.kind(r).unwrap()).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Paragraph,
                NodeKind::Blank,
                NodeKind::Blank,
                NodeKind::Paragraph,
            ]
        );
    }

    #[test]
    fn heading_gets_inline_children() {
        let tree = to_editable_tree("# A **b** c");
        let h = tree.roots()[0];
        assert_eq!(tree.kind(h), Some(NodeKind::Heading));
        let kids = tree.children(h);
        assert_eq!(tree.kind(kids[0]), Some(NodeKind::Text));
        assert_eq!(tree.kind(kids[1]), Some(NodeKind::Bold));
        assert_eq!(tree.kind(kids[2]), Some(NodeKind::Text));
        assert_eq!(tree.text(tree.children(kids[1])[0]), Some("b"));
    }

    #[test]
    fn bullet_list_one_item_node_per_line() {
        let tree = to_editable_tree("- one\n- `two`");
        let list = tree.roots()[0];
        assert_eq!(tree.kind(list), Some(NodeKind::List));
        let items = tree.children(list);
        assert_eq!(items.len(), 2);
        assert_eq!(tree.kind(items[0]), Some(NodeKind::ListItem));
        let second = tree.children(items[1]);
        assert_eq!(tree.kind(second[0]), Some(NodeKind::Code));
    }

    #[test]
    fn projection_is_idempotent() {
        let content = "# T\n\n- a\n- b\n\npara **bold**";
        assert_eq!(to_editable_tree(content), to_editable_tree(content));
    }

    #[test]
    fn empty_content_empty_tree() {
        assert!(to_editable_tree("").is_empty());
    }
}
