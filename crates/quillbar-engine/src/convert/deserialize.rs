use crate::editing::{EditableTree, NodeId, NodeKind};

/// Reconstructs the canonical text body from a (possibly user-mutated)
/// editable tree.
///
/// This is the harder direction: edits may have split, merged or inserted
/// nodes in shapes the serializer never produces, so block structure is
/// *inferred* from each top-level node rather than trusted:
///
/// - a `List` emits one `- item` line per child, followed by a blank
///   separator line (skipped when an explicit blank node follows, so the
///   separator is never doubled)
/// - a `Heading` emits `# text`
/// - any other block container emits its flattened text, or a blank line
///   when the text is empty
/// - anything else falls back to its flattened text when non-empty
///
/// Trailing blank lines are stripped; they are deliberately not persisted.
pub fn from_editable_tree(tree: &EditableTree) -> String {
    let mut lines: Vec<String> = vec![];

    let roots = tree.roots();
    for (i, &root) in roots.iter().enumerate() {
        match tree.kind(root) {
            Some(NodeKind::List) => {
                for &item in tree.children(root) {
                    lines.push(format!("- {}", flatten_children(tree, item)));
                }
                // Separator after the list, unless the tree already holds
                // an explicit blank there.
                let next_is_blank = roots
                    .get(i + 1)
                    .is_some_and(|&n| tree.kind(n) == Some(NodeKind::Blank));
                if !next_is_blank {
                    lines.push(String::new());
                }
            }
            Some(NodeKind::Heading) => {
                lines.push(format!("# {}", flatten_children(tree, root)));
            }
            Some(kind) if kind.is_block() => {
                // Paragraph, ListItem stranded at top level, or a Blank
                // that picked up text through editing.
                let text = flatten_children(tree, root);
                lines.push(text);
            }
            Some(_) => {
                // Inline node at the top level: keep its text if any.
                let text = flatten_node(tree, root);
                if !text.is_empty() {
                    lines.push(text);
                }
            }
            None => {}
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Flattens a node's children to markdown, depth-first.
fn flatten_children(tree: &EditableTree, id: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(id) {
        out.push_str(&flatten_node(tree, child));
    }
    out
}

/// Flattens one node to markdown, wrapping styled nodes in their markers.
///
/// Code children are taken as raw text rather than recursively flattened,
/// matching the tokenizer's no-nesting rule: a bold node that somehow
/// ended up inside a code wrapper must not re-introduce `**` semantics.
fn flatten_node(tree: &EditableTree, id: NodeId) -> String {
    match tree.kind(id) {
        Some(NodeKind::Text) => tree.text(id).unwrap_or_default().to_string(),
        Some(NodeKind::LineBreak) => "\n".to_string(),
        Some(NodeKind::Bold) => format!("**{}**", flatten_children(tree, id)),
        Some(NodeKind::Italic) => format!("*{}*", flatten_children(tree, id)),
        Some(NodeKind::Code) => format!("`{}`", raw_text(tree, id)),
        // Block node nested where an inline was expected: just its text.
        Some(_) => flatten_children(tree, id),
        None => String::new(),
    }
}

/// Concatenated raw text of a subtree, ignoring style wrappers entirely.
fn raw_text(tree: &EditableTree, id: NodeId) -> String {
    let mut out = tree.text(id).unwrap_or_default().to_string();
    for &child in tree.children(id) {
        out.push_str(&raw_text(tree, child));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::to_editable_tree;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_headings_and_paragraphs() {
        let tree = to_editable_tree("# Title\n\nbody");
        assert_eq!(from_editable_tree(&tree), "# Title\n\nbody");
    }

    #[test]
    fn heading_level_normalizes_to_one() {
        let tree = to_editable_tree("### Deep");
        assert_eq!(from_editable_tree(&tree), "# Deep");
    }

    #[test]
    fn list_items_get_dash_markers() {
        let tree = to_editable_tree("- a\n- b\n\ntext");
        assert_eq!(from_editable_tree(&tree), "- a\n- b\n\ntext");
    }

    #[test]
    fn list_without_following_blank_gains_separator() {
        // Lossy-but-stable: the first round inserts the separator line,
        // after which the text is a fixed point.
        let tree = to_editable_tree("- a\ntext");
        let text = from_editable_tree(&tree);
        assert_eq!(text, "- a\n\ntext");
        assert_eq!(from_editable_tree(&to_editable_tree(&text)), text);
    }

    #[test]
    fn styled_spans_round_trip_markers() {
        let tree = to_editable_tree("**b** and *i* and `c`");
        assert_eq!(from_editable_tree(&tree), "**b** and *i* and `c`");
    }

    #[test]
    fn trailing_blanks_are_trimmed() {
        let tree = to_editable_tree("a\n\n\n");
        assert_eq!(from_editable_tree(&tree), "a");
    }

    #[test]
    fn empty_tree_serializes_to_empty_string() {
        assert_eq!(from_editable_tree(&EditableTree::new()), "");
    }

    #[test]
    fn line_break_nodes_map_to_newline() {
        // A rich edit can put a hard break inside a paragraph; it must
        // come back as a real newline, not a space join.
        let mut tree = to_editable_tree("ab");
        let para = tree.roots()[0];
        let br = tree.alloc(NodeKind::LineBreak);
        tree.append_child(para, br);
        let tail = tree.alloc_text("cd");
        tree.append_child(para, tail);

        assert_eq!(from_editable_tree(&tree), "ab\ncd");
    }

    #[test]
    fn stray_inline_root_falls_back_to_text() {
        let mut tree = EditableTree::new();
        let bold = tree.alloc(NodeKind::Bold);
        let t = tree.alloc_text("loose");
        tree.append_child(bold, t);
        tree.push_root(bold);

        assert_eq!(from_editable_tree(&tree), "**loose**");
    }

    #[test]
    fn code_children_are_raw_not_recursive() {
        let mut tree = EditableTree::new();
        let para = tree.alloc(NodeKind::Paragraph);
        let code = tree.alloc(NodeKind::Code);
        let bold = tree.alloc(NodeKind::Bold);
        let t = tree.alloc_text("x");
        tree.push_root(para);
        tree.append_child(para, code);
        tree.append_child(code, bold);
        tree.append_child(bold, t);

        // The bold wrapper inside the code zone contributes no markers.
        assert_eq!(from_editable_tree(&tree), "`x`");
    }

    #[test]
    fn blank_that_gained_text_reads_as_paragraph() {
        use crate::editing::Cmd;
        let mut tree = to_editable_tree("a\n\nb");
        let blank = tree.roots()[1];
        tree.apply(Cmd::InsertText {
            node: blank,
            at: 0,
            text: "typed".to_string(),
        });
        assert_eq!(from_editable_tree(&tree), "a\ntyped\nb");
    }
}
