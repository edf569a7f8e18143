//! Read-only preview rendering.
//!
//! Produces display nodes straight from parsed blocks; no editable tree
//! is involved and nothing is ever written back from a preview.

use serde::Serialize;

use crate::parsing::{Block, InlineSpan, LineKind, classify, parse_blocks, plain_text, tokenize};

/// A read-only display node for the view-only note mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PreviewBlock {
    /// Vertical spacing for a blank source line.
    Spacer,
    /// One emphasised line, styling applied.
    Heading { spans: Vec<InlineSpan> },
    /// One entry per bullet item, styling applied.
    Bullets { items: Vec<Vec<InlineSpan>> },
    /// A paragraph with styling applied.
    Paragraph { spans: Vec<InlineSpan> },
}

/// Renders a note body into read-only display nodes with inline styling.
pub fn render_preview(content: &str) -> Vec<PreviewBlock> {
    parse_blocks(content)
        .into_iter()
        .map(|block| match block {
            Block::Blank => PreviewBlock::Spacer,
            Block::Heading { text } => PreviewBlock::Heading {
                spans: tokenize(&text),
            },
            Block::BulletList { items } => PreviewBlock::Bullets {
                items: items.iter().map(|i| tokenize(i)).collect(),
            },
            Block::Paragraph { text } => PreviewBlock::Paragraph {
                spans: tokenize(&text),
            },
        })
        .collect()
}

/// One-line snippet for note lists: the first non-blank line with block
/// markers stripped and inline styling flattened to plain text.
pub fn snippet(content: &str) -> String {
    for line in content.replace("\r\n", "\n").split('\n') {
        match classify(line) {
            LineKind::Blank => continue,
            LineKind::Heading(text) => return plain_text(text),
            LineKind::Bullet(item) => return plain_text(item),
            LineKind::Text(text) => return plain_text(text.trim()),
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preview_mirrors_block_structure() {
        let blocks = render_preview("# T\n\n- a\n\npara");
        assert_eq!(blocks.len(), 5);
        assert!(matches!(blocks[0], PreviewBlock::Heading { .. }));
        assert!(matches!(blocks[1], PreviewBlock::Spacer));
        assert!(matches!(blocks[2], PreviewBlock::Bullets { .. }));
        assert!(matches!(blocks[3], PreviewBlock::Spacer));
        assert!(matches!(blocks[4], PreviewBlock::Paragraph { .. }));
    }

    #[test]
    fn preview_applies_inline_styling() {
        let blocks = render_preview("**b** x");
        assert_eq!(
            blocks,
            vec![PreviewBlock::Paragraph {
                spans: vec![
                    InlineSpan::Bold("b".to_string()),
                    InlineSpan::Text(" x".to_string()),
                ]
            }]
        );
    }

    #[test]
    fn snippet_takes_first_non_blank_line() {
        assert_eq!(snippet("# Title\ncontent"), "Title");
        assert_eq!(snippet("\n\n- first item\nrest"), "first item");
        assert_eq!(snippet("plain text"), "plain text");
    }

    #[test]
    fn snippet_flattens_inline_markers() {
        assert_eq!(snippet("**bold** and `code`"), "bold and code");
    }

    #[test]
    fn snippet_trims_authored_padding() {
        assert_eq!(snippet("  padded  \nrest"), "padded");
    }

    #[test]
    fn snippet_of_empty_content_is_empty() {
        assert_eq!(snippet(""), "");
        assert_eq!(snippet("\n\n\n"), "");
    }
}
