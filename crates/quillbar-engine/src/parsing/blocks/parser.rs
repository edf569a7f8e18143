use super::classify::{LineKind, classify};
use super::types::Block;

/// Parses a full note body into [`Block`]s.
///
/// Line endings are normalised (`\r\n` to `\n`) before splitting; a final
/// trailing newline terminates the last line rather than opening a new
/// blank one. The scan is a single top-to-bottom cursor pass:
///
/// - blank line: one `Blank`
/// - heading line: one `Heading`
/// - bullet line: this line plus every immediately following bullet line
///   becomes one `BulletList`
/// - anything else: this line plus every following line that is non-blank
///   and starts neither a heading nor a bullet run, space-joined into one
///   `Paragraph`
///
/// Deterministic and total: any input, including binary garbage pushed
/// through a lossy decode, maps to a block sequence without error.
pub fn parse_blocks(content: &str) -> Vec<Block> {
    let normalized = content.replace("\r\n", "\n");
    let mut lines: Vec<&str> = normalized.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }

    let mut blocks = vec![];
    let mut i = 0;
    while i < lines.len() {
        match classify(lines[i]) {
            LineKind::Blank => {
                blocks.push(Block::Blank);
                i += 1;
            }
            LineKind::Heading(text) => {
                blocks.push(Block::Heading {
                    text: text.to_string(),
                });
                i += 1;
            }
            LineKind::Bullet(first) => {
                let mut items = vec![first.to_string()];
                i += 1;
                while i < lines.len() {
                    match classify(lines[i]) {
                        LineKind::Bullet(item) => {
                            items.push(item.to_string());
                            i += 1;
                        }
                        _ => break,
                    }
                }
                blocks.push(Block::BulletList { items });
            }
            LineKind::Text(first) => {
                let mut text = first.to_string();
                i += 1;
                while i < lines.len() {
                    match classify(lines[i]) {
                        LineKind::Text(cont) => {
                            text.push(' ');
                            text.push_str(cont);
                            i += 1;
                        }
                        _ => break,
                    }
                }
                blocks.push(Block::Paragraph { text });
            }
        }
    }
    blocks
}
