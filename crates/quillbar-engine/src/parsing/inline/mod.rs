//! Inline tokenizer: one line of raw text to typed spans.
//!
//! Matching is greedy and non-nested. Code spans are raw zones with the
//! highest precedence, `**` is tried before a lone `*`, and unterminated
//! markers degrade to literal text.

mod cursor;
mod parser;
mod types;

pub use parser::tokenize;
pub use types::InlineSpan;

/// Flattens a line to plain text: style markers removed, payloads kept.
///
/// Used by the snippet renderer, where styling is not applied at all.
pub fn plain_text(line: &str) -> String {
    tokenize(line).iter().map(|s| s.text()).collect()
}
