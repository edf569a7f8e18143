//! Pure text parsing: inline spans and block structure.
//!
//! Everything here is a total function over arbitrary input; malformed
//! markup degrades to plain text rather than failing.

pub mod blocks;
pub mod inline;

pub use blocks::{Block, LineKind, classify, parse_blocks};
pub use inline::{InlineSpan, plain_text, tokenize};
