//! Block parser: a full note body to typed blocks.
//!
//! Phase 1 ([`classify`]) records per-line facts; phase 2
//! ([`parse_blocks`]) groups lines into headings, bullet runs, paragraphs
//! and blank spacers.

mod classify;
mod parser;
mod types;

pub use classify::{LineKind, classify};
pub use parser::parse_blocks;
pub use types::Block;
