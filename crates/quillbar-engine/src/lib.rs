//! quillbar-engine: the note text model.
//!
//! A persisted markdown-like string is the single source of truth for a
//! note. This crate keeps that string synchronized with three read
//! models: an editable tree the user mutates directly, a read-only
//! preview, and a one-line list snippet. Parsing is total: arbitrary
//! input degrades to plain paragraphs, never errors.

pub mod convert;
pub mod editing;
pub mod parsing;
pub mod preview;

// Re-export key types for easier usage
pub use convert::{from_editable_tree, to_editable_tree};
pub use editing::{Cmd, EditableTree, InlineStyle, NodeId, NodeKind, Patch, Selection};
pub use parsing::{Block, InlineSpan, parse_blocks, tokenize};
pub use preview::{PreviewBlock, render_preview, snippet};
