//! # Editable tree and command-driven editing
//!
//! The edit surface in the shell host is a live rich-text view; here it is
//! modelled explicitly as a small command-driven tree editor:
//!
//! - [`EditableTree`] is a mutable node arena ([`NodeId`]-indexed) holding
//!   block containers with nested inline markup nodes, plus a
//!   [`Selection`] cursor abstraction.
//! - All user edits arrive as [`Cmd`]s (insert-text, delete-range,
//!   split-block, wrap-selection, remove-block) and are applied through
//!   [`EditableTree::apply`], which returns a [`Patch`] describing what
//!   changed.
//! - The tree is deliberately *untrusted*: reading it back into canonical
//!   text ([`crate::convert::from_editable_tree`]) infers block structure
//!   from node shape, so arbitrary command sequences (splits, merges,
//!   stray nodes) still produce well-formed text.
//!
//! Commands are total. Offsets clamp to character boundaries and stale
//! node ids degrade to no-ops; the version counter still bumps so hosts
//! can re-render unconditionally after every input event.

pub mod commands;
pub mod patch;
pub mod tree;

pub use commands::{Cmd, InlineStyle};
pub use patch::Patch;
pub use tree::{EditableTree, NodeId, NodeKind, Selection};
