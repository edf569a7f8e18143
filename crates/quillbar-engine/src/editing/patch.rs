use crate::editing::{NodeId, Selection};

/// Result of applying a command to an [`crate::editing::EditableTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Nodes whose content or children changed; empty for a no-op.
    pub changed: Vec<NodeId>,
    /// Selection after the edit, when the command moved it.
    pub new_selection: Option<Selection>,
    /// Tree version after the edit.
    pub version: u64,
}

impl Patch {
    /// True when the command applied nothing.
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}
