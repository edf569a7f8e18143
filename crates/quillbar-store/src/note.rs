use serde::{Deserialize, Serialize};

/// A persisted note record.
///
/// `id` and `updated_at` are assigned by the store; the editor only ever
/// mutates `title` and `content` on a working copy and hands them back
/// through [`crate::NoteStore::update`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Opaque store-assigned identifier.
    pub id: String,
    pub title: String,
    /// Canonical markdown-like text body.
    pub content: String,
    /// RFC 3339 timestamp, refreshed by the store on every write.
    pub updated_at: String,
}
