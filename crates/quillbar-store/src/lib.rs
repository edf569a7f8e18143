//! Note persistence for quillbar.
//!
//! The editor session talks to storage through the [`NoteStore`] trait;
//! ids and timestamps are always store-assigned, callers never invent
//! them. [`JsonFileStore`] is the shipping implementation (one JSON file,
//! atomic-ish replace); [`MemoryStore`] backs tests.

mod json_store;
mod memory;
mod note;

use std::path::PathBuf;

use thiserror::Error;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use note::Note;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access notes file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Notes file at {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No note with id {0}")]
    NotFound(String),
}

/// Storage collaborator for notes.
///
/// All four operations are fallible remote-style calls; failures are
/// surfaced to the caller and never retried here; the session's
/// retry-on-next-edit behaviour is the only retry path.
pub trait NoteStore {
    /// All notes, most recently updated first.
    fn list(&self) -> Result<Vec<Note>, StoreError>;

    /// Creates an empty note with a fresh id and timestamp.
    fn create(&mut self, title: &str) -> Result<Note, StoreError>;

    /// Replaces a note's title and content, returning the stored record
    /// with its refreshed `updated_at`.
    fn update(&mut self, id: &str, title: &str, content: &str) -> Result<Note, StoreError>;

    /// Deletes a note by id.
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}
