//! Editor session controller for quillbar.
//!
//! Sits between the text-model engine and the host UI: tracks which
//! note is open and in which mode, routes edit commands into the
//! editable tree, re-derives the canonical text after every mutation,
//! and persists through a [`quillbar_store::NoteStore`] behind a
//! debounce window.

mod debounce;
mod session;

pub use debounce::Debounce;
pub use session::{EditSurface, EditorSession, ListEntry, Mode, SaveState};
