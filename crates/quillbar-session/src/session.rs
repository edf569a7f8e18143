use std::time::{Duration, Instant};

use quillbar_engine::{Cmd, EditableTree, Patch, from_editable_tree, snippet, to_editable_tree};
use quillbar_store::{Note, NoteStore, StoreError};

use crate::debounce::Debounce;

/// Top-level UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Note list with snippets.
    List,
    /// Read-only preview of one note.
    View,
    /// One note open for editing.
    Edit,
}

/// Which editing surface is active while in [`Mode::Edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSurface {
    /// Tree-backed rich editor.
    Rich,
    /// Raw text fallback.
    Raw,
}

/// Save indicator state, surfaced to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Dirty,
    Saving,
    Saved,
    Error(String),
}

/// One row of the note list read model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub updated_at: String,
}

/// Working copy of the note currently open in view or edit mode.
#[derive(Debug)]
struct OpenNote {
    id: String,
    title: String,
    content: String,
    /// Present only while the rich surface is active.
    tree: Option<EditableTree>,
}

/// Orchestrates modes, edit surfaces and debounced persistence.
///
/// The session owns a working copy of the open note; every mutation
/// updates that copy immediately and arms the debounce, so the local
/// text is always the source of truth for the next save. Storage
/// failures park the indicator in [`SaveState::Error`] without
/// reverting anything; the next mutation re-enters `Dirty` and the
/// following debounce cycle is the retry.
pub struct EditorSession<S: NoteStore> {
    store: S,
    notes: Vec<Note>,
    mode: Mode,
    surface: EditSurface,
    open: Option<OpenNote>,
    save_state: SaveState,
    debounce: Debounce,
}

impl<S: NoteStore> EditorSession<S> {
    pub fn new(store: S) -> Self {
        Self::with_window(store, Debounce::DEFAULT_WINDOW)
    }

    pub fn with_window(store: S, window: Duration) -> Self {
        Self {
            store,
            notes: Vec::new(),
            mode: Mode::List,
            surface: EditSurface::Rich,
            open: None,
            save_state: SaveState::Idle,
            debounce: Debounce::new(window),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn surface(&self) -> EditSurface {
        self.surface
    }

    pub fn save_state(&self) -> &SaveState {
        &self.save_state
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn open_id(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.id.as_str())
    }

    pub fn open_title(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.title.as_str())
    }

    /// Current text of the open note, as it would be persisted.
    pub fn open_content(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.content.as_str())
    }

    /// The editable tree, while the rich surface is active.
    pub fn tree(&self) -> Option<&EditableTree> {
        self.open.as_ref().and_then(|o| o.tree.as_ref())
    }

    /// Reloads the note list from the store.
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        self.notes = self.store.list()?;
        Ok(())
    }

    /// Note list rows: title plus first-line snippet.
    pub fn list_entries(&self) -> Vec<ListEntry> {
        self.notes
            .iter()
            .map(|n| ListEntry {
                id: n.id.clone(),
                title: n.title.clone(),
                snippet: snippet(&n.content),
                updated_at: n.updated_at.clone(),
            })
            .collect()
    }

    /// Opens a note read-only.
    pub fn view(&mut self, id: &str) -> Result<(), StoreError> {
        self.flush_pending()?;
        let Some(note) = self.notes.iter().find(|n| n.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        self.open = Some(OpenNote {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            tree: None,
        });
        self.mode = Mode::View;
        self.save_state = SaveState::Idle;
        Ok(())
    }

    /// Opens a note for editing on the rich surface.
    pub fn edit(&mut self, id: &str) -> Result<(), StoreError> {
        self.flush_pending()?;
        let Some(note) = self.notes.iter().find(|n| n.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        self.open = Some(OpenNote {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            tree: Some(to_editable_tree(&note.content)),
        });
        self.mode = Mode::Edit;
        self.surface = EditSurface::Rich;
        self.save_state = SaveState::Idle;
        log::debug!("editing note {id}");
        Ok(())
    }

    /// Returns to the list, flushing any unsaved edits first.
    pub fn close(&mut self) -> Result<(), StoreError> {
        self.flush_pending()?;
        self.open = None;
        self.mode = Mode::List;
        self.save_state = SaveState::Idle;
        Ok(())
    }

    /// Applies one rich-edit command and re-derives the note text.
    ///
    /// Returns `None` when no rich surface is active (wrong mode or raw
    /// surface); the command is dropped rather than buffered.
    pub fn apply_edit(&mut self, cmd: Cmd, now: Instant) -> Option<Patch> {
        if self.mode != Mode::Edit || self.surface != EditSurface::Rich {
            return None;
        }
        let open = self.open.as_mut()?;
        let tree = open.tree.as_mut()?;
        let patch = tree.apply(cmd);
        open.content = from_editable_tree(tree);
        self.mark_dirty(now);
        Some(patch)
    }

    /// Replaces the note text wholesale, from the raw surface.
    pub fn set_raw_content(&mut self, text: &str, now: Instant) {
        if self.mode != Mode::Edit || self.surface != EditSurface::Raw {
            return;
        }
        let Some(open) = self.open.as_mut() else {
            return;
        };
        open.content = text.to_string();
        self.mark_dirty(now);
    }

    pub fn set_title(&mut self, title: &str, now: Instant) {
        if self.mode != Mode::Edit {
            return;
        }
        let Some(open) = self.open.as_mut() else {
            return;
        };
        open.title = title.to_string();
        self.mark_dirty(now);
    }

    /// Switches between the rich and raw surfaces.
    ///
    /// Rich → raw re-derives the text from the tree before the raw
    /// surface reads it; raw → rich rebuilds the tree from the text.
    /// Either direction would lose edits without that handoff.
    pub fn toggle_surface(&mut self) {
        if self.mode != Mode::Edit {
            return;
        }
        let Some(open) = self.open.as_mut() else {
            return;
        };
        match self.surface {
            EditSurface::Rich => {
                if let Some(tree) = &open.tree {
                    open.content = from_editable_tree(tree);
                }
                open.tree = None;
                self.surface = EditSurface::Raw;
            }
            EditSurface::Raw => {
                open.tree = Some(to_editable_tree(&open.content));
                self.surface = EditSurface::Rich;
            }
        }
    }

    /// Creates an empty note and opens it for editing.
    pub fn create(&mut self, title: &str) -> Result<Note, StoreError> {
        self.flush_pending()?;
        let note = self.store.create(title)?;
        self.refresh()?;
        self.edit(&note.id)?;
        Ok(note)
    }

    /// Deletes a note; deleting the open note drops back to the list.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.store.delete(id)?;
        self.notes.retain(|n| n.id != id);
        if self.open_id() == Some(id) {
            self.open = None;
            self.mode = Mode::List;
            self.save_state = SaveState::Idle;
            self.debounce.cancel();
        }
        Ok(())
    }

    /// Drives the debounce clock; call on every host tick.
    ///
    /// When the window has elapsed with no further mutation, the pending
    /// save fires. A failed save parks the indicator in `Error` and
    /// keeps the local copy; the next mutation re-arms the debounce.
    pub fn tick(&mut self, now: Instant) {
        if !self.debounce.ready(now) {
            return;
        }
        self.save_now();
    }

    fn mark_dirty(&mut self, now: Instant) {
        self.save_state = SaveState::Dirty;
        self.debounce.poke(now);
    }

    /// Synchronous save of any pending edits, used before navigation.
    fn flush_pending(&mut self) -> Result<(), StoreError> {
        if self.debounce.pending() {
            self.debounce.cancel();
            self.save_now();
        }
        if let SaveState::Error(message) = &self.save_state {
            log::warn!("discarding unsaved edits after save failure: {message}");
        }
        Ok(())
    }

    fn save_now(&mut self) {
        let Some(open) = &self.open else {
            return;
        };
        self.save_state = SaveState::Saving;
        match self.store.update(&open.id, &open.title, &open.content) {
            Ok(saved) => {
                if let Some(slot) = self.notes.iter_mut().find(|n| n.id == saved.id) {
                    *slot = saved;
                } else {
                    self.notes.push(saved);
                }
                self.save_state = SaveState::Saved;
            }
            Err(err) => {
                log::warn!("save failed for note {}: {err}", open.id);
                self.save_state = SaveState::Error(err.to_string());
            }
        }
    }
}
