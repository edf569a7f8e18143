use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{Note, NoteStore, StoreError};

/// File-backed note store: the whole collection lives in one JSON file.
///
/// Writes go through a temp file followed by a rename, so a crash mid-save
/// leaves the previous file intact. A missing or blank file reads as an
/// empty collection rather than an error.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Note>, StoreError> {
        if !self.path.exists() {
            return Ok(vec![]);
        }
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(vec![]);
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let body = serde_json::to_string_pretty(notes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;

        // Best-effort atomic replace; the remove covers platforms where
        // rename does not overwrite.
        let _ = fs::remove_file(&self.path);
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Millisecond-timestamp id with a collision suffix for same-millisecond
/// creates.
fn generate_note_id(existing: &[Note]) -> String {
    let base = Utc::now().timestamp_millis();
    let mut suffix: u32 = 0;
    loop {
        let id = if suffix == 0 {
            format!("note_{base}")
        } else {
            format!("note_{base}_{suffix}")
        };
        if !existing.iter().any(|n| n.id == id) {
            return id;
        }
        suffix = suffix.saturating_add(1);
    }
}

impl NoteStore for JsonFileStore {
    fn list(&self) -> Result<Vec<Note>, StoreError> {
        let mut notes = self.load()?;
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }

    fn create(&mut self, title: &str) -> Result<Note, StoreError> {
        let mut notes = self.load()?;
        let note = Note {
            id: generate_note_id(&notes),
            title: title.to_string(),
            content: String::new(),
            updated_at: now_rfc3339(),
        };
        notes.push(note.clone());
        self.save(&notes)?;
        log::debug!("created note {}", note.id);
        Ok(note)
    }

    fn update(&mut self, id: &str, title: &str, content: &str) -> Result<Note, StoreError> {
        let mut notes = self.load()?;
        let Some(note) = notes.iter_mut().find(|n| n.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        note.title = title.to_string();
        note.content = content.to_string();
        note.updated_at = now_rfc3339();
        let updated = note.clone();
        self.save(&notes)?;
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let mut notes = self.load()?;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.save(&notes)?;
        log::debug!("deleted note {id}");
        Ok(())
    }
}
