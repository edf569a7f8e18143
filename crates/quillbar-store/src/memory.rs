use crate::{Note, NoteStore, StoreError};

/// In-memory store with deterministic ids and timestamps.
///
/// Mirrors [`crate::JsonFileStore`] semantics (sorted listing, not-found
/// errors) without touching the filesystem; timestamps are a zero-padded
/// counter so ordering assertions stay stable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: Vec<Note>,
    next_id: u64,
    clock: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&mut self) -> String {
        self.clock += 1;
        format!("tick-{:08}", self.clock)
    }

    /// Direct read access for assertions.
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }
}

impl NoteStore for MemoryStore {
    fn list(&self) -> Result<Vec<Note>, StoreError> {
        let mut notes = self.notes.clone();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }

    fn create(&mut self, title: &str) -> Result<Note, StoreError> {
        self.next_id += 1;
        let note = Note {
            id: format!("note_{}", self.next_id),
            title: title.to_string(),
            content: String::new(),
            updated_at: self.tick(),
        };
        self.notes.push(note.clone());
        Ok(note)
    }

    fn update(&mut self, id: &str, title: &str, content: &str) -> Result<Note, StoreError> {
        let stamp = self.tick();
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        note.title = title.to_string();
        note.content = content.to_string();
        note.updated_at = stamp;
        Ok(note.clone())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_most_recent_first() {
        let mut store = MemoryStore::new();
        let a = store.create("a").unwrap();
        let b = store.create("b").unwrap();
        store.update(&a.id, "a", "touched").unwrap();

        let ids: Vec<_> = store.list().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn behaves_like_a_store() {
        let mut store = MemoryStore::new();
        let note = store.create("t").unwrap();
        store.update(&note.id, "t", "body").unwrap();
        assert_eq!(store.get(&note.id).unwrap().content, "body");
        store.delete(&note.id).unwrap();
        assert!(matches!(
            store.delete(&note.id),
            Err(StoreError::NotFound(_))
        ));
    }
}
