//! Notes storage.
//!
//! All callers share one ordered JSON array of free-text notes. A mutex
//! serializes the read-modify-write within this process; writers in other
//! processes are not coordinated and may lose updates. That limitation is
//! accepted, not fixed.

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

use crate::atomic::atomic_write_json;
use crate::error::Result;

/// Append-only store for free-text notes.
pub struct NotesStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl NotesStore {
    /// Creates a store backed by the JSON document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Appends a note, preserving insertion order.
    pub fn append(&self, text: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut notes = self.load();
        notes.push(text.to_string());
        atomic_write_json(&self.path, &notes)
    }

    /// Returns every note in insertion order.
    ///
    /// A missing or unreadable document yields the empty list rather than an
    /// error; callers never fail because the notes file is gone.
    pub fn list_all(&self) -> Vec<String> {
        self.load()
    }

    fn load(&self) -> Vec<String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(notes) => notes,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "notes file is corrupt, treating as empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_append_preserves_order() {
        let dir = tempdir().unwrap();
        let store = NotesStore::new(dir.path().join("notes.json"));

        store.append("buy milk").unwrap();
        store.append("call home").unwrap();
        store.append("buy milk").unwrap();

        assert_eq!(store.list_all(), vec!["buy milk", "call home", "buy milk"]);
    }

    #[test]
    fn test_list_all_empty_when_missing() {
        let dir = tempdir().unwrap();
        let store = NotesStore::new(dir.path().join("missing.json"));

        assert!(store.list_all().is_empty());
    }

    #[test]
    fn test_list_all_empty_when_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = NotesStore::new(&path);

        assert!(store.list_all().is_empty());
    }

    #[test]
    fn test_append_recovers_from_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, "42").unwrap();

        let store = NotesStore::new(&path);
        store.append("fresh start").unwrap();

        assert_eq!(store.list_all(), vec!["fresh start"]);
    }
}
