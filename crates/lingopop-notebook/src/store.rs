use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use lingopop_types::DictionaryEntry;
use uuid::Uuid;

/// The saved notebook: ordered newest first, unique by `word`, rewritten to
/// disk as one JSON document on every mutation.
pub struct NotebookStore {
    path: PathBuf,
    entries: Vec<DictionaryEntry>,
}

impl NotebookStore {
    /// Read the notebook from disk. A missing or unreadable file is an empty
    /// notebook, never an error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("notebook file {} is malformed, starting empty: {e}", path.display());
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self { path, entries }
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DictionaryEntry> {
        self.entries.get(index)
    }

    /// Case-sensitive exact match on the looked-up word.
    pub fn contains(&self, word: &str) -> bool {
        self.entries.iter().any(|e| e.word == word)
    }

    pub fn words(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.word.clone()).collect()
    }

    /// Prepend an entry unless its word is already saved. Returns whether an
    /// insert happened; duplicates are a silent no-op.
    pub fn insert(&mut self, entry: DictionaryEntry) -> Result<bool> {
        if self.contains(&entry.word) {
            return Ok(false);
        }

        self.entries.insert(0, entry);
        self.save()?;
        Ok(true)
    }

    /// Patch the illustration of a saved entry. Entries are stored by value,
    /// so an image arriving after a save has to be re-persisted explicitly.
    pub fn update_image(&mut self, id: Uuid, image_url: &str) -> Result<bool> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };

        entry.image_url = Some(image_url.to_string());
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let data = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, data)
            .with_context(|| format!("writing notebook to {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str) -> DictionaryEntry {
        let mut e = DictionaryEntry::new(word.into(), "Spanish".into(), "English".into());
        e.explanation = format!("meaning of {word}");
        e
    }

    fn store_in(dir: &tempfile::TempDir) -> NotebookStore {
        NotebookStore::load(dir.path().join("notebook.json"))
    }

    #[test]
    fn inserts_are_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.insert(entry("hola")).unwrap();
        store.insert(entry("gracias")).unwrap();
        store.insert(entry("adios")).unwrap();

        let words: Vec<_> = store.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, ["adios", "gracias", "hola"]);
    }

    #[test]
    fn duplicate_word_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        assert!(store.insert(entry("hola")).unwrap());
        let first_id = store.entries()[0].id;

        assert!(!store.insert(entry("hola")).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].id, first_id);
    }

    #[test]
    fn word_match_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.insert(entry("hola")).unwrap();
        assert!(store.insert(entry("Hola")).unwrap());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn reload_preserves_words_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notebook.json");

        let mut store = NotebookStore::load(&path);
        store.insert(entry("hola")).unwrap();
        store.insert(entry("gracias")).unwrap();

        let reloaded = NotebookStore::load(&path);
        let words: Vec<_> = reloaded.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, ["gracias", "hola"]);
    }

    #[test]
    fn malformed_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notebook.json");
        fs::write(&path, "{not json").unwrap();

        let store = NotebookStore::load(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn image_update_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notebook.json");

        let mut store = NotebookStore::load(&path);
        let saved = entry("hola");
        let id = saved.id;
        store.insert(saved).unwrap();

        assert!(store.update_image(id, "data:image/png;base64,aa").unwrap());
        assert!(!store.update_image(Uuid::new_v4(), "x").unwrap());

        let reloaded = NotebookStore::load(&path);
        assert_eq!(
            reloaded.entries()[0].image_url.as_deref(),
            Some("data:image/png;base64,aa")
        );
    }
}
