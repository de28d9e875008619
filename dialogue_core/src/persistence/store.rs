//! Record stores - where save records live between sessions.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use dialogue_model::{EditorConfig, SaveRecord};

use super::StoreError;

/// Named storage for save records.
pub trait RecordStore {
    /// Write a record under `name`, replacing any previous one.
    fn store(&mut self, name: &str, record: &SaveRecord) -> Result<(), StoreError>;

    /// Read the record stored under `name`, or `None` if there is none.
    fn fetch(&self, name: &str) -> Result<Option<SaveRecord>, StoreError>;
}

/// Record names become file names, so they must be a single, non-empty path component.
fn validate_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.trim().is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name == "."
        || name == "..";
    if invalid {
        Err(StoreError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, SaveRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mutable access to a stored record, for tests that corrupt saves by hand.
    pub fn record_mut(&mut self, name: &str) -> Option<&mut SaveRecord> {
        self.records.get_mut(name)
    }
}

impl RecordStore for MemoryStore {
    fn store(&mut self, name: &str, record: &SaveRecord) -> Result<(), StoreError> {
        validate_name(name)?;
        self.records.insert(name.to_string(), record.clone());
        Ok(())
    }

    fn fetch(&self, name: &str) -> Result<Option<SaveRecord>, StoreError> {
        validate_name(name)?;
        Ok(self.records.get(name).cloned())
    }
}

/// Stores each record as `<root>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store rooted at the configured save directory.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.save_dir.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a record name maps to.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_name(name)?;
        Ok(self.root.join(format!("{}.json", name)))
    }
}

impl RecordStore for JsonFileStore {
    fn store(&mut self, name: &str, record: &SaveRecord) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        if !self.root.is_dir() {
            debug!(dir = %self.root.display(), "creating save directory");
            fs::create_dir_all(&self.root)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;
        debug!(path = %path.display(), "wrote save record");
        Ok(())
    }

    fn fetch(&self, name: &str) -> Result<Option<SaveRecord>, StoreError> {
        let path = self.path_for(name)?;
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialogue_model::{EdgeRecord, NodeId, NodeRecord, Rect};

    fn sample() -> SaveRecord {
        SaveRecord {
            nodes: vec![NodeRecord {
                position: Rect::new(100.0, 200.0, 100.0, 150.0),
                is_entry: true,
                text: "ENTRYPOINT".to_string(),
                id: NodeId::from("A"),
            }],
            edges: vec![EdgeRecord::new("A", "B", "next")],
        }
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.fetch("intro").unwrap().is_none());

        store.store("intro", &sample()).unwrap();

        assert_eq!(store.fetch("intro").unwrap(), Some(sample()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalid_names() {
        let mut store = MemoryStore::new();
        for name in ["", "  ", "a/b", "a\\b", "../escape", "..", "."] {
            assert!(matches!(
                store.store(name, &sample()),
                Err(StoreError::InvalidName(_))
            ));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_dots_inside_names_are_fine() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());

        store.store("chapter..2", &sample()).unwrap();

        assert!(dir.path().join("chapter..2.json").is_file());
        assert_eq!(store.fetch("chapter..2").unwrap(), Some(sample()));
    }

    #[test]
    fn test_json_store_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Assets").join("Resources");
        let mut store = JsonFileStore::new(&root);

        store.store("intro", &sample()).unwrap();

        assert!(root.join("intro.json").is_file());
        assert_eq!(store.fetch("intro").unwrap(), Some(sample()));
    }

    #[test]
    fn test_json_store_missing_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.fetch("nothing").unwrap().is_none());
    }

    #[test]
    fn test_json_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(matches!(store.fetch("broken"), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_json_store_from_config() {
        let config = EditorConfig::default();
        let store = JsonFileStore::from_config(&config);
        assert_eq!(store.root(), Path::new("Assets/Resources"));
        assert_eq!(
            store.path_for("intro").unwrap(),
            PathBuf::from("Assets/Resources/intro.json")
        );
    }
}
