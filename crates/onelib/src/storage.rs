//! Persistent key/value storage
//!
//! Values are stored as JSON text under string keys, the way browser local
//! storage holds them. `save` overwrites, `load` fails soft, and `clear`
//! erases every entry in the store with no scoping.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// A string-keyed store of JSON text
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: String) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;

    /// Erase every entry
    fn clear(&self) -> Result<()>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime store backed by a concurrent map
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set_item(&self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Store persisted to a single JSON object file.
///
/// The file is read once on open and rewritten after every mutation, so
/// entries survive process restarts.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!("Opened store {} with {} entries", path.display(), entries.len());
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` to a copy of the entries and commit it only once the file
    /// holds the new state
    fn mutate<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::Store("store lock poisoned".to_string()))?;
        let mut next = entries.clone();
        f(&mut next);

        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    /// Write through a sibling temp file and rename it over the store
    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: String) -> Result<()> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> Result<()> {
        self.mutate(BTreeMap::clear)
    }

    fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }
}

/// Serialize `value` to JSON and store it under `key`, replacing any entry
pub fn save<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    store.set_item(key, serde_json::to_string(value)?)
}

/// Read and parse the entry under `key`.
///
/// Missing keys and unparseable entries both yield `None`. A stored JSON
/// `null` is indistinguishable from a missing key.
pub fn load(store: &dyn KeyValueStore, key: &str) -> Option<Value> {
    load_as::<Value>(store, key).filter(|value| !value.is_null())
}

/// Typed variant of [`load`]; entries that do not fit `T` yield `None`
pub fn load_as<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let text = store.get_item(key)?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Ignoring unreadable entry {:?}: {}", key, e);
            None
        }
    }
}

/// Erase every entry in the store
pub fn clear(store: &dyn KeyValueStore) -> Result<()> {
    let removed = store.len();
    store.clear()?;
    tracing::debug!("Cleared {} stored entries", removed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
        size: u32,
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let value = json!({ "a": [1, 2, 3], "b": { "c": "d" }, "e": true });

        save(&store, "k", &value).unwrap();
        assert_eq!(load(&store, "k"), Some(value));

        save(&store, "k", "replaced").unwrap();
        assert_eq!(load(&store, "k"), Some(json!("replaced")));
    }

    #[test]
    fn test_load_fails_soft() {
        let store = MemoryStore::new();
        assert_eq!(load(&store, "never-saved"), None);

        store.set_item("broken", "{not json".to_string()).unwrap();
        assert_eq!(load(&store, "broken"), None);

        save(&store, "nothing", &Value::Null).unwrap();
        assert_eq!(load(&store, "nothing"), None);
    }

    #[test]
    fn test_load_as_typed() {
        let store = MemoryStore::new();
        let prefs = Prefs {
            theme: "dark".to_string(),
            size: 14,
        };

        save(&store, "prefs", &prefs).unwrap();
        assert_eq!(load_as::<Prefs>(&store, "prefs"), Some(prefs));

        save(&store, "wrong", &[1, 2]).unwrap();
        assert_eq!(load_as::<Prefs>(&store, "wrong"), None);
    }

    #[test]
    fn test_clear_erases_everything() {
        let store = MemoryStore::new();
        save(&store, "a", &1).unwrap();
        save(&store, "b", &2).unwrap();

        clear(&store).unwrap();

        assert!(store.is_empty());
        assert_eq!(load(&store, "a"), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        {
            let store = FileStore::open(&path).unwrap();
            save(&store, "user", &json!({ "name": "ada" })).unwrap();
            save(&store, "gone", &1).unwrap();
            store.remove_item("gone").unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(load(&reopened, "user"), Some(json!({ "name": "ada" })));

        clear(&reopened).unwrap();
        assert!(FileStore::open(&path).unwrap().is_empty());
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let path = sub.join("store.json");

        let store = FileStore::open(&path).unwrap();
        save(&store, "kept", &json!("v")).unwrap();

        std::fs::remove_dir_all(&sub).unwrap();
        std::fs::write(&sub, "not a directory").unwrap();

        assert!(save(&store, "k", &json!(1)).is_err());
        assert_eq!(load(&store, "k"), None);
        assert!(clear(&store).is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(load(&store, "kept"), Some(json!("v")));
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(FileStore::open(&path), Err(Error::Json(_))));
    }
}
