//! Key-value store adapters.
//!
//! The tracker keeps every piece of state under a small set of string keys.
//! [`MemoryStore`] backs tests; [`FileStore`] keeps one file per key in the
//! data directory, with file locking and atomic replacement on write.

use crate::{Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Logical keys used by the tracker
pub mod keys {
    pub const USER: &str = "user";
    pub const ROUTINES: &str = "routines";
    pub const ACTIVE_ROUTINE_ID: &str = "activeRoutineId";
    pub const CURRENT_DAY_INDEX: &str = "currentRoutineDayIndex";
    pub const ACTIVE_SESSION: &str = "activeWorkoutSession";
    pub const COMPLETED_WORKOUTS: &str = "completedWorkouts";
    pub const STREAK: &str = "streak";
}

/// Synchronous string-keyed persistent map
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// In-memory store, used by tests and dry runs
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// File extension for key files
const KEY_EXTENSION: &str = "kv";

/// Directory-backed store: each key lives in `<dir>/<key>.kv`
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        tracing::debug!("Opened file store at {:?}", dir);
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Store(format!("invalid key {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.{}", key, KEY_EXTENSION)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;

        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read = reader.read_to_string(&mut contents);
        file.unlock()?;
        read?;

        tracing::debug!("Read key {} ({} bytes)", key, contents.len());
        Ok(Some(contents))
    }

    /// Atomically writes the value by:
    /// 1. Writing to a temp file in the store directory
    /// 2. Syncing to disk
    /// 3. Renaming over the key file
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let temp = NamedTempFile::new_in(&self.dir)?;

        // Exclusive lock on the temp file serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote key {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Removed key {}", key);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove every key file. Other files in the directory are left alone.
    fn clear(&mut self) -> Result<()> {
        if !self.dir.exists() {
            return Ok(());
        }

        let mut count = 0;
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == KEY_EXTENSION) {
                std::fs::remove_file(&path)?;
                count += 1;
            }
        }

        tracing::info!("Cleared {} keys from {:?}", count, self.dir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_contract() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.len(), 2);

        store.remove("a").unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.get("a").unwrap(), None);

        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(temp_dir.path().join("data")).unwrap();

        store.set(keys::STREAK, r#"{"current":1,"best":2}"#).unwrap();
        assert_eq!(
            store.get(keys::STREAK).unwrap().as_deref(),
            Some(r#"{"current":1,"best":2}"#)
        );

        // A second handle sees the same data
        let other = FileStore::open(temp_dir.path().join("data")).unwrap();
        assert!(other.get(keys::STREAK).unwrap().is_some());

        store.remove(keys::STREAK).unwrap();
        assert_eq!(store.get(keys::STREAK).unwrap(), None);
        store.remove(keys::STREAK).unwrap();
    }

    #[test]
    fn test_file_store_overwrite_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(temp_dir.path()).unwrap();

        store.set(keys::ACTIVE_ROUTINE_ID, "premade-1").unwrap();
        store.set(keys::ACTIVE_ROUTINE_ID, "premade-2").unwrap();

        let files: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name())
            .collect();
        assert_eq!(files, vec![std::ffi::OsString::from("activeRoutineId.kv")]);
        assert_eq!(
            store.get(keys::ACTIVE_ROUTINE_ID).unwrap().as_deref(),
            Some("premade-2")
        );
    }

    #[test]
    fn test_file_store_clear_keeps_foreign_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(temp_dir.path()).unwrap();
        let export = temp_dir.path().join("workout-data.json");
        std::fs::write(&export, "{}").unwrap();

        store.set(keys::USER, "{}").unwrap();
        store.set(keys::ROUTINES, "[]").unwrap();
        store.clear().unwrap();

        assert_eq!(store.get(keys::USER).unwrap(), None);
        assert_eq!(store.get(keys::ROUTINES).unwrap(), None);
        assert!(export.exists());
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(temp_dir.path()).unwrap();
        assert!(matches!(store.set("../escape", "x"), Err(Error::Store(_))));
        assert!(matches!(store.get(""), Err(Error::Store(_))));
    }
}
