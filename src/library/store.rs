//! Whole-file JSON persistence.
//!
//! Each store is one pretty-printed JSON array. Saving rewrites the entire
//! file: records go to a temporary file in the same directory which is then
//! renamed over the target, so an interrupted write leaves the previous
//! contents in place.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use super::error::StoreError;

/// A JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record; a missing file yields an empty list
    pub fn load<T: DeserializeOwned>(&self) -> Result<Vec<T>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Store missing, starting empty");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let records: Vec<T> =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), count = records.len(), "Loaded store");
        Ok(records)
    }

    /// Replace the file contents with `records`
    pub fn save<T: Serialize>(&self, records: &[T]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(records)?;

        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.write_all(b"\n").map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!(path = %self.path.display(), count = records.len(), "Saved store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let store = JsonStore::new(temp.path().join("absent.json"));
        let records: Vec<u32> = store.load().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let store = JsonStore::new(temp.path().join("nested").join("deeper").join("data.json"));

        store.save(&[1u32, 2, 3]).unwrap();
        let records: Vec<u32> = store.load().unwrap();
        assert_eq!(records, vec![1, 2, 3]);
    }

    #[test]
    fn test_non_ascii_is_written_verbatim() {
        let temp = TempDir::new().unwrap();
        let store = JsonStore::new(temp.path().join("text.json"));

        store.save(&["Програмування".to_string()]).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("Програмування"));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonStore::new(&path).load::<u32>().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn test_unwritable_location_is_a_write_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();

        let store = JsonStore::new(blocker.join("data.json"));
        let err = store.save(&[1u32]).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }
}
