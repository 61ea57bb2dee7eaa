//! Key-value persistence behind a trait.
//!
//! Stores hand the trait JSON strings under fixed keys; the default
//! implementation writes one file per key in the platform data directory.
//! Tests point it at a temp directory instead.

use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-backed storage: each key becomes `<dir>/<key>.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn setup_storage() -> (FileStorage, PathBuf) {
        let dir = std::env::temp_dir().join(format!("test_storage_{}", Uuid::new_v4()));
        let storage = FileStorage::new(dir.clone()).unwrap();
        (storage, dir)
    }

    fn cleanup(dir: &std::path::Path) {
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn set_then_get_roundtrips() {
        let (storage, dir) = setup_storage();
        storage.set("history", r#"[{"id":"a"}]"#).unwrap();
        assert_eq!(
            storage.get("history").unwrap().as_deref(),
            Some(r#"[{"id":"a"}]"#)
        );
        cleanup(&dir);
    }

    #[test]
    fn missing_key_is_none() {
        let (storage, dir) = setup_storage();
        assert!(storage.get("nothing").unwrap().is_none());
        cleanup(&dir);
    }

    #[test]
    fn remove_clears_the_key() {
        let (storage, dir) = setup_storage();
        storage.set("session", "{}").unwrap();
        storage.remove("session").unwrap();
        assert!(storage.get("session").unwrap().is_none());
        // Removing again is fine.
        storage.remove("session").unwrap();
        cleanup(&dir);
    }
}
