//! Durable key-value storage for the task and feedback collections.
//!
//! Each collection is written as one JSON array under its own key and is
//! overwritten wholesale on every save. The adapter never looks inside the
//! records it moves around, and loading never fails: a missing or corrupt
//! blob comes back as an empty collection so a damaged file cannot keep the
//! planner from starting. A blob that fails to parse is first copied to
//! [`corrupt_key`] so the next save cannot destroy it.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Key under which the task collection is stored.
pub const TASKS_KEY: &str = "preMedTasks";
/// Key under which the feedback collection is stored.
pub const FEEDBACKS_KEY: &str = "preMedFeedbacks";

/// Key holding the last blob under `key` that failed to parse.
pub fn corrupt_key(key: &str) -> String {
    format!("{key}.corrupt")
}

/// Errors that make storage unavailable for a write or a read.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed")]
    Io(#[from] std::io::Error),
    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, {limit} allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
    #[error("Failed to serialize records")]
    Serialize(#[from] serde_json::Error),
}

/// Raw text storage addressed by key.
///
/// Implementations keep no state between calls that would change what a
/// later `read` returns other than the `write`s made through them.
#[cfg_attr(test, mockall::automock)]
pub trait Storage {
    /// Reads the blob stored under `key`, or `None` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces whatever is stored under `key` with `contents`.
    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError>;
}

/// Stores every key as `<directory>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }

    fn staging_path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json.tmp"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.directory)?;
        // Replace by rename so an interrupted write never leaves a truncated blob.
        let staging = self.staging_path_for(key);
        fs::write(&staging, contents)?;
        fs::rename(&staging, self.path_for(key))?;
        Ok(())
    }
}

/// In-process storage with an optional per-blob size limit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects any write whose contents are longer than `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            blobs: RefCell::default(),
            quota: Some(bytes),
        }
    }

    /// Stores `contents` directly, bypassing the quota.
    pub fn insert(&self, key: &str, contents: &str) {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            if contents.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed: contents.len(),
                    limit,
                });
            }
        }
        self.insert(key, contents);
        Ok(())
    }
}

/// Moves whole record collections in and out of a [`Storage`] backend as JSON.
#[derive(Debug)]
pub struct StorageAdapter<S> {
    backend: S,
}

impl<S: Storage> StorageAdapter<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Loads the collection stored under `key`.
    ///
    /// Absent, unreadable and malformed blobs all yield an empty collection.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "nothing stored yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(key, error = %e, "storage unreadable, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => {
                debug!(key, count = records.len(), "loaded records");
                records
            }
            Err(e) => {
                warn!(key, error = %e, "stored records are malformed, starting empty");
                self.preserve(key, &raw);
                Vec::new()
            }
        }
    }

    fn preserve(&self, key: &str, raw: &str) {
        let backup = corrupt_key(key);
        match self.backend.write(&backup, raw) {
            Ok(()) => warn!(key, backup = %backup, "kept a copy of the malformed records"),
            Err(e) => {
                error!(key, backup = %backup, error = %e, "failed to copy the malformed records")
            }
        }
    }

    /// Overwrites the collection stored under `key` with `records`.
    pub fn save<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)?;
        self.backend.write(key, &raw)?;
        debug!(key, count = records.len(), "saved records");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
    struct Record {
        id: u64,
        label: String,
    }

    fn records() -> Vec<Record> {
        vec![
            Record {
                id: 2,
                label: "second".to_string(),
            },
            Record {
                id: 1,
                label: "first".to_string(),
            },
        ]
    }

    #[test]
    fn test_load_after_save_returns_same_records() {
        let adapter = StorageAdapter::new(MemoryStorage::new());

        adapter.save("records", &records()).unwrap();
        let loaded: Vec<Record> = adapter.load("records");

        assert_eq!(loaded, records());
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let adapter = StorageAdapter::new(MemoryStorage::new());

        let loaded: Vec<Record> = adapter.load("records");

        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_malformed_blob_is_empty() {
        let storage = MemoryStorage::new();
        storage.insert("records", "{not json");
        let adapter = StorageAdapter::new(storage);

        let loaded: Vec<Record> = adapter.load("records");

        assert!(loaded.is_empty());
    }

    #[test]
    fn test_malformed_blob_survives_next_save() {
        // Arrange
        let storage = MemoryStorage::new();
        storage.insert("records", r#"[{"id": 7, "label": 3}]"#);
        let adapter = StorageAdapter::new(storage);

        // Act
        let loaded: Vec<Record> = adapter.load("records");
        adapter.save("records", &records()).unwrap();

        // Assert
        assert!(loaded.is_empty());
        assert_eq!(
            adapter.backend().get(&corrupt_key("records")).as_deref(),
            Some(r#"[{"id": 7, "label": 3}]"#)
        );
        assert_eq!(adapter.load::<Record>("records"), records());
    }

    #[test]
    fn test_failed_backup_still_loads_empty() {
        // Arrange
        let mut storage = MockStorage::new();
        storage
            .expect_read()
            .returning(|_| Ok(Some("{not json".to_string())));
        storage
            .expect_write()
            .withf(|key: &str, contents: &str| {
                key == "records.corrupt" && contents == "{not json"
            })
            .times(1)
            .returning(|_, _| Err(StorageError::Io(std::io::Error::other("read-only"))));
        let adapter = StorageAdapter::new(storage);

        // Act
        let loaded: Vec<Record> = adapter.load("records");

        // Assert
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_non_array_blob_is_empty() {
        let storage = MemoryStorage::new();
        storage.insert("records", r#"{"id": 1, "label": "lonely"}"#);
        let adapter = StorageAdapter::new(storage);

        let loaded: Vec<Record> = adapter.load("records");

        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_read_failure_is_empty() {
        // Arrange
        let mut storage = MockStorage::new();
        storage.expect_read().returning(|_| {
            Err(StorageError::Io(std::io::Error::new(
                ErrorKind::PermissionDenied,
                "denied",
            )))
        });
        let adapter = StorageAdapter::new(storage);

        // Act
        let loaded: Vec<Record> = adapter.load("records");

        // Assert
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_blob() {
        let adapter = StorageAdapter::new(MemoryStorage::new());
        adapter.save("records", &records()).unwrap();

        adapter.save("records", &records()[..1]).unwrap();
        let loaded: Vec<Record> = adapter.load("records");

        assert_eq!(loaded, records()[..1].to_vec());
    }

    #[test]
    fn test_save_writes_json_array_under_key() {
        // Arrange
        let mut storage = MockStorage::new();
        storage
            .expect_write()
            .withf(|key: &str, contents: &str| {
                key == "records"
                    && contents == r#"[{"id":2,"label":"second"},{"id":1,"label":"first"}]"#
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let adapter = StorageAdapter::new(storage);

        // Act
        let result = adapter.save("records", &records());

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    fn test_memory_quota_rejects_large_blob() {
        let adapter = StorageAdapter::new(MemoryStorage::with_quota(10));

        let result = adapter.save("records", &records());

        assert!(matches!(
            result,
            Err(StorageError::QuotaExceeded { limit: 10, .. })
        ));
        assert_eq!(adapter.backend().get("records"), None);
    }

    #[test]
    fn test_file_storage_missing_file_reads_none() {
        let dir = assert_fs::TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(storage.read(TASKS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_storage_creates_directory_on_write() {
        // Arrange
        let dir = assert_fs::TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("data"));

        // Act
        storage.write(FEEDBACKS_KEY, "[]").unwrap();

        // Assert
        assert!(storage.directory().join("preMedFeedbacks.json").exists());
        assert_eq!(storage.read(FEEDBACKS_KEY).unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_file_storage_replaces_blob_without_leftovers() {
        // Arrange
        let dir = assert_fs::TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.write(TASKS_KEY, r#"[{"id":1}]"#).unwrap();

        // Act
        storage.write(TASKS_KEY, "[]").unwrap();

        // Assert
        assert_eq!(storage.read(TASKS_KEY).unwrap(), Some("[]".to_string()));
        assert!(!dir.path().join("preMedTasks.json.tmp").exists());
    }
}
