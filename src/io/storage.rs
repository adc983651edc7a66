use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::io::atomic_write_string;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("write of {size} bytes exceeds the storage capacity of {capacity} bytes")]
    CapacityExceeded { size: usize, capacity: usize },
    #[error("storage serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage io failed: {0}")]
    Io(#[from] io::Error),
}

/// A synchronous keyed text store. Availability is a configuration fact
/// probed once at construction; every failed access afterwards reports
/// [`StorageError::Unavailable`].
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn is_available(&self) -> bool;
}

/// One file per key under a directory, written atomically. An optional byte
/// capacity models quota-limited stores.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    capacity: Option<usize>,
    available: bool,
}

impl FileStore {
    /// Opens the store and probes writability once with a throwaway file.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::with_capacity(dir, None)
    }

    pub fn with_capacity(dir: impl Into<PathBuf>, capacity: Option<usize>) -> Self {
        let dir = dir.into();
        let available = probe(&dir);
        if !available {
            warn!(dir = %dir.display(), "storage directory is not writable; persistence disabled");
        }
        Self {
            dir,
            capacity,
            available,
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        if let Some(capacity) = self.capacity {
            if value.len() > capacity {
                return Err(StorageError::CapacityExceeded {
                    size: value.len(),
                    capacity,
                });
            }
        }
        atomic_write_string(&self.path_for(key), value)?;
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

fn probe(dir: &Path) -> bool {
    if fs::create_dir_all(dir).is_err() {
        return false;
    }
    let probe_path = dir.join("__storage_probe__");
    if fs::write(&probe_path, "probe").is_err() {
        return false;
    }
    let _ = fs::remove_file(&probe_path);
    true
}

/// In-memory backend for tests and ephemeral sessions, with the same
/// availability and capacity knobs as [`FileStore`].
#[derive(Clone, Debug)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    capacity: Option<usize>,
    available: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity: None,
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl StorageBackend for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        if let Some(capacity) = self.capacity {
            if value.len() > capacity {
                return Err(StorageError::CapacityExceeded {
                    size: value.len(),
                    capacity,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available
    }
}
