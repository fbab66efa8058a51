//! Out-of-band storage for restore snapshots.
//!
//! The full JSON snapshot of a deleted item is kept outside the `deleted_records`
//! table, keyed by the record id. The id only exists after the record row has been
//! inserted, so snapshots are always written second.

use crate::errors::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Keyed store of restore snapshots
pub trait SnapshotStore {
    /// Stores `data` under `record_id`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`Error::Snapshot`] if the value could not be written.
    fn save(&self, record_id: i64, data: &str) -> Result<()>;

    /// Loads the snapshot of `record_id`, `None` if there is none.
    ///
    /// # Errors
    /// Returns [`Error::Snapshot`] if the store could not be read.
    fn load(&self, record_id: i64) -> Result<Option<String>>;

    /// Removes the snapshot of `record_id`. Removing a missing snapshot is not an error.
    ///
    /// # Errors
    /// Returns [`Error::Snapshot`] if the value exists but could not be removed.
    fn remove(&self, record_id: i64) -> Result<()>;
}

/// One JSON file per record in a directory
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Opens the store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns [`Error::Snapshot`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| Error::Snapshot {
            message: format!("Failed to create {}: {e}", dir.display()),
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the snapshot files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, record_id: i64) -> PathBuf {
        self.dir.join(format!("restore_data_{record_id}.json"))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, record_id: i64, data: &str) -> Result<()> {
        let path = self.path_for(record_id);
        debug!("Writing snapshot {}", path.display());
        std::fs::write(&path, data).map_err(|e| Error::Snapshot {
            message: format!("Failed to write {}: {e}", path.display()),
        })
    }

    fn load(&self, record_id: i64) -> Result<Option<String>> {
        let path = self.path_for(record_id);
        match std::fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Snapshot {
                message: format!("Failed to read {}: {e}", path.display()),
            }),
        }
    }

    fn remove(&self, record_id: i64) -> Result<()> {
        let path = self.path_for(record_id);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Snapshot {
                message: format!("Failed to remove {}: {e}", path.display()),
            }),
        }
    }
}

/// Process-local store, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: Mutex<HashMap<i64, String>>,
}

impl MemorySnapshotStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Whether the store holds no snapshots
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<i64, String>) -> T) -> Result<T> {
        let mut entries = self.entries.lock().map_err(|_| Error::Snapshot {
            message: "snapshot store lock poisoned".to_string(),
        })?;
        Ok(f(&mut entries))
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn save(&self, record_id: i64, data: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(record_id, data.to_string());
        })
    }

    fn load(&self, record_id: i64) -> Result<Option<String>> {
        self.with_entries(|entries| entries.get(&record_id).cloned())
    }

    fn remove(&self, record_id: i64) -> Result<()> {
        self.with_entries(|entries| {
            entries.remove(&record_id);
        })
    }
}
