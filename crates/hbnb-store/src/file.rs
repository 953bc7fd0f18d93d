use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use hbnb_types::Record;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::snapshot;
use crate::traits::RecordStore;

/// Default snapshot file name, relative to the working directory.
pub const DEFAULT_SNAPSHOT: &str = "file.json";

/// Snapshot-backed record store.
///
/// The index lives in memory. `save` serializes it to a temporary file in
/// the snapshot's directory, syncs it, and renames it over the snapshot, so
/// the snapshot is always either the old or the new version in full.
pub struct FileStorage {
    path: PathBuf,
    records: BTreeMap<String, Record>,
}

impl FileStorage {
    /// Create a store bound to `path` with an empty index. Nothing is read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: BTreeMap::new(),
        }
    }

    /// Create a store bound to `path` and load the snapshot if present.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let mut store = Self::new(path);
        store.reload()?;
        Ok(store)
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move an unreadable snapshot aside to `<path>.corrupt` so the next
    /// `save` does not overwrite it. Returns the new location.
    pub fn quarantine(&self) -> StoreResult<PathBuf> {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".corrupt");
        let target = PathBuf::from(name);
        fs::rename(&self.path, &target)?;
        warn!(
            snapshot = %self.path.display(),
            moved_to = %target.display(),
            "corrupt snapshot moved aside"
        );
        Ok(target)
    }

    fn snapshot_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl RecordStore for FileStorage {
    fn all(&self) -> &BTreeMap<String, Record> {
        &self.records
    }

    fn insert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.key(), record)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        self.records.get_mut(key)
    }

    fn remove(&mut self, key: &str) -> Option<Record> {
        self.records.remove(key)
    }

    fn save(&self) -> StoreResult<()> {
        let bytes = snapshot::encode(&self.records)?;
        let dir = self.snapshot_dir();
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(
            snapshot = %self.path.display(),
            records = self.records.len(),
            bytes = bytes.len(),
            "snapshot saved"
        );
        Ok(())
    }

    fn reload(&mut self) -> StoreResult<()> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(snapshot = %self.path.display(), "no snapshot, starting empty");
                self.records.clear();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        self.records = snapshot::decode(&bytes, &self.path)?;
        info!(
            snapshot = %self.path.display(),
            records = self.records.len(),
            "snapshot loaded"
        );
        Ok(())
    }
}

impl std::fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage")
            .field("path", &self.path)
            .field("record_count", &self.records.len())
            .finish()
    }
}
