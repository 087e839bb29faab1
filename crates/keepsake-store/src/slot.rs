//! Storage-slot implementation: one JSON array of records, rewritten whole
//! on every append.

use crate::error::StoreError;
use async_trait::async_trait;
use directories::ProjectDirs;
use keepsake_core::MemoryRecord;
use log::{debug, info, warn};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the storage slot inside the data directory.
const SLOT_FILE_NAME: &str = "memories.json";

#[async_trait]
/// Memory store abstraction used by the submission flow and the wall.
pub trait MemoryStore: Send + Sync {
    /// Read the whole collection. A missing or unparseable slot yields an
    /// empty collection; this never fails the caller on corrupt data.
    async fn load_all(&self) -> Result<Vec<MemoryRecord>, StoreError>;

    /// Append one record: load the current collection, push, and overwrite
    /// the slot with the serialized result.
    async fn append(&self, record: MemoryRecord) -> Result<(), StoreError>;
}

/// File-backed store keeping the entire collection in a single slot file.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    /// Path of the slot file.
    path: PathBuf,
}

impl FileSlotStore {
    /// Create a store over the given slot path, creating parent directories.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        info!("initialized slot store (path={})", path.display());
        Ok(Self { path })
    }

    /// Path of the slot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the slot, normalizing absence and corruption to empty.
    fn read_slot(&self) -> Vec<MemoryRecord> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!(
                    "slot not readable, treating as empty (path={}, err={})",
                    self.path.display(),
                    err
                );
                return Vec::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "malformed slot contents, treating as empty (path={}, err={})",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with the serialized collection.
    ///
    /// A plain truncating write: two concurrent writers can clobber each
    /// other's slot. Single-writer use is assumed and the limitation is
    /// kept rather than papered over with locking.
    fn write_slot(&self, records: &[MemoryRecord]) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(records)?;
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&self.path)?;
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }
}

#[async_trait]
impl MemoryStore for FileSlotStore {
    async fn load_all(&self) -> Result<Vec<MemoryRecord>, StoreError> {
        let records = self.read_slot();
        debug!(
            "loaded slot (path={}, count={})",
            self.path.display(),
            records.len()
        );
        Ok(records)
    }

    async fn append(&self, record: MemoryRecord) -> Result<(), StoreError> {
        let mut records = self.read_slot();
        records.push(record);
        self.write_slot(&records)?;
        info!(
            "appended memory record (path={}, count={})",
            self.path.display(),
            records.len()
        );
        Ok(())
    }
}

/// Default slot path under the platform data directory, relative fallback.
pub fn default_slot_path() -> PathBuf {
    ProjectDirs::from("", "", "keepsake")
        .map(|dirs| dirs.data_dir().join(SLOT_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(SLOT_FILE_NAME))
}
