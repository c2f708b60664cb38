//! Snapshot persistence for the company directory.
//!
//! A snapshot is the whole directory serialized as a JSON array of
//! [`CompanyNode`]s. It is restored verbatim: no versioning, no validation.

use crate::directory::model::CompanyNode;
use crate::error::{ClientsError, Result};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// File name used for the snapshot when only a directory is configured.
pub const SNAPSHOT_FILE_NAME: &str = "clients_data.json";

/// Backing storage for directory snapshots.
pub trait SnapshotStore: Send + Sync {
    /// Load the saved directory, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<Vec<CompanyNode>>>;

    /// Replace the saved directory.
    fn save(&self, companies: &[CompanyNode]) -> Result<()>;
}

/// Snapshot kept in a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshot {
    path: PathBuf,
}

impl JsonFileSnapshot {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SnapshotStore for JsonFileSnapshot {
    fn load(&self) -> Result<Option<Vec<CompanyNode>>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(ClientsError::storage(
                    format!("failed to read {}", self.path.display()),
                    err,
                ))
            }
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, companies: &[CompanyNode]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    ClientsError::storage(format!("failed to create {}", parent.display()), err)
                })?;
            }
        }
        let encoded = serde_json::to_string(companies)?;
        std::fs::write(&self.path, encoded).map_err(|err| {
            ClientsError::storage(format!("failed to write {}", self.path.display()), err)
        })
    }
}

/// Snapshot held in memory as serialized JSON, scoped to the process.
#[derive(Debug, Default)]
pub struct MemorySnapshot {
    slot: Mutex<Option<String>>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw serialized content, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

impl SnapshotStore for MemorySnapshot {
    fn load(&self) -> Result<Option<Vec<CompanyNode>>> {
        match self.slot.lock().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, companies: &[CompanyNode]) -> Result<()> {
        let encoded = serde_json::to_string(companies)?;
        *self.slot.lock() = Some(encoded);
        Ok(())
    }
}
