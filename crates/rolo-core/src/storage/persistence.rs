//! Client set persistence
//!
//! Handles saving and loading the full client set to/from the filesystem.
//! Uses atomic writes (write to temp file, then rename) to prevent
//! corruption.
//!
//! Storage location: `~/.local/share/rolo/` (configurable via `Config`)
//!
//! Files:
//! - `clients.json` - The full client set as a JSON array
//! - `theme` - The theme preference (see `crate::theme`)

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::Config;
use crate::models::Client;
use crate::storage::error::{StorageError, StorageResult};

/// Persistence layer for the client set
///
/// Provides atomic file operations for saving/loading the full set.
pub struct ClientPersistence {
    config: Config,
}

impl ClientPersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if a client set exists on disk
    pub fn exists(&self) -> bool {
        self.config.clients_path().exists()
    }

    /// Load the client set from disk
    ///
    /// Missing, unreadable, and unparseable stores all yield an empty
    /// set so the application keeps working; a corrupted file is
    /// quarantined to `clients.json.corrupt` first so its content is
    /// not lost to the next save.
    pub fn load(&self) -> Vec<Client> {
        let path = self.config.clients_path();

        if !path.exists() {
            return Vec::new();
        }

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("Failed to read client set from {:?}: {}", path, err);
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(clients) => clients,
            Err(err) => {
                self.quarantine(&path, &err.to_string());
                Vec::new()
            }
        }
    }

    /// Save the full client set to disk using atomic write
    ///
    /// This writes to a temporary file first, then renames it to the
    /// target path, so the file is never left in a partially-written
    /// state. The prior content is fully overwritten.
    pub fn save(&self, clients: &[Client]) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(clients)?;
        let target_path = self.config.clients_path();

        atomic_write(&target_path, &bytes)
    }

    /// Path a corrupted store is moved to before being replaced
    pub fn backup_path(&self) -> PathBuf {
        self.config.clients_path().with_extension("json.corrupt")
    }

    /// Move a corrupted store aside so the next save starts fresh
    fn quarantine(&self, path: &Path, details: &str) {
        let backup_path = self.backup_path();
        let err = StorageError::CorruptStore {
            path: path.to_path_buf(),
            backup_path: backup_path.clone(),
            details: details.to_string(),
        };
        warn!("{}", err);

        if let Err(rename_err) = fs::rename(path, &backup_path) {
            warn!(
                "Failed to move corrupted store to {:?}: {}",
                backup_path, rename_err
            );
        }
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: err,
        })?;
    }

    // Create temp file in the same directory (for atomic rename)
    let temp_path = path.with_extension("tmp");

    // Write to temp file
    let mut file = File::create(&temp_path)
        .map_err(|err| StorageError::from_io(err, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|err| StorageError::from_io(err, temp_path.clone()))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|err| StorageError::from_io(err, temp_path.clone()))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|err| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source: err,
    })?;

    Ok(())
}
