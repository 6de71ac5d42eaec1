//! Key-value storage backends and the case-collection persistence adapter.
//!
//! The durable format is a single JSON document (an array of case objects)
//! stored under one fixed key. Loads fail soft: no stored document means an
//! empty docket, and an unreadable or malformed document is logged and
//! treated the same way. Saves replace the whole document every time; there
//! is no merge, no diffing, and no schema migration.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use fs4::FileExt as _;

use crate::case::Case;
use crate::error::StorageError;

/// Fixed key under which the whole case collection is serialized.
pub const CASES_KEY: &str = "cases.json";

const LOCK_FILE: &str = ".lock";

/// Backend-agnostic key-value storage: UTF-8 values under string keys.
pub trait StorageBackend {
    /// Read the value stored under `key`; `Ok(None)` when the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any prior value entirely.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-per-key backend rooted at the configured data directory.
///
/// Opening creates the directory and takes an exclusive advisory lock on a
/// `.lock` file inside it, held for the lifetime of the backend. A second
/// instance on the same directory fails with [`StorageError::Locked`]
/// instead of interleaving writes with the first.
#[derive(Debug)]
pub struct FsBackend {
    root: PathBuf,
    _lock: File,
}

impl FsBackend {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StorageError::DataDir {
            path: root.clone(),
            source,
        })?;

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(root.join(LOCK_FILE))
            .map_err(|source| StorageError::DataDir {
                path: root.clone(),
                source,
            })?;
        if lock.try_lock_exclusive().is_err() {
            return Err(StorageError::Locked { path: root });
        }

        Ok(Self { root, _lock: lock })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Write a sibling temp file and rename it into place so an
        // interrupted write never truncates the previous document.
        let tmp = self.root.join(format!("{key}.tmp"));
        fs::write(&tmp, value).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })?;
        fs::rename(&tmp, self.key_path(key)).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }
}

/// In-memory backend for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load the case collection stored under [`CASES_KEY`].
///
/// Fail-soft by design: an absent document is an empty docket, and an
/// unreadable or malformed one is logged and treated as empty rather than
/// surfaced to the caller.
pub fn load_cases(backend: &dyn StorageBackend) -> Vec<Case> {
    let raw = match backend.read(CASES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read stored cases, starting empty: {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(cases) => cases,
        Err(e) => {
            tracing::warn!("Stored case data is malformed, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// Serialize the full collection and replace the stored document.
pub fn save_cases(backend: &dyn StorageBackend, cases: &[Case]) -> Result<(), StorageError> {
    let raw = serde_json::to_string_pretty(cases)?;
    backend.write(CASES_KEY, &raw)
}
