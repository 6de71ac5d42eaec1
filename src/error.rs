use std::path::PathBuf;

use thiserror::Error;

/// Configuration resolution failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("failed to read settings file {path:?}: {reason}")]
    SettingsUnreadable { path: PathBuf, reason: String },
}

/// Failures raised by the key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failure for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize case collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("data directory {path:?} is locked by another docket instance")]
    Locked { path: PathBuf },

    #[error("failed to prepare data directory {path:?}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Aggregate report of required case fields missing from a draft.
///
/// All missing fields are collected before reporting so the user can fix
/// the whole submission in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}
