//! Resolved runtime configuration.
//!
//! Resolution order for every value: environment variable, then the
//! settings file, then a built-in default.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct DocketConfig {
    /// Directory the storage backend roots its keys under.
    pub data_dir: PathBuf,
}

/// Read an environment variable, treating absent and blank as unset.
pub(crate) fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "value is not valid UTF-8".to_string(),
        }),
    }
}

fn validate_data_dir(raw: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "DOCKET_DATA_DIR".to_string(),
            message: "data directory must not be empty".to_string(),
        });
    }
    Ok(PathBuf::from(trimmed))
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join("docket"))
        .ok_or_else(|| ConfigError::InvalidValue {
            key: "DOCKET_DATA_DIR".to_string(),
            message: "no user data directory available; set DOCKET_DATA_DIR".to_string(),
        })
}

impl DocketConfig {
    pub fn resolve(settings: &Settings) -> Result<Self, ConfigError> {
        let from_settings = settings
            .data_dir
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let data_dir = match optional_env("DOCKET_DATA_DIR")?.or(from_settings) {
            Some(raw) => validate_data_dir(&raw)?,
            None => default_data_dir()?,
        };

        Ok(Self { data_dir })
    }
}
