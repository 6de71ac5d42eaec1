//! On-disk settings file.
//!
//! Settings live in an optional `config.toml` under the user config
//! directory (overridable with `DOCKET_CONFIG`). A missing file yields the
//! defaults; a malformed one is a hard configuration error so a typo never
//! silently falls back.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::optional_env;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Directory holding the durable case data.
    #[serde(default)]
    pub data_dir: Option<String>,
}

impl Settings {
    /// Default settings path: `<user config dir>/docket/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docket").join("config.toml"))
    }

    /// Load settings from `path`, falling back to `DOCKET_CONFIG` and then
    /// the default location. Absent files are the default settings.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match optional_env("DOCKET_CONFIG")? {
                Some(raw) => PathBuf::from(raw),
                None => match Self::default_path() {
                    Some(p) => p,
                    None => return Ok(Self::default()),
                },
            },
        };

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::SettingsUnreadable {
                    path,
                    reason: e.to_string(),
                });
            }
        };

        toml::from_str(&raw).map_err(|e| ConfigError::SettingsUnreadable {
            path,
            reason: format!("invalid settings TOML: {e}"),
        })
    }
}
