//! Load/save of the JSON config file
//!
//! Loading never fails from the caller's point of view: `load` falls back to
//! defaults and logs why. `try_load` exposes the reason for callers that care.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::AppConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("config file {0} does not exist")]
    NotFound(PathBuf),
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("config file {0} holds no settings")]
    Empty(PathBuf),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to create config directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize config")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write config file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Config file at a fixed location
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// `<local data dir>/BarcodeGenerator/config.json`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    pub fn new() -> Self {
        Self::at(Self::default_path())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<AppConfig, LoadError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound(self.path.clone())
            } else {
                LoadError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let parsed: Option<AppConfig> =
            serde_json::from_str(&contents).map_err(|source| LoadError::Parse {
                path: self.path.clone(),
                source,
            })?;

        parsed.ok_or_else(|| LoadError::Empty(self.path.clone()))
    }

    /// Load the config, or defaults when the file is missing or unreadable
    pub fn load(&self) -> AppConfig {
        match self.try_load() {
            Ok(config) => {
                info!(
                    path = %self.path.display(),
                    rules = config.saved_rules.len(),
                    "Loaded config"
                );
                config
            }
            Err(LoadError::NotFound(path)) => {
                info!(path = %path.display(), "Config file not found, using defaults");
                AppConfig::default()
            }
            Err(err) => {
                warn!(error = ?err, "Ignoring unusable config file, using defaults");
                AppConfig::default()
            }
        }
    }

    /// Write the config, creating the parent directory if needed
    pub fn save(&self, config: &AppConfig) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SaveError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(config)?;

        fs::write(&self.path, json).map_err(|source| SaveError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), "Saved config");
        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
