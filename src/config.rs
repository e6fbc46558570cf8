// Configuration - history limit, store backend and log filter

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "filecmd";
const CONFIG_FILE_NAME: &str = "config.ron";
const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Where files live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StoreBackend {
    /// In-memory map, discarded on exit
    #[default]
    Memory,
    /// Real files below `root`
    Disk { root: PathBuf },
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum undo entries kept; `None` keeps everything. Zero is rejected
    /// when the file is parsed.
    pub history_limit: Option<NonZeroUsize>,
    pub backend: StoreBackend,
    /// Default tracing filter, overridden by RUST_LOG
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: None,
            backend: StoreBackend::Memory,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// `<config dir>/filecmd/config.ron`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load a config file, choosing the format by extension
    ///
    /// `.ron` (or no extension) is read as RON, `.json` as JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, does not parse, or has
    /// an unknown extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            None | Some("ron") => Ok(ron::from_str(&text)?),
            Some("json") => Ok(serde_json::from_str(&text)?),
            Some(other) => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    /// The file a config would be read from: the explicit path, else the
    /// default path if that file exists
    pub fn source_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.is_file()),
        }
    }

    /// Load an explicit config, else the default file if present, else defaults
    ///
    /// # Errors
    /// Returns an error if an explicit path is missing or any chosen file is invalid.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::source_path(explicit) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
