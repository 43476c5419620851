//! Configuration
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a valid
//! configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::file_storage::{FilePersister, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE};
use crate::ingest::FileIngestor;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Multipart field names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Field carrying the file contents (default: "file")
    #[serde(default = "default_file_field")]
    pub file_field: String,

    /// Field carrying the lowercase hex SHA-256 (default: "checksum")
    #[serde(default = "default_checksum_field")]
    pub checksum_field: String,
}

fn default_file_field() -> String {
    "file".to_string()
}

fn default_checksum_field() -> String {
    "checksum".to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            file_field: default_file_field(),
            checksum_field: default_checksum_field(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory uploads are written under (default: "./data")
    #[serde(default = "default_storage_root")]
    pub storage_root: PathBuf,

    /// Mode for persisted files (default: 0o600)
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,

    /// Mode for created directories (default: 0o700)
    #[serde(default = "default_dir_mode")]
    pub dir_mode: u32,

    /// Upload size limit in bytes (default: unlimited)
    #[serde(default)]
    pub max_upload_bytes: Option<u64>,

    #[serde(default)]
    pub upload: UploadConfig,
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./data")
}

fn default_file_mode() -> u32 {
    DEFAULT_FILE_MODE
}

fn default_dir_mode() -> u32 {
    DEFAULT_DIR_MODE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root(),
            file_mode: default_file_mode(),
            dir_mode: default_dir_mode(),
            max_upload_bytes: None,
            upload: UploadConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.storage_root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage_root must not be empty".into()));
        }

        if self.file_mode > 0o777 {
            return Err(ConfigError::Invalid(format!(
                "file_mode {:o} is not a permission mode",
                self.file_mode
            )));
        }

        if self.dir_mode > 0o777 {
            return Err(ConfigError::Invalid(format!(
                "dir_mode {:o} is not a permission mode",
                self.dir_mode
            )));
        }

        if self.max_upload_bytes == Some(0) {
            return Err(ConfigError::Invalid("max_upload_bytes must be > 0".into()));
        }

        if self.upload.file_field.is_empty() || self.upload.checksum_field.is_empty() {
            return Err(ConfigError::Invalid("upload field names must not be empty".into()));
        }

        if self.upload.file_field == self.upload.checksum_field {
            return Err(ConfigError::Invalid(format!(
                "file_field and checksum_field are both '{}'",
                self.upload.file_field
            )));
        }

        Ok(())
    }

    pub fn ingestor(&self) -> FileIngestor {
        FileIngestor::new(self.max_upload_bytes)
    }

    pub fn persister(&self) -> FilePersister {
        FilePersister::new(self.file_mode)
    }
}
