//! Configuration storage
//!
//! Reads and writes the configuration document on disk.
//! Location: `~/.linguabot/config.json` on macOS and Linux,
//! `%APPDATA%\LinguaBot\config.json` on Windows.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use super::types::{AppConfig, CONFIG_VERSION};

/// Configuration storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config version {found} is newer than supported version {supported}")]
    VersionTooNew { found: u32, supported: u32 },
}

/// Get the configuration directory, creating nothing
pub fn config_dir() -> Result<PathBuf, StorageError> {
    #[cfg(windows)]
    {
        if let Some(app_data) = dirs::config_dir() {
            return Ok(app_data.join("LinguaBot"));
        }
    }

    dirs::home_dir()
        .map(|home| home.join(".linguabot"))
        .ok_or(StorageError::NoConfigDir)
}

/// Get the configuration file path
pub fn config_file() -> Result<PathBuf, StorageError> {
    Ok(config_dir()?.join("config.json"))
}

/// Loads and saves the configuration document
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Create a storage handle pointing at the default config location
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self {
            path: config_file()?,
        })
    }

    /// Create a storage handle with a custom path (for tests)
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a config file exists on disk
    pub async fn exists(&self) -> bool {
        fs::metadata(&self.path).await.is_ok()
    }

    /// Load the configuration document.
    ///
    /// A missing file yields the defaults. An unreadable document is
    /// backed up and replaced by the defaults rather than blocking
    /// startup. A document written by a newer version is an error.
    pub async fn load(&self) -> Result<AppConfig, StorageError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config file at {:?}, using defaults", self.path);
                return Ok(AppConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: AppConfig = match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Config file is unreadable ({}), backing it up and starting fresh", e);
                let backup = self.backup().await?;
                info!("Corrupt config moved to {:?}", backup);
                return Ok(AppConfig::default());
            }
        };

        if config.version > CONFIG_VERSION {
            return Err(StorageError::VersionTooNew {
                found: config.version,
                supported: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Save the configuration document atomically.
    ///
    /// Writes to a temp file in the same directory, syncs, then renames
    /// over the target so a crash never leaves a half-written config.
    pub async fn save(&self, config: &AppConfig) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(config)?;
        let temp_path = self.path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &self.path).await?;
        info!("Saved config to {:?}", self.path);
        Ok(())
    }

    /// Move the current config file aside with a timestamped suffix
    pub async fn backup(&self) -> Result<PathBuf, StorageError> {
        let timestamp = chrono::Utc::now().timestamp();
        let backup_path = self.path.with_extension(format!("json.backup.{}", timestamp));
        fs::rename(&self.path, &backup_path).await?;
        Ok(backup_path)
    }
}
