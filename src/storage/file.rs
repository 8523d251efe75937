//! File backend
//!
//! One JSON document per record under the data directory, written
//! atomically (temp file, sync, rename). The plain local-storage medium
//! for desktop and CI environments.

use super::{BackendError, KeyValueBackend};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Directory name under the home directory
const DATA_DIR: &str = ".linguabot";

/// Subdirectory holding record files
const RECORDS_DIR: &str = "records";

/// File-per-record key-value backend
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at the default records directory
    /// (`~/.linguabot/records`)
    pub fn new() -> Result<Self, BackendError> {
        let home = dirs::home_dir().ok_or_else(|| {
            BackendError::Unavailable("cannot determine home directory".to_string())
        })?;
        Ok(Self {
            dir: home.join(DATA_DIR).join(RECORDS_DIR),
        })
    }

    /// Create a backend rooted at a custom directory (for testing)
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Records directory
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn record_path(&self, key: &str) -> PathBuf {
        // Sanitize the key to prevent path traversal
        let safe_key: String = key
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        self.dir.join(format!("{}.json", safe_key))
    }

    async fn ensure_dir(&self) -> Result<(), BackendError> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueBackend for FileBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        match fs::read_to_string(self.record_path(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BackendError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.ensure_dir().await?;

        let path = self.record_path(key);

        // Write to temp file first, then rename (atomic write)
        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;

        fs::rename(&temp_path, &path).await?;

        debug!("Record '{}' written ({} bytes)", key, value.len());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        match fs::remove_file(self.record_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()), // Already gone
            Err(e) => Err(BackendError::Io(e)),
        }
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
