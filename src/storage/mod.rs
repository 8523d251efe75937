//! Key-value persistence
//!
//! Three small JSON records behind a swappable backend. The backend is
//! chosen once at startup from configuration and injected; everything
//! above it talks to the same minimal get/set/delete capability.

pub mod file;
pub mod keychain;
pub mod memory;
pub mod store;

pub use file::FileBackend;
pub use keychain::KeychainBackend;
pub use memory::MemoryBackend;
pub use store::{AssistantStore, StoreError};

use async_trait::async_trait;

/// Record key for the text conversation history
pub const CHAT_HISTORY_KEY: &str = "chat_history";

/// Record key for the voice conversation history
pub const VOICE_HISTORY_KEY: &str = "voice_history";

/// Record key for the settings record
pub const APP_SETTINGS_KEY: &str = "app_settings";

/// Backend-level storage errors
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Keychain error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Minimal key-value capability a storage medium must provide
///
/// `delete` is idempotent: deleting an absent key is not an error.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Read the value for a key; `None` when the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Write the value for a key, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Remove a key; absent keys are silently fine
    async fn delete(&self, key: &str) -> Result<(), BackendError>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}
