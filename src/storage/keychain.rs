//! Keychain backend
//!
//! Stores records in the operating system keychain via the `keyring`
//! crate. The secure on-device medium, for builds where history must not
//! sit in a plain file.

use super::{BackendError, KeyValueBackend};
use async_trait::async_trait;
use keyring::Entry;

/// Service name for keychain entries
const SERVICE_NAME: &str = "com.linguabot.assistant";

/// System-keychain key-value backend
pub struct KeychainBackend {
    service: String,
}

impl KeychainBackend {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Create with custom service name (for testing)
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Keychain account for a record key.
    /// Username-prefixed for a stable keychain identity on macOS.
    fn account(key: &str) -> String {
        format!("{}@{}", whoami::username(), key)
    }

    fn entry(&self, key: &str) -> Result<Entry, BackendError> {
        Ok(Entry::new(&self.service, &Self::account(key))?)
    }
}

impl Default for KeychainBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueBackend for KeychainBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(BackendError::Keyring(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.entry(key)?.set_password(value)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(BackendError::Keyring(e)),
        }
    }

    fn name(&self) -> &'static str {
        "keychain"
    }
}
