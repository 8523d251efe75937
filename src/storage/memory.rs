//! In-memory backend
//!
//! A HashMap behind a read-write lock. Used by tests and by sessions
//! where nothing should outlive the process.

use super::{BackendError, KeyValueBackend};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Non-persistent key-value backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
