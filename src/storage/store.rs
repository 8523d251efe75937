//! Domain store
//!
//! Typed persistence for the three assistant records: text history, voice
//! history, settings. Values are JSON; reads of absent records produce
//! empty/default values; clear-all fans out over all three records and
//! aggregates failures.

use super::{
    BackendError, KeyValueBackend, APP_SETTINGS_KEY, CHAT_HISTORY_KEY, VOICE_HISTORY_KEY,
};
use crate::history::{ChatMessage, VoiceMessage};
use crate::settings::AppSettings;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
// Error Types
// ═══════════════════════════════════════════════════════════════════════════

/// Domain store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read record '{key}': {source}")]
    Read {
        key: &'static str,
        source: BackendError,
    },

    #[error("Failed to write record '{key}': {source}")]
    Write {
        key: &'static str,
        source: BackendError,
    },

    #[error("Failed to delete record '{key}': {source}")]
    Delete {
        key: &'static str,
        source: BackendError,
    },

    #[error("Record '{key}' does not decode: {source}")]
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },

    #[error("Record '{key}' does not encode: {source}")]
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },

    /// Aggregated clear-all failure. Every deletion was attempted; the
    /// listed records are the ones still standing.
    #[error("Clear-all left {} record(s) behind: {}", .failures.len(), failed_keys(.failures))]
    PartialClear { failures: Vec<StoreError> },
}

fn failed_keys(failures: &[StoreError]) -> String {
    failures
        .iter()
        .filter_map(|f| match f {
            StoreError::Delete { key, .. } => Some(*key),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ═══════════════════════════════════════════════════════════════════════════
// Store
// ═══════════════════════════════════════════════════════════════════════════

/// Typed persistence facade over an injected backend
pub struct AssistantStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl AssistantStore {
    /// Create a store over the given backend
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        info!("Assistant store using '{}' backend", backend.name());
        Self { backend }
    }

    /// Name of the underlying backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Load the text conversation history; absent record is an empty list
    pub async fn chat_history(&self) -> Result<Vec<ChatMessage>, StoreError> {
        Ok(self.read_record(CHAT_HISTORY_KEY).await?.unwrap_or_default())
    }

    /// Persist the full text conversation history
    pub async fn save_chat_history(&self, messages: &[ChatMessage]) -> Result<(), StoreError> {
        self.write_record(CHAT_HISTORY_KEY, messages).await
    }

    /// Load the voice conversation history; absent record is an empty list
    pub async fn voice_history(&self) -> Result<Vec<VoiceMessage>, StoreError> {
        Ok(self
            .read_record(VOICE_HISTORY_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Persist the full voice conversation history
    pub async fn save_voice_history(&self, messages: &[VoiceMessage]) -> Result<(), StoreError> {
        self.write_record(VOICE_HISTORY_KEY, messages).await
    }

    /// Load settings; absent record and missing fields fall back to
    /// defaults, loaded values are clamped into their accepted ranges
    pub async fn settings(&self) -> Result<AppSettings, StoreError> {
        let settings: AppSettings = self
            .read_record(APP_SETTINGS_KEY)
            .await?
            .unwrap_or_default();
        Ok(settings.sanitized())
    }

    /// Persist the settings record (last write wins)
    pub async fn save_settings(&self, settings: &AppSettings) -> Result<(), StoreError> {
        self.write_record(APP_SETTINGS_KEY, settings).await
    }

    /// Delete the text history record; absent record is fine
    pub async fn clear_chat_history(&self) -> Result<(), StoreError> {
        self.delete_record(CHAT_HISTORY_KEY).await
    }

    /// Delete the voice history record; absent record is fine
    pub async fn clear_voice_history(&self) -> Result<(), StoreError> {
        self.delete_record(VOICE_HISTORY_KEY).await
    }

    /// Delete all three records.
    ///
    /// Best-effort: the deletions run concurrently and every one is
    /// attempted even when another fails. Any failure comes back as a
    /// single aggregated [`StoreError::PartialClear`] naming the records
    /// left behind; successful deletions stay deleted.
    pub async fn clear_all(&self) -> Result<(), StoreError> {
        info!("Clearing all persisted records");

        let (chat, voice, settings) = tokio::join!(
            self.delete_record(CHAT_HISTORY_KEY),
            self.delete_record(VOICE_HISTORY_KEY),
            self.delete_record(APP_SETTINGS_KEY),
        );

        let failures: Vec<StoreError> = [chat, voice, settings]
            .into_iter()
            .filter_map(Result::err)
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(StoreError::PartialClear { failures })
        }
    }

    async fn read_record<T: DeserializeOwned>(
        &self,
        key: &'static str,
    ) -> Result<Option<T>, StoreError> {
        let raw = self
            .backend
            .get(key)
            .await
            .map_err(|source| StoreError::Read { key, source })?;

        match raw {
            Some(json) => {
                let value =
                    serde_json::from_str(&json).map_err(|source| StoreError::Decode { key, source })?;
                debug!("Record '{}' loaded ({} bytes)", key, json.len());
                Ok(Some(value))
            }
            None => {
                debug!("Record '{}' absent", key);
                Ok(None)
            }
        }
    }

    async fn write_record<T: Serialize + ?Sized>(
        &self,
        key: &'static str,
        value: &T,
    ) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
        self.backend
            .set(key, &json)
            .await
            .map_err(|source| StoreError::Write { key, source })?;
        debug!("Record '{}' saved ({} bytes)", key, json.len());
        Ok(())
    }

    async fn delete_record(&self, key: &'static str) -> Result<(), StoreError> {
        self.backend
            .delete(key)
            .await
            .map_err(|source| StoreError::Delete { key, source })?;
        debug!("Record '{}' deleted", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use async_trait::async_trait;

    /// Wraps a memory backend and fails deletes for one chosen key
    struct FlakyBackend {
        inner: MemoryBackend,
        fail_delete_key: &'static str,
    }

    #[async_trait]
    impl KeyValueBackend for FlakyBackend {
        async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
            self.inner.set(key, value).await
        }

        async fn delete(&self, key: &str) -> Result<(), BackendError> {
            if key == self.fail_delete_key {
                return Err(BackendError::Unavailable(
                    "injected delete failure".to_string(),
                ));
            }
            self.inner.delete(key).await
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    fn memory_store() -> AssistantStore {
        AssistantStore::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn test_chat_history_round_trip() {
        let store = memory_store();

        let messages = vec![
            ChatMessage::from_user("Hello"),
            ChatMessage::from_assistant("Hi there!"),
        ];
        store.save_chat_history(&messages).await.unwrap();

        let loaded = store.chat_history().await.unwrap();
        assert_eq!(loaded, messages);
    }

    #[tokio::test]
    async fn test_voice_history_round_trip() {
        let store = memory_store();

        let messages = vec![
            VoiceMessage::from_transcript("Hello there", Some("file:///rec/0.m4a".into())),
            VoiceMessage::from_assistant("Welcome!"),
        ];
        store.save_voice_history(&messages).await.unwrap();

        let loaded = store.voice_history().await.unwrap();
        assert_eq!(loaded, messages);
        assert_eq!(loaded[0].audio_uri.as_deref(), Some("file:///rec/0.m4a"));
        assert_eq!(loaded[1].audio_uri, None);
    }

    #[tokio::test]
    async fn test_absent_history_is_empty() {
        let store = memory_store();
        assert!(store.chat_history().await.unwrap().is_empty());
        assert!(store.voice_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_settings_default_before_first_write() {
        let store = memory_store();
        let settings = store.settings().await.unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let store = memory_store();

        let mut settings = AppSettings::default();
        settings.auto_speak = false;
        settings.speech_rate = 1.2;
        store.save_settings(&settings).await.unwrap();

        assert_eq!(store.settings().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_settings_clamped_on_load() {
        let backend = Arc::new(MemoryBackend::new());
        let store = AssistantStore::new(backend.clone());

        backend
            .set(
                APP_SETTINGS_KEY,
                r#"{"voiceEnabled":true,"autoSpeak":true,"speechRate":9.0,"speechPitch":1.0}"#,
            )
            .await
            .unwrap();

        let settings = store.settings().await.unwrap();
        assert_eq!(settings.speech_rate, 2.0);
    }

    #[tokio::test]
    async fn test_corrupt_record_is_a_decode_error() {
        let backend = Arc::new(MemoryBackend::new());
        let store = AssistantStore::new(backend.clone());

        backend.set(CHAT_HISTORY_KEY, "not json").await.unwrap();

        let err = store.chat_history().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { key, .. } if key == CHAT_HISTORY_KEY));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = memory_store();

        store
            .save_chat_history(&[ChatMessage::from_user("hi")])
            .await
            .unwrap();

        store.clear_chat_history().await.unwrap();
        store.clear_chat_history().await.unwrap();
        assert!(store.chat_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_all_removes_every_record() {
        let backend = Arc::new(MemoryBackend::new());
        let store = AssistantStore::new(backend.clone());

        store
            .save_chat_history(&[ChatMessage::from_user("a")])
            .await
            .unwrap();
        store
            .save_voice_history(&[VoiceMessage::from_assistant("b")])
            .await
            .unwrap();
        store.save_settings(&AppSettings::default()).await.unwrap();

        store.clear_all().await.unwrap();

        assert_eq!(backend.get(CHAT_HISTORY_KEY).await.unwrap(), None);
        assert_eq!(backend.get(VOICE_HISTORY_KEY).await.unwrap(), None);
        assert_eq!(backend.get(APP_SETTINGS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_all_reports_partial_failure() {
        let backend = Arc::new(FlakyBackend {
            inner: MemoryBackend::new(),
            fail_delete_key: VOICE_HISTORY_KEY,
        });
        let store = AssistantStore::new(backend.clone());

        store
            .save_chat_history(&[ChatMessage::from_user("a")])
            .await
            .unwrap();
        store
            .save_voice_history(&[VoiceMessage::from_assistant("b")])
            .await
            .unwrap();
        store.save_settings(&AppSettings::default()).await.unwrap();

        let err = store.clear_all().await.unwrap_err();
        match err {
            StoreError::PartialClear { failures } => {
                assert_eq!(failures.len(), 1);
                assert!(matches!(
                    &failures[0],
                    StoreError::Delete { key, .. } if *key == VOICE_HISTORY_KEY
                ));
            }
            other => panic!("expected PartialClear, got {:?}", other),
        }

        // The two healthy records were still deleted
        assert_eq!(backend.get(CHAT_HISTORY_KEY).await.unwrap(), None);
        assert_eq!(backend.get(APP_SETTINGS_KEY).await.unwrap(), None);
        assert!(backend.get(VOICE_HISTORY_KEY).await.unwrap().is_some());
    }
}
