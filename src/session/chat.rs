//! Text conversation session

use crate::assistant::{ResponseProvider, FALLBACK_REPLY};
use crate::history::ChatMessage;
use crate::storage::{AssistantStore, StoreError};
use std::sync::Arc;
use tracing::{debug, warn};

/// One completed exchange plus its persistence outcome
///
/// The in-memory conversation is never rolled back on a persistence
/// failure; `persisted` carries the failure so the caller can surface it
/// or ignore it.
#[derive(Debug)]
pub struct ChatTurn {
    /// The appended user message
    pub user: ChatMessage,
    /// The appended assistant reply
    pub assistant: ChatMessage,
    /// Outcome of persisting this turn
    pub persisted: Result<(), StoreError>,
}

/// A text conversation: ordered messages, a response provider, a store
pub struct ChatSession {
    store: Arc<AssistantStore>,
    provider: Arc<dyn ResponseProvider>,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Create an empty session
    pub fn new(store: Arc<AssistantStore>, provider: Arc<dyn ResponseProvider>) -> Self {
        Self {
            store,
            provider,
            messages: Vec::new(),
        }
    }

    /// Create a session hydrated from the persisted history.
    /// A failed read logs a warning and starts the session empty.
    pub async fn load(store: Arc<AssistantStore>, provider: Arc<dyn ResponseProvider>) -> Self {
        let messages = match store.chat_history().await {
            Ok(messages) => messages,
            Err(e) => {
                warn!("Starting with empty chat history: {}", e);
                Vec::new()
            }
        };
        debug!("Chat session loaded with {} message(s)", messages.len());
        Self {
            store,
            provider,
            messages,
        }
    }

    /// Messages in display order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Handle one user input: append the user turn, obtain a reply, append
    /// the assistant turn, persisting after each append.
    ///
    /// Blank input is a no-op. A provider failure becomes the fixed
    /// fallback reply, appended like any other assistant turn.
    pub async fn send(&mut self, input: &str) -> Option<ChatTurn> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let user = ChatMessage::from_user(trimmed);
        self.messages.push(user.clone());
        let user_saved = self.store.save_chat_history(&self.messages).await;

        let reply_text = match self.provider.generate(trimmed).await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Provider '{}' failed, using fallback reply: {}",
                    self.provider.name(),
                    e
                );
                FALLBACK_REPLY.to_string()
            }
        };

        let assistant = ChatMessage::from_assistant(&reply_text);
        self.messages.push(assistant.clone());
        let assistant_saved = self.store.save_chat_history(&self.messages).await;

        let persisted = user_saved.and(assistant_saved);
        if let Err(ref e) = persisted {
            warn!("Chat history not persisted: {}", e);
        }

        Some(ChatTurn {
            user,
            assistant,
            persisted,
        })
    }

    /// Drop the in-memory conversation and delete the persisted record.
    /// Memory is cleared even when the delete fails.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.messages.clear();
        self.store.clear_chat_history().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{classifier, replies, ProviderError, SimulatedProvider};
    use crate::storage::{BackendError, KeyValueBackend, MemoryBackend};
    use async_trait::async_trait;

    /// Provider that always fails
    struct DownProvider;

    #[async_trait]
    impl ResponseProvider for DownProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            Err(ProviderError::Network("connection refused".to_string()))
        }

        fn name(&self) -> &'static str {
            "down"
        }
    }

    /// Backend whose writes always fail
    struct ReadOnlyBackend;

    #[async_trait]
    impl KeyValueBackend for ReadOnlyBackend {
        async fn get(&self, _key: &str) -> Result<Option<String>, BackendError> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), BackendError> {
            Err(BackendError::Unavailable("read-only".to_string()))
        }

        async fn delete(&self, _key: &str) -> Result<(), BackendError> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "read-only"
        }
    }

    fn session_over_memory() -> (Arc<AssistantStore>, ChatSession) {
        let store = Arc::new(AssistantStore::new(Arc::new(MemoryBackend::new())));
        let provider = Arc::new(SimulatedProvider::with_seed(11).without_delay());
        (store.clone(), ChatSession::new(store, provider))
    }

    #[tokio::test]
    async fn test_send_appends_and_persists_both_turns() {
        let (store, mut session) = session_over_memory();

        let turn = session.send("hello!").await.unwrap();
        assert!(turn.persisted.is_ok());
        assert!(turn.user.is_user);
        assert!(!turn.assistant.is_user);
        assert!(replies::candidates(classifier::ResponseCategory::Greeting)
            .contains(&turn.assistant.text.as_str()));

        assert_eq!(session.messages().len(), 2);
        assert_eq!(store.chat_history().await.unwrap(), session.messages());
    }

    #[tokio::test]
    async fn test_blank_input_is_a_noop() {
        let (store, mut session) = session_over_memory();

        assert!(session.send("").await.is_none());
        assert!(session.send("   \n\t").await.is_none());
        assert!(session.messages().is_empty());
        assert!(store.chat_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_input_is_trimmed_before_use() {
        let (_, mut session) = session_over_memory();

        let turn = session.send("  hello  ").await.unwrap();
        assert_eq!(turn.user.text, "hello");
    }

    #[tokio::test]
    async fn test_provider_failure_appends_fallback_reply() {
        let store = Arc::new(AssistantStore::new(Arc::new(MemoryBackend::new())));
        let mut session = ChatSession::new(store.clone(), Arc::new(DownProvider));

        let turn = session.send("hello").await.unwrap();
        assert!(turn.persisted.is_ok());
        assert_eq!(turn.assistant.text, FALLBACK_REPLY);
        assert!(!turn.assistant.is_user);

        // Fallback turn is persisted like any other
        let saved = store.chat_history().await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1].text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_memory_intact() {
        let store = Arc::new(AssistantStore::new(Arc::new(ReadOnlyBackend)));
        let provider = Arc::new(SimulatedProvider::with_seed(5).without_delay());
        let mut session = ChatSession::new(store, provider);

        let turn = session.send("hello").await.unwrap();
        assert!(turn.persisted.is_err());
        assert_eq!(session.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_load_hydrates_previous_history() {
        let store = Arc::new(AssistantStore::new(Arc::new(MemoryBackend::new())));
        let earlier = vec![
            ChatMessage::from_user("Hello"),
            ChatMessage::from_assistant("Hi there!"),
        ];
        store.save_chat_history(&earlier).await.unwrap();

        let provider = Arc::new(SimulatedProvider::with_seed(2).without_delay());
        let mut session = ChatSession::load(store.clone(), provider).await;
        assert_eq!(session.messages(), earlier.as_slice());

        // New turns extend the hydrated history
        session.send("Tell me more").await.unwrap();
        assert_eq!(session.messages().len(), 4);
        assert_eq!(store.chat_history().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_load_with_corrupt_record_starts_empty() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .set(crate::storage::CHAT_HISTORY_KEY, "not json")
            .await
            .unwrap();

        let store = Arc::new(AssistantStore::new(backend));
        let provider = Arc::new(SimulatedProvider::with_seed(2).without_delay());
        let session = ChatSession::load(store, provider).await;
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn test_clear_empties_memory_and_record() {
        let (store, mut session) = session_over_memory();

        session.send("hello").await.unwrap();
        session.clear().await.unwrap();

        assert!(session.messages().is_empty());
        assert!(store.chat_history().await.unwrap().is_empty());

        // Clearing again is fine
        session.clear().await.unwrap();
    }
}
