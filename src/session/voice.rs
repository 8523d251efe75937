//! Voice conversation session
//!
//! Same rhythm as the text session, over [`VoiceMessage`]. Speech capture
//! and playback live outside this crate; the session receives recognized
//! transcripts and hands back reply text.

use crate::assistant::{ResponseProvider, FALLBACK_REPLY};
use crate::history::VoiceMessage;
use crate::storage::{AssistantStore, StoreError};
use std::sync::Arc;
use tracing::{debug, warn};

/// One completed voice exchange plus its persistence outcome
#[derive(Debug)]
pub struct VoiceTurn {
    /// The appended user message (carries the audio URI, when any)
    pub user: VoiceMessage,
    /// The appended assistant reply
    pub assistant: VoiceMessage,
    /// Outcome of persisting this turn
    pub persisted: Result<(), StoreError>,
}

/// A voice conversation: ordered messages, a response provider, a store
pub struct VoiceSession {
    store: Arc<AssistantStore>,
    provider: Arc<dyn ResponseProvider>,
    messages: Vec<VoiceMessage>,
}

impl VoiceSession {
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
        let messages = match store.voice_history().await {
            Ok(messages) => messages,
            Err(e) => {
                warn!("Starting with empty voice history: {}", e);
                Vec::new()
            }
        };
        debug!("Voice session loaded with {} message(s)", messages.len());
        Self {
            store,
            provider,
            messages,
        }
    }

    /// Messages in display order
    pub fn messages(&self) -> &[VoiceMessage] {
        &self.messages
    }

    /// Handle one recognized utterance: append the user turn (with its
    /// audio URI, when any), obtain a reply, append the assistant turn,
    /// persisting after each append.
    ///
    /// Blank transcripts are a no-op. A provider failure becomes the
    /// fixed fallback reply. Assistant turns never carry an audio URI.
    pub async fn record_turn(
        &mut self,
        transcript: &str,
        audio_uri: Option<String>,
    ) -> Option<VoiceTurn> {
        let trimmed = transcript.trim();
        if trimmed.is_empty() {
            return None;
        }

        let user = VoiceMessage::from_transcript(trimmed, audio_uri);
        self.messages.push(user.clone());
        let user_saved = self.store.save_voice_history(&self.messages).await;

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

        let assistant = VoiceMessage::from_assistant(&reply_text);
        self.messages.push(assistant.clone());
        let assistant_saved = self.store.save_voice_history(&self.messages).await;

        let persisted = user_saved.and(assistant_saved);
        if let Err(ref e) = persisted {
            warn!("Voice history not persisted: {}", e);
        }

        Some(VoiceTurn {
            user,
            assistant,
            persisted,
        })
    }

    /// Drop the in-memory conversation and delete the persisted record.
    /// Memory is cleared even when the delete fails.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.messages.clear();
        self.store.clear_voice_history().await
    }
}
