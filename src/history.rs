//! Chat and voice message types
//!
//! Messages are append-only within a session and serialize to the same
//! camelCase JSON the mobile clients already persist, so existing history
//! records rehydrate unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum characters accepted for a single message body
pub const MAX_MESSAGE_CHARS: usize = 500;

/// A single turn in a text conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique message ID (UUID)
    pub id: String,
    /// Message body, capped at [`MAX_MESSAGE_CHARS`]
    pub text: String,
    /// true for user turns, false for assistant turns
    pub is_user: bool,
    /// Creation time (UTC)
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user turn
    pub fn from_user(text: &str) -> Self {
        Self::new(text, true)
    }

    /// Create an assistant turn
    pub fn from_assistant(text: &str) -> Self {
        Self::new(text, false)
    }

    fn new(text: &str, is_user: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: truncate_chars(text, MAX_MESSAGE_CHARS),
            is_user,
            timestamp: Utc::now(),
        }
    }
}

/// A single turn in a voice conversation
///
/// Same shape as [`ChatMessage`] plus an optional reference to the captured
/// audio. The URI points at an external resource; this crate never touches
/// the audio itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceMessage {
    /// Unique message ID (UUID)
    pub id: String,
    /// Transcript (user) or response text (assistant)
    pub text: String,
    /// true for user turns, false for assistant turns
    pub is_user: bool,
    /// Creation time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Captured audio location, user turns only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_uri: Option<String>,
}

impl VoiceMessage {
    /// Create a user turn from a recognized transcript
    pub fn from_transcript(text: &str, audio_uri: Option<String>) -> Self {
        Self::new(text, true, audio_uri)
    }

    /// Create an assistant turn
    pub fn from_assistant(text: &str) -> Self {
        Self::new(text, false, None)
    }

    fn new(text: &str, is_user: bool, audio_uri: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: truncate_chars(text, MAX_MESSAGE_CHARS),
            is_user,
            timestamp: Utc::now(),
            audio_uri,
        }
    }
}

/// Truncate on a char boundary, never mid-codepoint
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
