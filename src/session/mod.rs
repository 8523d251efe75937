//! Conversation sessions
//!
//! In-memory ordered message lists wired to a response provider and the
//! persistence store. One session per conversation mode (text, voice);
//! both follow the same append, reply, persist rhythm.

pub mod chat;
pub mod voice;

pub use chat::{ChatSession, ChatTurn};
pub use voice::{VoiceSession, VoiceTurn};
