//! Response generation
//!
//! The conversation engine: a keyword classifier over fixed reply tables,
//! plus the provider boundary that lets a network-backed completion
//! service stand in for the canned tables.

pub mod classifier;
#[cfg(feature = "openai-provider")]
pub mod openai;
pub mod replies;
pub mod simulated;

pub use classifier::{classify, ResponseCategory};
#[cfg(feature = "openai-provider")]
pub use openai::OpenAiProvider;
pub use simulated::{SimulatedProvider, DEMO_TRANSCRIPTS};

use async_trait::async_trait;

/// Reply appended when the provider fails; shown as a normal assistant turn
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble responding right now. Please try again.";

/// Response generation errors
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Text-completion capability
///
/// The single integration boundary for response generation: one prompt in,
/// one reply out. The default implementation is [`SimulatedProvider`]; a
/// real completion service plugs in by implementing `generate`.
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    /// Produce a reply for the given user prompt
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Short provider name for logs
    fn name(&self) -> &'static str;
}
