//! LinguaBot - an English practice chat assistant core
//!
//! Keyword-matched or OpenAI-backed replies, with chat history, voice
//! history, and app settings persisted through swappable storage backends.

pub mod assistant;
pub mod config;
pub mod history;
pub mod session;
pub mod settings;
pub mod storage;

pub use assistant::{ResponseProvider, SimulatedProvider, FALLBACK_REPLY};
pub use config::{bootstrap, AppConfig, BootstrapError};
pub use history::{ChatMessage, VoiceMessage};
pub use session::{ChatSession, VoiceSession};
pub use settings::AppSettings;
pub use storage::AssistantStore;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
