//! Configuration document
//!
//! The versioned JSON document resolved once at startup. It names which
//! storage backend holds the persisted records and which provider
//! answers prompts; the constructed instances are then injected into
//! everything downstream, so nothing re-reads platform state later.

use serde::{Deserialize, Serialize};

/// Current configuration document version
pub const CONFIG_VERSION: u32 = 1;

/// Top-level configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Document version for forward-compatibility checks
    #[serde(default = "default_version")]
    pub version: u32,

    /// Storage backend for chat history, voice history, and settings
    #[serde(default)]
    pub storage: StorageKind,

    /// Response provider for assistant replies
    #[serde(default)]
    pub provider: ProviderKind,

    /// Settings for the OpenAI-compatible provider
    #[serde(default)]
    pub openai: OpenAiConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: StorageKind::default(),
            provider: ProviderKind::default(),
            openai: OpenAiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Apply environment variable overrides on top of the loaded document.
    ///
    /// `LINGUABOT_STORAGE` and `LINGUABOT_PROVIDER` select the backend and
    /// provider; unknown values are logged and ignored. The API key comes
    /// from `LINGUABOT_OPENAI_API_KEY`, falling back to `OPENAI_API_KEY`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("LINGUABOT_STORAGE") {
            match StorageKind::parse(&value) {
                Some(kind) => self.storage = kind,
                None => tracing::warn!("Ignoring unknown LINGUABOT_STORAGE value '{}'", value),
            }
        }

        if let Ok(value) = std::env::var("LINGUABOT_PROVIDER") {
            match ProviderKind::parse(&value) {
                Some(kind) => self.provider = kind,
                None => tracing::warn!("Ignoring unknown LINGUABOT_PROVIDER value '{}'", value),
            }
        }

        if let Ok(key) =
            std::env::var("LINGUABOT_OPENAI_API_KEY").or_else(|_| std::env::var("OPENAI_API_KEY"))
        {
            if !key.is_empty() {
                self.openai.api_key = Some(key);
            }
        }
    }
}

/// Which key-value backend holds the persisted records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// In-process map, nothing survives the process
    Memory,
    /// JSON files under the data directory
    #[default]
    File,
    /// Operating system credential store
    Keychain,
}

impl StorageKind {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "file" => Some(Self::File),
            "keychain" | "keyring" => Some(Self::Keychain),
            _ => None,
        }
    }
}

/// Which provider answers prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Canned keyword-matched replies, no network
    #[default]
    Simulated,
    /// OpenAI-compatible chat completions service
    OpenAi,
}

impl ProviderKind {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "simulated" => Some(Self::Simulated),
            "openai" => Some(Self::OpenAi),
            _ => None,
        }
    }
}

/// Settings for the OpenAI-compatible provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAiConfig {
    /// API key; prefer the environment variable over storing it on disk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Chat completions endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name sent with each request
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            model: default_model(),
        }
    }
}
