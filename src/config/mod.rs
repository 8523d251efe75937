//! Configuration and startup wiring
//!
//! Loads the config document, applies environment overrides, and
//! resolves the storage backend and response provider exactly once.
//! Everything downstream receives the constructed instances instead of
//! reaching for globals.

pub mod storage;
pub mod types;

pub use storage::{config_dir, config_file, ConfigStorage, StorageError};
pub use types::{AppConfig, OpenAiConfig, ProviderKind, StorageKind, CONFIG_VERSION};

use std::sync::Arc;

use tracing::info;

use crate::assistant::{ResponseProvider, SimulatedProvider};
use crate::storage::{
    AssistantStore, BackendError, FileBackend, KeyValueBackend, KeychainBackend, MemoryBackend,
};

/// Startup wiring errors
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Config error: {0}")]
    Config(#[from] StorageError),

    #[error("Storage backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Provider 'openai' requires an API key (set openai.apiKey or LINGUABOT_OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("Provider '{0}' is not available in this build")]
    ProviderUnavailable(&'static str),
}

impl AppConfig {
    /// Construct the key-value backend this document names
    pub fn resolve_backend(&self) -> Result<Arc<dyn KeyValueBackend>, BootstrapError> {
        let backend: Arc<dyn KeyValueBackend> = match self.storage {
            StorageKind::Memory => Arc::new(MemoryBackend::new()),
            StorageKind::File => Arc::new(FileBackend::new()?),
            StorageKind::Keychain => Arc::new(KeychainBackend::new()),
        };
        info!("Resolved storage backend '{}'", backend.name());
        Ok(backend)
    }

    /// Construct the response provider this document names
    pub fn resolve_provider(&self) -> Result<Arc<dyn ResponseProvider>, BootstrapError> {
        match self.provider {
            ProviderKind::Simulated => Ok(Arc::new(SimulatedProvider::new())),

            #[cfg(feature = "openai-provider")]
            ProviderKind::OpenAi => {
                let api_key = self
                    .openai
                    .api_key
                    .clone()
                    .filter(|key| !key.is_empty())
                    .ok_or(BootstrapError::MissingApiKey)?;
                let provider = crate::assistant::OpenAiProvider::new(api_key)
                    .with_endpoint(self.openai.endpoint.clone())
                    .with_model(self.openai.model.clone());
                Ok(Arc::new(provider))
            }

            #[cfg(not(feature = "openai-provider"))]
            ProviderKind::OpenAi => Err(BootstrapError::ProviderUnavailable("openai")),
        }
    }
}

/// Load the config, apply environment overrides, and wire everything up.
///
/// This is the one place backend and provider selection happens. Callers
/// hand the returned store and provider to the sessions they create.
pub async fn bootstrap(
) -> Result<(AppConfig, Arc<AssistantStore>, Arc<dyn ResponseProvider>), BootstrapError> {
    let mut config = ConfigStorage::new()?.load().await?;
    config.apply_env_overrides();

    let backend = config.resolve_backend()?;
    let store = Arc::new(AssistantStore::new(backend));
    let provider = config.resolve_provider()?;

    info!(
        "Bootstrap complete: storage={:?}, provider='{}'",
        config.storage,
        provider.name()
    );

    Ok((config, store, provider))
}
