//! LLM integration for the roadmap bot.
//!
//! Two backends, both plain HTTP via reqwest:
//! - **YandexGPT**: the primary roadmap
//! - **Hyperbolic** (Llama 3.3): supplementary recommendations
//!
//! Both sit behind the `GenerationProvider` trait so the aggregator can
//! treat them uniformly.

mod http;
pub mod hyperbolic;
#[cfg(test)]
pub(crate) mod mock_server;
pub mod prompt;
pub mod provider;
pub mod yandex;

pub use hyperbolic::HyperbolicProvider;
pub use provider::{GenerationProvider, GenerationRequest, GenerationResult};
pub use yandex::YandexGptProvider;

use std::sync::Arc;
use std::time::Duration;

use crate::error::LlmError;

/// Request timeout applied to both providers unless configured otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Supported generation backends.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    YandexGpt {
        api_key: secrecy::SecretString,
        folder_id: String,
        model: Option<String>,
        base_url: Option<String>,
    },
    Hyperbolic {
        api_key: secrecy::SecretString,
        model: Option<String>,
        base_url: Option<String>,
    },
}

/// Create a generation provider from configuration.
pub fn create_provider(
    config: &ProviderConfig,
    timeout: Duration,
) -> Result<Arc<dyn GenerationProvider>, LlmError> {
    match config {
        ProviderConfig::YandexGpt {
            api_key,
            folder_id,
            model,
            base_url,
        } => {
            let mut provider = YandexGptProvider::new(api_key.clone(), folder_id.clone(), timeout)?;
            if let Some(model) = model {
                provider = provider.with_model(model.clone());
            }
            if let Some(url) = base_url {
                provider = provider.with_base_url(url.clone());
            }
            tracing::info!("Using YandexGPT (folder: {folder_id})");
            Ok(Arc::new(provider))
        }
        ProviderConfig::Hyperbolic {
            api_key,
            model,
            base_url,
        } => {
            let mut provider = HyperbolicProvider::new(api_key.clone(), timeout)?;
            if let Some(model) = model {
                provider = provider.with_model(model.clone());
            }
            if let Some(url) = base_url {
                provider = provider.with_base_url(url.clone());
            }
            tracing::info!("Using Hyperbolic");
            Ok(Arc::new(provider))
        }
    }
}
