//! Provider selection — builds the configured LLM backend.
//!
//! The collaboration loop only ever sees `Arc<dyn Provider>`; this is the
//! single place that knows which concrete backend sits behind it.

use std::sync::Arc;
use std::time::Duration;

use boardroom_config::{LlmConfig, LlmProvider};
use boardroom_core::error::ProviderError;
use boardroom_core::provider::Provider;
use tracing::info;

use crate::anthropic::AnthropicProvider;
use crate::ollama::OllamaProvider;

/// Build the provider selected by `[llm]` configuration.
///
/// Hosted backends need an API key; a missing key fails here rather than
/// on the first turn.
pub fn build_from_config(config: &LlmConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let base_url = config.resolved_api_url();

    let provider: Arc<dyn Provider> = match config.provider {
        LlmProvider::Ollama => Arc::new(OllamaProvider::with_timeout(Some(&base_url), timeout)),
        LlmProvider::Anthropic => {
            let api_key = config
                .api_key
                .as_deref()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| {
                    ProviderError::NotConfigured(
                        "anthropic requires an API key (set ANTHROPIC_API_KEY or llm.api_key)".into(),
                    )
                })?;
            Arc::new(
                AnthropicProvider::new(api_key)
                    .with_base_url(&base_url)
                    .with_timeout(timeout),
            )
        }
    };

    info!(provider = provider.name(), model = %config.model, url = %base_url, "LLM provider ready");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_from_default_config() {
        let provider = build_from_config(&LlmConfig::default()).unwrap();
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn anthropic_without_key_is_not_configured() {
        let config = LlmConfig {
            provider: LlmProvider::Anthropic,
            ..LlmConfig::default()
        };
        let err = build_from_config(&config).err().unwrap();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[test]
    fn anthropic_with_key() {
        let config = LlmConfig {
            provider: LlmProvider::Anthropic,
            api_key: Some("sk-ant-test".into()),
            ..LlmConfig::default()
        };
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "anthropic");
    }
}
