//! LLM provider implementations for Boardroom.
//!
//! All providers implement the `boardroom_core::Provider` trait.
//! The router builds the configured provider.

pub mod anthropic;
pub mod ollama;
pub mod router;

pub use anthropic::AnthropicProvider;
pub use ollama::OllamaProvider;
pub use router::build_from_config;

/// Map a transport failure onto the provider error taxonomy.
pub(crate) fn transport_error(e: reqwest::Error) -> boardroom_core::ProviderError {
    if e.is_timeout() {
        boardroom_core::ProviderError::Timeout(e.to_string())
    } else {
        boardroom_core::ProviderError::Network(e.to_string())
    }
}

/// Build an HTTP client with a request timeout.
pub(crate) fn http_client(timeout: std::time::Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}
