//! Error types for the Boardroom domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all Boardroom operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- LLM completion errors ---
    #[error("LLM unavailable: {0}")]
    Provider(#[from] ProviderError),

    // --- Knowledge store errors ---
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    // --- Caller-requested abort ---
    #[error("Collaboration cancelled")]
    Cancelled,
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of the LLM completion capability.
///
/// Every variant means the model could not produce a response. Nothing in
/// the core retries on these; they are surfaced to the caller as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures while loading or persisting knowledge documents.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Document not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to extract {}: {reason}", path.display())]
    Format { path: PathBuf, reason: String },

    #[error("Unsupported document format '{doc_type}': {reason}")]
    UnsupportedFormat { doc_type: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),
}
