//! Message value objects sent to LLM providers.
//!
//! A collaboration turn is a single prompt string, but providers speak in
//! role-tagged messages, so the prompt is wrapped before it leaves the agent.
//! The system prompt travels inside that prompt, so there is no system role.

use serde::{Deserialize, Serialize};

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The requesting side (the composed agent prompt)
    User,
    /// The model's reply
    Assistant,
}

impl Role {
    /// The wire name shared by the Ollama and Anthropic chat APIs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message exchanged with a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
