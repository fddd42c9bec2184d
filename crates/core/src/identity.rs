//! Agent identity — who is speaking, and how their system prompt reads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder substituted with the agent name when the template renders.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// An agent's identity. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    /// Display name, e.g. "Product Owner"
    pub name: String,

    /// System prompt template; `{name}` is replaced by [`AgentIdentity::name`]
    pub system_prompt_template: String,
}

impl AgentIdentity {
    pub fn new(name: impl Into<String>, system_prompt_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt_template: system_prompt_template.into(),
        }
    }

    /// The system prompt with the name filled in.
    pub fn system_prompt(&self) -> String {
        self.system_prompt_template.replace(NAME_PLACEHOLDER, &self.name)
    }

    /// Directory-safe id derived from the name: "Product Owner" → "product_owner".
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

impl fmt::Display for AgentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Lowercase, with every run of non-alphanumerics collapsed to `_`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    slug.trim_end_matches('_').to_string()
}

/// The fixed seat an agent occupies in a collaboration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Speaks first, on the caller's prompt
    Initiator,
    /// Answers the initiator
    Responder,
}

impl AgentRole {
    /// Seat index in a two-agent collaboration.
    pub fn index(&self) -> usize {
        match self {
            AgentRole::Initiator => 0,
            AgentRole::Responder => 1,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            AgentRole::Initiator => AgentRole::Responder,
            AgentRole::Responder => AgentRole::Initiator,
        }
    }
}
