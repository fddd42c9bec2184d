//! # Boardroom Core
//!
//! Domain types, traits, and error definitions for the Boardroom
//! two-agent collaboration runtime. This crate has **no framework
//! dependencies** — it defines the domain model that every other crate
//! implements against.
//!
//! ## Design Philosophy
//!
//! Every external capability is a trait here. Implementations live in
//! their respective crates:
//! - [`Provider`] — LLM completion (`boardroom-providers`)
//! - [`KnowledgeStore`] — per-agent document retrieval (`boardroom-knowledge`)
//! - [`EventSink`] — observational logging (`boardroom-telemetry`)
//!
//! This keeps the collaboration loop testable with scripted stubs.

pub mod document;
pub mod error;
pub mod event;
pub mod identity;
pub mod knowledge;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use document::{DocType, Document};
pub use error::{Error, KnowledgeError, ProviderError, Result};
pub use event::{AgentEvent, Direction, EventBus, EventSink};
pub use identity::{AgentIdentity, AgentRole};
pub use knowledge::KnowledgeStore;
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
