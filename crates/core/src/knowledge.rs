//! KnowledgeStore trait — per-agent document retrieval.
//!
//! The store is what grounds an agent's prompt. The shipped implementation
//! matches substrings; ranked or semantic retrieval can replace it behind
//! this same trait without touching the agent.

use async_trait::async_trait;
use std::path::Path;

use crate::document::{DocType, Document};
use crate::error::KnowledgeError;

/// The core KnowledgeStore trait.
///
/// A store belongs to exactly one agent. `load` mutates it and is not
/// specified as safe for concurrent writers; queries are read-only.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// The id of the agent that owns this store (e.g., "product_owner").
    fn owner(&self) -> &str;

    /// Extract, store and persist a document.
    ///
    /// A document with the same id replaces the previous one.
    async fn load(&self, source: &Path, doc_type: DocType) -> std::result::Result<Document, KnowledgeError>;

    /// All documents relevant to `text`, in insertion order.
    ///
    /// Never errors on "no match"; an empty vec is returned instead.
    async fn query(&self, text: &str) -> Vec<Document>;

    /// Look up a document by id.
    async fn get(&self, document_id: &str) -> Option<Document>;

    /// All document ids, in insertion order.
    async fn list(&self) -> Vec<String>;
}
