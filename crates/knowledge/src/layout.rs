//! On-disk layout of an agent's knowledge base.

use boardroom_core::error::KnowledgeError;
use std::path::{Path, PathBuf};

/// Paths for one agent's knowledge base.
///
/// ```text
/// <base>/<agent_id>/knowledge_base/
///     documents/   raw sources
///     processed/   <document_id>.json records
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeLayout {
    root: PathBuf,
}

impl KnowledgeLayout {
    pub fn new(base_dir: impl AsRef<Path>, agent_id: &str) -> Self {
        Self {
            root: base_dir.as_ref().join(agent_id).join("knowledge_base"),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.root.join("documents")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("processed")
    }

    /// Path of the role document, if the agent defines one.
    pub fn role_document(&self) -> PathBuf {
        self.documents_dir().join("role.md")
    }

    /// Create `documents/` and `processed/` if missing.
    pub async fn ensure_dirs(&self) -> Result<(), KnowledgeError> {
        for dir in [self.documents_dir(), self.processed_dir()] {
            tokio::fs::create_dir_all(&dir).await.map_err(|e| {
                KnowledgeError::Storage(format!("Failed to create {}: {e}", dir.display()))
            })?;
        }
        Ok(())
    }
}
