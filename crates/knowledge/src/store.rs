//! Substring-matching knowledge store.
//!
//! Documents are held in memory in insertion order and mirrored to the
//! `processed/` directory on every load.

use async_trait::async_trait;
use boardroom_core::document::{DocType, Document};
use boardroom_core::error::KnowledgeError;
use boardroom_core::event::{AgentEvent, EventSink};
use boardroom_core::knowledge::KnowledgeStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::extract::{DocumentExtractor, FileExtractor};
use crate::layout::KnowledgeLayout;
use crate::processed;

/// Ordered id → document map. Replacing an id keeps its original slot.
#[derive(Default)]
struct Documents {
    order: Vec<String>,
    by_id: HashMap<String, Document>,
}

impl Documents {
    fn upsert(&mut self, doc: Document) {
        let id = doc.id();
        if self.by_id.insert(id.clone(), doc).is_none() {
            self.order.push(id);
        }
    }

    fn iter(&self) -> impl Iterator<Item = &Document> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }
}

/// A [`KnowledgeStore`] that matches documents by case-insensitive substring.
pub struct SubstringStore {
    owner: String,
    layout: KnowledgeLayout,
    extractor: Box<dyn DocumentExtractor>,
    sink: Option<Arc<dyn EventSink>>,
    docs: RwLock<Documents>,
}

impl SubstringStore {
    /// Create an empty store for `owner` under `base_dir`.
    ///
    /// Nothing touches the filesystem until the first load.
    pub fn new(base_dir: impl AsRef<Path>, owner: impl Into<String>) -> Self {
        let owner = owner.into();
        Self {
            layout: KnowledgeLayout::new(base_dir, &owner),
            owner,
            extractor: Box::new(FileExtractor),
            sink: None,
            docs: RwLock::new(Documents::default()),
        }
    }

    /// Replace the content extractor.
    pub fn with_extractor(mut self, extractor: Box<dyn DocumentExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Report loads as `Operation` events.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn layout(&self) -> &KnowledgeLayout {
        &self.layout
    }

    fn emit(&self, operation: &str, details: String) {
        if let Some(sink) = &self.sink {
            sink.record(AgentEvent::operation(operation, details));
        }
    }

    /// Load every file in `documents/`, inferring the type from its extension.
    ///
    /// Files that fail to load are logged and skipped. Returns the documents
    /// that loaded, in file-name order.
    pub async fn load_directory(&self) -> Result<Vec<Document>, KnowledgeError> {
        let dir = self.layout.documents_dir();
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(agent = %self.owner, dir = %dir.display(), "No documents directory");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(KnowledgeError::Storage(format!(
                    "Failed to read {}: {e}",
                    dir.display()
                )));
            }
        };

        let mut paths: Vec<PathBuf> = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| KnowledgeError::Storage(e.to_string()))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| KnowledgeError::Storage(e.to_string()))?;
            if file_type.is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort();

        let mut loaded = Vec::with_capacity(paths.len());
        for path in paths {
            let doc_type = DocType::from_path(&path);
            match self.load(&path, doc_type).await {
                Ok(doc) => loaded.push(doc),
                Err(e) => {
                    warn!(agent = %self.owner, path = %path.display(), error = %e, "Skipping document");
                }
            }
        }

        info!(agent = %self.owner, count = loaded.len(), "Knowledge directory loaded");
        Ok(loaded)
    }

    /// Reload every record in `processed/` without re-extracting sources.
    ///
    /// Returns the number of documents restored.
    pub async fn restore_processed(&self) -> Result<usize, KnowledgeError> {
        let records = processed::read_records(&self.layout.processed_dir()).await?;
        let count = records.len();

        let mut docs = self.docs.write().await;
        for doc in records {
            docs.upsert(doc);
        }
        drop(docs);

        if count > 0 {
            self.emit(
                "restore_processed",
                format!("Restored {count} documents for {}", self.owner),
            );
        }
        debug!(agent = %self.owner, count, "Processed records restored");
        Ok(count)
    }
}

#[async_trait]
impl KnowledgeStore for SubstringStore {
    fn owner(&self) -> &str {
        &self.owner
    }

    async fn load(&self, source: &Path, doc_type: DocType) -> Result<Document, KnowledgeError> {
        match tokio::fs::try_exists(source).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(KnowledgeError::NotFound {
                    path: source.to_path_buf(),
                });
            }
            Err(e) => {
                return Err(KnowledgeError::Storage(format!(
                    "Failed to stat {}: {e}",
                    source.display()
                )));
            }
        }

        let content = self.extractor.extract(source, doc_type).await?;
        let doc = Document::new(content, source, doc_type);
        let id = doc.id();

        let record = processed::write_record(&self.layout.processed_dir(), &doc).await?;
        self.docs.write().await.upsert(doc.clone());

        debug!(agent = %self.owner, id = %id, record = %record.display(), "Document loaded");
        self.emit(
            "load_document",
            format!("Loaded {id} from {}", source.display()),
        );

        Ok(doc)
    }

    async fn query(&self, text: &str) -> Vec<Document> {
        let needle = text.to_lowercase();
        self.docs
            .read()
            .await
            .iter()
            .filter(|d| d.content.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    async fn get(&self, document_id: &str) -> Option<Document> {
        self.docs.read().await.by_id.get(document_id).cloned()
    }

    async fn list(&self) -> Vec<String> {
        self.docs.read().await.order.clone()
    }
}
