//! Processed records — one pretty-printed JSON file per loaded document.

use boardroom_core::document::Document;
use boardroom_core::error::KnowledgeError;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Write `doc` to `<dir>/<document_id>.json`, replacing any previous record.
pub async fn write_record(dir: &Path, doc: &Document) -> Result<PathBuf, KnowledgeError> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        KnowledgeError::Storage(format!("Failed to create {}: {e}", dir.display()))
    })?;

    let path = dir.join(format!("{}.json", doc.id()));
    let json = serde_json::to_string_pretty(doc)
        .map_err(|e| KnowledgeError::Storage(format!("Failed to serialize document: {e}")))?;

    tokio::fs::write(&path, json).await.map_err(|e| {
        KnowledgeError::Storage(format!("Failed to write {}: {e}", path.display()))
    })?;

    Ok(path)
}

/// Read every `*.json` record in `dir`, ordered by file name.
///
/// A missing directory yields no records. Corrupted records are skipped.
pub async fn read_records(dir: &Path) -> Result<Vec<Document>, KnowledgeError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(KnowledgeError::Storage(format!(
                "Failed to read {}: {e}",
                dir.display()
            )));
        }
    };

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| KnowledgeError::Storage(e.to_string()))?
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut docs = Vec::with_capacity(paths.len());
    for path in paths {
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable processed record");
                continue;
            }
        };
        match serde_json::from_str::<Document>(&raw) {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping corrupted processed record");
            }
        }
    }

    Ok(docs)
}
