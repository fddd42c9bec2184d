//! Knowledge documents — the unit a knowledge store holds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::KnowledgeError;

/// The declared type of a source document. Drives content extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// Plain text, read as-is
    #[default]
    Text,
    /// Markdown, read as-is
    Markdown,
    /// PDF, page text only
    Pdf,
    /// CSV or workbook, rendered as a table
    Spreadsheet,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Text => "text",
            DocType::Markdown => "markdown",
            DocType::Pdf => "pdf",
            DocType::Spreadsheet => "spreadsheet",
        }
    }

    /// Guess the type from a file extension. Unknown extensions are text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "md" | "markdown" => DocType::Markdown,
            "pdf" => DocType::Pdf,
            "csv" | "xlsx" | "xls" | "ods" => DocType::Spreadsheet,
            _ => DocType::Text,
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = KnowledgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(DocType::Text),
            "markdown" | "md" => Ok(DocType::Markdown),
            "pdf" => Ok(DocType::Pdf),
            "spreadsheet" | "csv" | "xlsx" | "xls" | "ods" => Ok(DocType::Spreadsheet),
            other => Err(KnowledgeError::UnsupportedFormat {
                doc_type: other.to_string(),
                reason: "expected one of text, markdown, pdf, spreadsheet".into(),
            }),
        }
    }
}

/// A loaded document. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Extracted plain-text content
    pub content: String,

    /// Where the content was loaded from
    pub source: String,

    /// Declared type used for extraction
    pub doc_type: DocType,

    /// Free-form metadata; always carries `filename`
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    /// Build a document for a source path, recording its file name.
    pub fn new(content: impl Into<String>, source: &Path, doc_type: DocType) -> Self {
        let mut metadata = BTreeMap::new();
        if let Some(name) = source.file_name().and_then(|n| n.to_str()) {
            metadata.insert("filename".to_string(), name.to_string());
        }
        Self {
            content: content.into(),
            source: source.display().to_string(),
            doc_type,
            metadata,
        }
    }

    /// The store key for this document: `<file stem>_<doc type>`.
    pub fn id(&self) -> String {
        document_id(Path::new(&self.source), self.doc_type)
    }
}

/// Derive a document id from a source path and type.
///
/// Two loads of the same file with the same type always collide, which is
/// what makes reloading overwrite instead of duplicate.
pub fn document_id(source: &Path, doc_type: DocType) -> String {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    format!("{stem}_{doc_type}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_stem_and_type() {
        let id = document_id(Path::new("agents/cto/knowledge_base/documents/role.md"), DocType::Markdown);
        assert_eq!(id, "role_markdown");
    }

    #[test]
    fn same_stem_different_type_differs() {
        let p = Path::new("notes.txt");
        assert_ne!(document_id(p, DocType::Text), document_id(p, DocType::Markdown));
    }

    #[test]
    fn new_records_filename() {
        let doc = Document::new("body", Path::new("docs/roadmap.md"), DocType::Markdown);
        assert_eq!(doc.metadata.get("filename").map(String::as_str), Some("roadmap.md"));
        assert_eq!(doc.id(), "roadmap_markdown");
    }

    #[test]
    fn parse_doc_type() {
        assert_eq!("Markdown".parse::<DocType>().unwrap(), DocType::Markdown);
        assert_eq!("csv".parse::<DocType>().unwrap(), DocType::Spreadsheet);
        assert!("docx".parse::<DocType>().is_err());
    }

    #[test]
    fn doc_type_from_extension() {
        assert_eq!(DocType::from_path(Path::new("a/b.PDF")), DocType::Pdf);
        assert_eq!(DocType::from_path(Path::new("metrics.xlsx")), DocType::Spreadsheet);
        assert_eq!(DocType::from_path(Path::new("README")), DocType::Text);
    }

    #[test]
    fn doc_type_serializes_lowercase() {
        let json = serde_json::to_string(&DocType::Spreadsheet).unwrap();
        assert_eq!(json, "\"spreadsheet\"");
    }
}
