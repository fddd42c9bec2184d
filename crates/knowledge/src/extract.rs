//! Content extraction — turning a source file into plain text.
//!
//! PDF text comes from `pdf-extract`, workbooks from `calamine` and CSV
//! from `csv`. The binary decoders are synchronous, so they run on the
//! blocking pool.

use async_trait::async_trait;
use boardroom_core::document::DocType;
use boardroom_core::error::KnowledgeError;
use calamine::{Reader, open_workbook_auto};
use std::path::Path;

/// Extracts plain text from a source file of a declared type.
///
/// Plug a different implementation into
/// [`crate::SubstringStore::with_extractor`] to support other formats.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(&self, path: &Path, doc_type: DocType) -> Result<String, KnowledgeError>;
}

/// The default extractor.
///
/// - text and markdown: decoded as UTF-8
/// - pdf: page text, one page per line block
/// - spreadsheet: `.csv` or any workbook `calamine` opens, one row per line
///   with cells joined by ` | `
#[derive(Debug, Default, Clone, Copy)]
pub struct FileExtractor;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[async_trait]
impl DocumentExtractor for FileExtractor {
    async fn extract(&self, path: &Path, doc_type: DocType) -> Result<String, KnowledgeError> {
        match doc_type {
            DocType::Text | DocType::Markdown => read_utf8(path).await,
            DocType::Pdf => {
                let bytes = read_bytes(path).await?;
                let owned = path.to_path_buf();
                blocking(path, move || {
                    pdf_extract::extract_text_from_mem(&bytes)
                        .map(|text| text.trim().to_string())
                        .map_err(|e| format_error(&owned, e))
                })
                .await
            }
            DocType::Spreadsheet => {
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_ascii_lowercase())
                    .unwrap_or_default();
                if ext == "csv" {
                    let text = read_utf8(path).await?;
                    return render_csv(&text).map_err(|e| format_error(path, e));
                }
                if !WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
                    return Err(KnowledgeError::UnsupportedFormat {
                        doc_type: doc_type.to_string(),
                        reason: format!("no spreadsheet reader for .{ext} files"),
                    });
                }
                let owned = path.to_path_buf();
                blocking(path, move || render_workbook(&owned)).await
            }
        }
    }
}

fn format_error(path: &Path, e: impl std::fmt::Display) -> KnowledgeError {
    KnowledgeError::Format {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

async fn blocking<F>(path: &Path, f: F) -> Result<String, KnowledgeError>
where
    F: FnOnce() -> Result<String, KnowledgeError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| format_error(path, format!("extractor aborted: {e}")))?
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>, KnowledgeError> {
    tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            KnowledgeError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            format_error(path, e)
        }
    })
}

async fn read_utf8(path: &Path) -> Result<String, KnowledgeError> {
    let bytes = read_bytes(path).await?;
    String::from_utf8(bytes).map_err(|e| format_error(path, format!("not valid UTF-8: {e}")))
}

fn join_row<'a>(cells: impl Iterator<Item = &'a str>) -> Option<String> {
    let cells: Vec<&str> = cells.map(str::trim).collect();
    if cells.iter().all(|c| c.is_empty()) {
        return None;
    }
    Some(cells.join(" | "))
}

/// Render CSV as one line per record, cells joined by ` | `.
///
/// Blank records are dropped. Ragged rows are accepted.
pub fn render_csv(input: &str) -> Result<String, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(line) = join_row(record.iter()) {
            lines.push(line);
        }
    }
    Ok(lines.join("\n"))
}

/// Render every sheet of a workbook under a `## <sheet>` heading.
fn render_workbook(path: &Path) -> Result<String, KnowledgeError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| format_error(path, e))?;

    let mut sections = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| format_error(path, e))?;
        let rows: Vec<String> = range
            .rows()
            .filter_map(|row| {
                let cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
                join_row(cells.iter().map(String::as_str))
            })
            .collect();
        if !rows.is_empty() {
            sections.push(format!("## {name}\n{}", rows.join("\n")));
        }
    }
    Ok(sections.join("\n\n"))
}
