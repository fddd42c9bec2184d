//! Append-only JSONL event log.

use boardroom_core::event::{AgentEvent, EventSink};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

use crate::TelemetryError;

/// Appends one JSON object per event to a log file.
///
/// Write failures are reported through `tracing` and otherwise ignored;
/// a broken log never stops a collaboration.
pub struct JsonlSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlSink {
    /// Open `path` for appending, creating it and its parent directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TelemetryError> {
        let path = path.as_ref().to_path_buf();
        let open_err = |e: std::io::Error| TelemetryError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(open_err)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(open_err)?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_event(&self, event: &AgentEvent) -> Result<(), String> {
        let mut line = serde_json::to_string(event).map_err(|e| e.to_string())?;
        line.push('\n');
        let mut file = self.file.lock().map_err(|e| e.to_string())?;
        file.write_all(line.as_bytes()).map_err(|e| e.to_string())
    }
}

impl EventSink for JsonlSink {
    fn record(&self, event: AgentEvent) {
        if let Err(e) = self.write_event(&event) {
            warn!(path = %self.path.display(), error = %e, "Failed to append event");
        }
    }
}
