//! Event sinks for Boardroom.
//!
//! Agents and knowledge stores report what they say and do through
//! [`boardroom_core::EventSink`]. This crate routes those events to
//! `tracing`, to a JSONL log file, to memory for tests, or nowhere.

pub mod jsonl;
pub mod sink;

pub use jsonl::JsonlSink;
pub use sink::{FanoutSink, NoopSink, RecordingSink, TracingSink};

/// Errors from the telemetry subsystem.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("failed to open event log {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
