//! In-process sinks.

use boardroom_core::event::{AgentEvent, Direction, EventSink};
use std::sync::{Arc, RwLock};
use tracing::info;

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _event: AgentEvent) {}
}

/// Forwards events to `tracing` at `info` level under the `boardroom::events`
/// target, so they share the subscriber's filtering and formatting.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: AgentEvent) {
        match event {
            AgentEvent::Communication {
                agent,
                direction: Direction::Inbound,
                counterpart,
                message,
                ..
            } => {
                let from = counterpart.as_deref().unwrap_or("user");
                info!(target: "boardroom::events", agent = %agent, from = %from, "Received from {from}: {message}");
            }
            AgentEvent::Communication {
                agent,
                direction: Direction::Outbound,
                message,
                ..
            } => {
                info!(target: "boardroom::events", agent = %agent, "{message}");
            }
            AgentEvent::Operation {
                operation, details, ..
            } => {
                info!(target: "boardroom::events", operation = %operation, "Operation: {operation} - {details}");
            }
        }
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RwLock<Vec<AgentEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<AgentEvent> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Communication events only, as `(agent, direction, message)`.
    pub fn communications(&self) -> Vec<(String, Direction, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                AgentEvent::Communication {
                    agent,
                    direction,
                    message,
                    ..
                } => Some((agent, direction, message)),
                AgentEvent::Operation { .. } => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: AgentEvent) {
        if let Ok(mut events) = self.events.write() {
            events.push(event);
        }
    }
}

/// Delivers each event to every inner sink, in order.
#[derive(Default, Clone)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanoutSink {
    fn record(&self, event: AgentEvent) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.record(event.clone());
            }
            last.record(event);
        }
    }
}
