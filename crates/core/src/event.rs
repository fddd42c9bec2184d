//! Observational events — what agents said and what operations ran.
//!
//! Components receive an [`EventSink`] at construction instead of reaching
//! for a global logger. Sinks must never influence control flow: `record`
//! cannot fail and returns nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Whether a communication event is a message an agent received or sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

/// All events emitted by agents and knowledge stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentEvent {
    /// An agent received or produced a message
    Communication {
        agent: String,
        direction: Direction,
        /// The other party, when known
        #[serde(default, skip_serializing_if = "Option::is_none")]
        counterpart: Option<String>,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// A file system or API operation was performed
    Operation {
        operation: String,
        details: String,
        timestamp: DateTime<Utc>,
    },
}

impl AgentEvent {
    pub fn communication(
        agent: impl Into<String>,
        direction: Direction,
        counterpart: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        AgentEvent::Communication {
            agent: agent.into(),
            direction,
            counterpart: counterpart.map(str::to_string),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn operation(operation: impl Into<String>, details: impl Into<String>) -> Self {
        AgentEvent::Operation {
            operation: operation.into(),
            details: details.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            AgentEvent::Communication { timestamp, .. } | AgentEvent::Operation { timestamp, .. } => *timestamp,
        }
    }
}

/// Destination for observational events.
pub trait EventSink: Send + Sync {
    fn record(&self, event: AgentEvent);
}

/// A broadcast-based event bus.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub, so a front end
/// can render the conversation live while the loop runs.
pub struct EventBus {
    sender: broadcast::Sender<Arc<AgentEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: AgentEvent) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<AgentEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventSink for EventBus {
    fn record(&self, event: AgentEvent) {
        self.publish(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.record(AgentEvent::communication(
            "CTO",
            Direction::Outbound,
            Some("Product Owner"),
            "Use a write-through cache.",
        ));

        let event = rx.recv().await.unwrap();
        match event.as_ref() {
            AgentEvent::Communication { agent, direction, counterpart, .. } => {
                assert_eq!(agent, "CTO");
                assert_eq!(*direction, Direction::Outbound);
                assert_eq!(counterpart.as_deref(), Some("Product Owner"));
            }
            _ => panic!("Expected Communication event"),
        }
    }

    #[test]
    fn event_bus_no_subscribers_doesnt_panic() {
        let bus = EventBus::new(16);
        bus.publish(AgentEvent::operation("knowledge.load", "role.md"));
    }

    #[test]
    fn events_serialize_with_kind_tag() {
        let json = serde_json::to_string(&AgentEvent::operation("knowledge.load", "x")).unwrap();
        assert!(json.contains("\"kind\":\"operation\""));
    }
}
