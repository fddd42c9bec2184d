//! The two-agent collaboration loop.
//!
//! The initiator answers the caller's prompt; from then on each agent's
//! output becomes the other's input. The loop stops when a response is
//! conclusive, when the iteration cap is hit, when the provider fails, or
//! when the caller cancels.
//!
//! ```text
//!            ┌──────── not conclusive, under cap ────────┐
//!            ▼                                            │
//! Running ── turn ── conclusive ──▶ Concluded             │
//!    │         │                                          │
//!    │         ├── provider error ──▶ Failed              │
//!    │         └── swap speakers ─────────────────────────┘
//!    │                   │
//!    │                   └── cap reached ──▶ Exhausted
//!    └── token cancelled ──▶ Cancelled
//! ```

use boardroom_config::CollaborationConfig;
use boardroom_core::error::{Error, ProviderError};
use boardroom_core::identity::{AgentIdentity, AgentRole};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::agent::Agent;
use crate::termination::{KeywordDetector, TerminationPolicy};

/// Default cap on turns per collaboration.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// One agent response, recorded in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turn {
    pub speaker: AgentIdentity,
    pub recipient: Option<AgentIdentity>,
    pub input_message: String,
    pub output_message: String,
    pub sequence_number: u32,
    pub timestamp: DateTime<Utc>,
}

/// How a collaboration ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A response met the termination policy
    Concluded,
    /// The iteration cap was reached without a conclusive response
    Exhausted,
    /// The model was unavailable; carries the provider's error unmodified
    Failed(ProviderError),
    /// The caller's cancellation token fired between turns
    Cancelled,
}

impl Outcome {
    /// Whether the run finished on its own terms.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Concluded | Outcome::Exhausted)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Concluded => f.write_str("concluded"),
            Outcome::Exhausted => f.write_str("exhausted"),
            Outcome::Failed(e) => write!(f, "failed: {e}"),
            Outcome::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Mutable state of one run. Lives for a single `start_collaboration` call.
#[derive(Debug, Clone)]
pub struct CollaborationState {
    pub transcript: Vec<Turn>,
    pub current_speaker: AgentRole,
    pub iteration_count: u32,
    pub terminated: bool,
    pub termination_reason: Option<Outcome>,
}

impl CollaborationState {
    fn new() -> Self {
        Self {
            transcript: Vec::new(),
            current_speaker: AgentRole::Initiator,
            iteration_count: 0,
            terminated: false,
            termination_reason: None,
        }
    }

    pub fn current_speaker_index(&self) -> usize {
        self.current_speaker.index()
    }

    fn terminate(&mut self, outcome: Outcome) {
        self.terminated = true;
        self.termination_reason = Some(outcome);
    }
}

/// Transcript plus outcome of a finished run.
#[derive(Debug, Clone)]
pub struct CollaborationResult {
    pub transcript: Vec<Turn>,
    pub outcome: Outcome,
}

impl CollaborationResult {
    fn from_state(state: CollaborationState) -> Self {
        Self {
            outcome: state.termination_reason.unwrap_or(Outcome::Exhausted),
            transcript: state.transcript,
        }
    }

    /// The last agent output, if any turn completed.
    pub fn final_message(&self) -> Option<&str> {
        self.transcript.last().map(|t| t.output_message.as_str())
    }

    /// Convert failed and cancelled runs into errors.
    pub fn into_result(self) -> boardroom_core::Result<Vec<Turn>> {
        match self.outcome {
            Outcome::Concluded | Outcome::Exhausted => Ok(self.transcript),
            Outcome::Failed(e) => Err(Error::Provider(e)),
            Outcome::Cancelled => Err(Error::Cancelled),
        }
    }
}

/// Alternates two agents until a conclusion or the iteration cap.
pub struct CollaborationLoop {
    agents: [Agent; 2],
    max_iterations: u32,
    policy: Box<dyn TerminationPolicy>,
}

impl CollaborationLoop {
    pub fn new(initiator: Agent, responder: Agent) -> Self {
        Self {
            agents: [initiator, responder],
            max_iterations: DEFAULT_MAX_ITERATIONS,
            policy: Box::new(KeywordDetector),
        }
    }

    pub fn with_config(self, config: &CollaborationConfig) -> Self {
        self.with_max_iterations(config.max_iterations)
    }

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_policy(mut self, policy: Box<dyn TerminationPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn agent(&self, role: AgentRole) -> &Agent {
        &self.agents[role.index()]
    }

    /// Run to completion without external cancellation.
    pub async fn start_collaboration(&self, initial_prompt: &str) -> CollaborationResult {
        self.start_with_cancellation(initial_prompt, &CancellationToken::new())
            .await
    }

    /// Run until a terminal state, checking `cancel` before every turn.
    pub async fn start_with_cancellation(
        &self,
        initial_prompt: &str,
        cancel: &CancellationToken,
    ) -> CollaborationResult {
        let mut state = CollaborationState::new();
        let mut message = initial_prompt.to_string();

        info!(
            initiator = %self.agents[0].identity(),
            responder = %self.agents[1].identity(),
            max_iterations = self.max_iterations,
            "Collaboration started"
        );

        while state.iteration_count < self.max_iterations {
            if cancel.is_cancelled() {
                info!(turns = state.transcript.len(), "Collaboration cancelled");
                state.terminate(Outcome::Cancelled);
                return CollaborationResult::from_state(state);
            }

            let speaker = &self.agents[state.current_speaker_index()];
            let other = &self.agents[state.current_speaker.other().index()];

            let output = match speaker
                .process_message(&message, Some(other.identity()))
                .await
            {
                Ok(output) => output,
                Err(e) => {
                    warn!(agent = %speaker.identity(), error = %e, "Collaboration failed");
                    state.terminate(Outcome::Failed(e));
                    return CollaborationResult::from_state(state);
                }
            };

            state.transcript.push(Turn {
                speaker: speaker.identity().clone(),
                recipient: Some(other.identity().clone()),
                input_message: message,
                output_message: output.clone(),
                sequence_number: state.iteration_count,
                timestamp: Utc::now(),
            });

            if self.policy.is_conclusive(&output) {
                info!(agent = %speaker.identity(), turns = state.transcript.len(), "Conclusion reached");
                state.terminate(Outcome::Concluded);
                return CollaborationResult::from_state(state);
            }

            state.current_speaker = state.current_speaker.other();
            message = output;
            state.iteration_count += 1;
        }

        info!(turns = state.transcript.len(), "Iteration cap reached");
        state.terminate(Outcome::Exhausted);
        CollaborationResult::from_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ModelSettings;
    use crate::persona;
    use crate::test_helpers::{SequentialMockProvider, make_text_response};
    use boardroom_core::event::EventSink;
    use boardroom_core::provider::Provider;
    use boardroom_telemetry::RecordingSink;
    use std::sync::Arc;

    fn pair(provider: Arc<dyn Provider>, sink: Arc<dyn EventSink>) -> CollaborationLoop {
        let settings = ModelSettings::new("mock-model");
        let po = Agent::new(
            persona::product_owner(),
            AgentRole::Initiator,
            provider.clone(),
            settings.clone(),
            sink.clone(),
        );
        let cto = Agent::new(persona::cto(), AgentRole::Responder, provider, settings, sink);
        CollaborationLoop::new(po, cto)
    }

    #[tokio::test]
    async fn exhausted_after_cap() {
        let provider = Arc::new(SequentialMockProvider::always("I suggest X."));
        let collab = pair(provider.clone(), Arc::new(RecordingSink::new())).with_max_iterations(3);

        let result = collab.start_collaboration("Design a caching layer").await;

        assert_eq!(result.outcome, Outcome::Exhausted);
        assert_eq!(result.transcript.len(), 3);
        assert_eq!(provider.call_count(), 3);

        let speakers: Vec<_> = result.transcript.iter().map(|t| t.speaker.name.as_str()).collect();
        assert_eq!(speakers, vec!["Product Owner", "CTO", "Product Owner"]);
        assert_eq!(result.transcript[0].input_message, "Design a caching layer");
        assert_eq!(result.transcript[1].input_message, "I suggest X.");
        assert_eq!(result.transcript[0].recipient.as_ref().unwrap().name, "CTO");
    }

    #[tokio::test]
    async fn concluded_on_second_turn() {
        let provider = Arc::new(SequentialMockProvider::texts(&[
            "Let's explore options.",
            "We reached consensus reached on X.",
        ]));
        let collab = pair(provider.clone(), Arc::new(RecordingSink::new()));

        let result = collab.start_collaboration("Design a caching layer").await;

        assert_eq!(result.outcome, Outcome::Concluded);
        assert_eq!(result.transcript.len(), 2);
        assert_eq!(result.final_message(), Some("We reached consensus reached on X."));
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn concluded_on_last_allowed_turn() {
        let provider = Arc::new(SequentialMockProvider::texts(&["a", "b", "final solution: b"]));
        let collab = pair(provider, Arc::new(RecordingSink::new())).with_max_iterations(3);

        let result = collab.start_collaboration("go").await;
        assert_eq!(result.outcome, Outcome::Concluded);
        assert_eq!(result.transcript.len(), 3);
    }

    #[tokio::test]
    async fn failure_on_first_turn() {
        let err = ProviderError::Network("connection refused".into());
        let provider = Arc::new(SequentialMockProvider::new(vec![Err(err.clone())]));
        let collab = pair(provider, Arc::new(RecordingSink::new()));

        let result = collab.start_collaboration("Design a caching layer").await;

        assert!(result.transcript.is_empty());
        assert_eq!(result.outcome, Outcome::Failed(err.clone()));
        assert!(!result.outcome.is_success());
        match result.into_result() {
            Err(Error::Provider(e)) => assert_eq!(e, err),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_keeps_partial_transcript() {
        let provider = Arc::new(SequentialMockProvider::new(vec![
            Ok(make_text_response("first")),
            Err(ProviderError::Timeout("120s".into())),
        ]));
        let collab = pair(provider, Arc::new(RecordingSink::new()));

        let result = collab.start_collaboration("go").await;
        assert_eq!(result.transcript.len(), 1);
        assert!(matches!(result.outcome, Outcome::Failed(ProviderError::Timeout(_))));
    }

    #[tokio::test]
    async fn cancelled_before_first_turn() {
        let provider = Arc::new(SequentialMockProvider::always("I suggest X."));
        let collab = pair(provider.clone(), Arc::new(RecordingSink::new()));
        let token = CancellationToken::new();
        token.cancel();

        let result = collab.start_with_cancellation("go", &token).await;

        assert_eq!(result.outcome, Outcome::Cancelled);
        assert!(result.transcript.is_empty());
        assert_eq!(provider.call_count(), 0);
        assert!(matches!(result.into_result(), Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn cancelled_mid_run_keeps_transcript() {
        let token = CancellationToken::new();
        let provider = Arc::new(
            SequentialMockProvider::always("I suggest X.").cancelling_on_call(1, token.clone()),
        );
        let collab = pair(provider.clone(), Arc::new(RecordingSink::new()));

        let result = collab.start_with_cancellation("Design a caching layer", &token).await;

        assert_eq!(result.outcome, Outcome::Cancelled);
        assert_eq!(result.transcript.len(), 1);
        assert_eq!(result.transcript[0].speaker.name, "Product Owner");
        assert_eq!(result.final_message(), Some("I suggest X."));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn zero_iterations_is_exhausted_without_calls() {
        let provider = Arc::new(SequentialMockProvider::always("x"));
        let collab = pair(provider.clone(), Arc::new(RecordingSink::new())).with_max_iterations(0);

        let result = collab.start_collaboration("go").await;
        assert_eq!(result.outcome, Outcome::Exhausted);
        assert!(result.transcript.is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn sequence_numbers_contiguous() {
        let provider = Arc::new(SequentialMockProvider::always("keep going"));
        let collab = pair(provider, Arc::new(RecordingSink::new())).with_max_iterations(5);

        let result = collab.start_collaboration("go").await;
        let seq: Vec<u32> = result.transcript.iter().map(|t| t.sequence_number).collect();
        assert_eq!(seq, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn each_prompt_frames_previous_speaker() {
        let provider = Arc::new(SequentialMockProvider::texts(&["PO view", "CTO view"]));
        let collab = pair(provider.clone(), Arc::new(RecordingSink::new())).with_max_iterations(2);

        collab.start_collaboration("Design a caching layer").await;

        let prompts = provider.prompts();
        assert!(prompts[0].contains("Message from CTO:\nDesign a caching layer"));
        assert!(prompts[1].contains("Message from Product Owner:\nPO view"));
    }

    #[tokio::test]
    async fn fresh_state_per_run() {
        let provider = Arc::new(SequentialMockProvider::always("I suggest X."));
        let collab = pair(provider, Arc::new(RecordingSink::new())).with_max_iterations(2);

        let first = collab.start_collaboration("a").await;
        let second = collab.start_collaboration("b").await;
        assert_eq!(first.transcript.len(), 2);
        assert_eq!(second.transcript.len(), 2);
        assert_eq!(second.transcript[0].input_message, "b");
    }

    #[tokio::test]
    async fn events_cover_both_agents() {
        let sink = Arc::new(RecordingSink::new());
        let provider = Arc::new(SequentialMockProvider::always("I suggest X."));
        let collab = pair(provider, sink.clone()).with_max_iterations(2);

        collab.start_collaboration("go").await;

        let agents: Vec<_> = sink.communications().into_iter().map(|(a, _, _)| a).collect();
        assert_eq!(agents, vec!["Product Owner", "Product Owner", "CTO", "CTO"]);
    }

    struct Never;

    impl TerminationPolicy for Never {
        fn is_conclusive(&self, _text: &str) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn custom_policy() {
        let provider = Arc::new(SequentialMockProvider::always("final solution"));
        let collab = pair(provider, Arc::new(RecordingSink::new()))
            .with_max_iterations(2)
            .with_policy(Box::new(Never));

        let result = collab.start_collaboration("go").await;
        assert_eq!(result.outcome, Outcome::Exhausted);
    }
}
