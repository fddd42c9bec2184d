//! End-to-end tests for a Boardroom collaboration.
//!
//! These exercise the full pipeline from the caller's prompt to the final
//! transcript: knowledge loading, role prompts, prompt composition, the
//! turn loop and event logging. The LLM is a scripted stub.

use std::path::Path;
use std::sync::{Arc, Mutex};

use boardroom_agent::persona;
use boardroom_agent::{Agent, CollaborationLoop, ModelSettings, Outcome};
use boardroom_config::AppConfig;
use boardroom_core::error::{Error, ProviderError};
use boardroom_core::event::{AgentEvent, Direction, EventSink};
use boardroom_core::identity::AgentRole;
use boardroom_core::knowledge::KnowledgeStore;
use boardroom_core::message::Message;
use boardroom_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use boardroom_knowledge::SubstringStore;
use boardroom_telemetry::{FanoutSink, JsonlSink, RecordingSink};

// ── Mock Provider ────────────────────────────────────────────────────────

/// Returns scripted results in sequence and records every prompt.
struct ScriptedProvider {
    responses: Mutex<Vec<Result<ProviderResponse, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(text_response(t))).collect())
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let prompt = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            panic!("ScriptedProvider exhausted");
        }
        responses.remove(0)
    }
}

fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock".into(),
    }
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

async fn agent_for(
    base: &Path,
    preset: boardroom_core::identity::AgentIdentity,
    role: AgentRole,
    provider: Arc<dyn Provider>,
    sink: Arc<dyn EventSink>,
) -> Agent {
    let store = SubstringStore::new(base, preset.slug()).with_sink(sink.clone());
    store.load_directory().await.unwrap();
    let identity = match store.get("role_markdown").await {
        Some(doc) => persona::with_role_document(&preset, &doc.content),
        None => preset,
    };
    Agent::new(identity, role, provider, ModelSettings::new("mock"), sink)
        .with_knowledge(Box::new(store))
}

// ── E2E: knowledge-grounded collaboration ────────────────────────────────

#[tokio::test]
async fn e2e_grounded_collaboration_concludes() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path();

    write(
        &base.join("product_owner/knowledge_base/documents/role.md"),
        "# Product Owner\nOwns the roadmap.",
    );
    write(
        &base.join("product_owner/knowledge_base/documents/market.txt"),
        "Q3 goal: design a caching layer customers trust at peak.",
    );
    write(
        &base.join("cto/knowledge_base/documents/stack.csv"),
        "component,choice\ncaching layer,Redis cluster",
    );

    let provider = Arc::new(ScriptedProvider::texts(&[
        "  We need a faster caching layer for peak traffic.  ",
        "The best approach is a Redis cluster with write-through.",
    ]));
    let recorder = Arc::new(RecordingSink::new());
    let log_path = base.join("logs/events.jsonl");
    let sink: Arc<dyn EventSink> = Arc::new(
        FanoutSink::new()
            .with(recorder.clone())
            .with(Arc::new(JsonlSink::open(&log_path).unwrap())),
    );

    let po = agent_for(base, persona::product_owner(), AgentRole::Initiator, provider.clone(), sink.clone()).await;
    let cto = agent_for(base, persona::cto(), AgentRole::Responder, provider.clone(), sink).await;
    let collab = CollaborationLoop::new(po, cto);

    let result = collab.start_collaboration("Design a caching layer").await;

    assert_eq!(result.outcome, Outcome::Concluded);
    assert_eq!(result.transcript.len(), 2);
    assert_eq!(
        result.transcript[0].output_message,
        "We need a faster caching layer for peak traffic."
    );
    assert_eq!(result.transcript[1].speaker.name, "CTO");

    let prompts = provider.prompts();
    // Product Owner: role.md prompt plus the market note containing the request
    assert!(prompts[0].starts_with("You are an AI agent acting as a Product Owner."));
    assert!(prompts[0].contains("Message from CTO:\nDesign a caching layer"));
    assert!(prompts[0].contains("- Q3 goal: design a caching layer customers trust at peak.\n"));
    // CTO: preset prompt; no stored document contains the whole message
    assert!(prompts[1].starts_with("You are a CTO 🎮"));
    assert!(prompts[1].contains("Message from Product Owner:\nWe need a faster caching layer"));
    assert!(!prompts[1].contains("Relevant knowledge"));

    // 2 turns × (inbound + outbound)
    let comms = recorder.communications();
    assert_eq!(comms.len(), 4);
    assert_eq!(comms[1].1, Direction::Outbound);

    let operations = recorder
        .events()
        .into_iter()
        .filter(|e| matches!(e, AgentEvent::Operation { .. }))
        .count();
    assert_eq!(operations, 3);

    let logged = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(logged.lines().count(), recorder.len());

    assert!(base.join("cto/knowledge_base/processed/stack_spreadsheet.json").exists());
}

// ── E2E: config-driven iteration cap ─────────────────────────────────────

#[tokio::test]
async fn e2e_config_cap_exhausts() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = tmp.path().join("boardroom.toml");
    std::fs::write(
        &config_path,
        "[llm]\nmodel = \"mock\"\n\n[collaboration]\nmax_iterations = 3\n",
    )
    .unwrap();
    let config = AppConfig::load_from(&config_path).unwrap();

    let provider: Arc<dyn Provider> = Arc::new(ScriptedProvider::texts(&[
        "I suggest X.",
        "I suggest X.",
        "I suggest X.",
    ]));
    let sink: Arc<dyn EventSink> = Arc::new(RecordingSink::new());
    let settings = ModelSettings::from_config(&config.llm);

    let po = Agent::new(persona::product_owner(), AgentRole::Initiator, provider.clone(), settings.clone(), sink.clone());
    let cto = Agent::new(persona::cto(), AgentRole::Responder, provider, settings, sink);
    let collab = CollaborationLoop::new(po, cto).with_config(&config.collaboration);

    let result = collab.start_collaboration("Design a caching layer").await;

    assert_eq!(result.outcome, Outcome::Exhausted);
    let seq: Vec<u32> = result.transcript.iter().map(|t| t.sequence_number).collect();
    assert_eq!(seq, vec![0, 1, 2]);
    assert!(result.into_result().is_ok());
}

// ── E2E: provider outage ─────────────────────────────────────────────────

#[tokio::test]
async fn e2e_provider_outage_fails_cleanly() {
    let outage = ProviderError::Network("connection refused".into());
    let provider: Arc<dyn Provider> = Arc::new(ScriptedProvider::new(vec![Err(outage.clone())]));
    let sink: Arc<dyn EventSink> = Arc::new(RecordingSink::new());

    let po = Agent::new(persona::product_owner(), AgentRole::Initiator, provider.clone(), ModelSettings::new("mock"), sink.clone());
    let cto = Agent::new(persona::cto(), AgentRole::Responder, provider, ModelSettings::new("mock"), sink);

    let result = CollaborationLoop::new(po, cto)
        .start_collaboration("Design a caching layer")
        .await;

    assert!(result.transcript.is_empty());
    assert_eq!(result.outcome, Outcome::Failed(outage.clone()));
    match result.into_result() {
        Err(Error::Provider(e)) => assert_eq!(e, outage),
        other => panic!("unexpected: {other:?}"),
    }
}

// ── E2E: warm restart from processed records ─────────────────────────────

#[tokio::test]
async fn e2e_processed_records_survive_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("cto/knowledge_base/documents/adr-001.md");
    write(&source, "# ADR 001\nUse Postgres for the ledger.");

    let first = SubstringStore::new(tmp.path(), "cto");
    first
        .load(&source, boardroom_core::document::DocType::Markdown)
        .await
        .unwrap();
    std::fs::remove_file(&source).unwrap();

    let second = SubstringStore::new(tmp.path(), "cto");
    assert_eq!(second.restore_processed().await.unwrap(), 1);
    let hits = second.query("postgres").await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id(), "adr-001_markdown");
}
