//! `boardroom collaborate` — run a two-agent collaboration on a prompt.

use std::process::ExitCode;
use std::sync::Arc;

use boardroom_agent::{Agent, CollaborationLoop, CollaborationResult, ModelSettings, Outcome};
use boardroom_config::AppConfig;
use boardroom_core::event::{AgentEvent, Direction, EventBus, EventSink};
use boardroom_core::identity::AgentRole;
use boardroom_knowledge::SubstringStore;
use boardroom_providers::build_from_config;
use boardroom_telemetry::{FanoutSink, JsonlSink, TracingSink};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::{CmdResult, identity_for, open_store, personas, print_panel};

/// Exit code for a run that stopped because the LLM was unavailable.
const EXIT_FAILED: u8 = 2;
/// Conventional exit code for SIGINT.
const EXIT_CANCELLED: u8 = 130;

pub struct Options {
    pub prompt: String,
    pub max_iterations: Option<u32>,
    pub load_knowledge: bool,
    pub json: bool,
}

pub async fn run(config: &AppConfig, options: Options) -> CmdResult {
    let provider = build_from_config(&config.llm)?;
    let settings = ModelSettings::from_config(&config.llm);

    let bus = Arc::new(EventBus::default());
    let mut fanout = FanoutSink::new().with(bus.clone());
    // Panels already show the conversation on stdout
    if options.json {
        fanout = fanout.with(Arc::new(TracingSink));
    }
    if let Some(path) = &config.logging.event_log {
        match JsonlSink::open(path) {
            Ok(sink) => fanout = fanout.with(Arc::new(sink)),
            Err(e) => warn!(error = %e, "Event log disabled"),
        }
    }
    let sink: Arc<dyn EventSink> = Arc::new(fanout);

    let [po, cto] = personas();
    let mut agents = Vec::with_capacity(2);
    for (preset, role) in [(po, AgentRole::Initiator), (cto, AgentRole::Responder)] {
        let store = open_store(config, &preset.slug(), sink.clone()).await?;
        if options.load_knowledge && config.knowledge.load_on_start {
            store.load_directory().await?;
        }
        let identity = identity_for(&preset, &store).await;
        let agent = Agent::new(identity, role, provider.clone(), settings.clone(), sink.clone());
        agents.push(attach(agent, store, options.load_knowledge));
    }
    let responder = agents.pop().ok_or("responder missing")?;
    let initiator = agents.pop().ok_or("initiator missing")?;

    let mut collab = CollaborationLoop::new(initiator, responder).with_config(&config.collaboration);
    if let Some(max) = options.max_iterations {
        collab = collab.with_max_iterations(max);
    }

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\n⏹  Stopping after the current turn...");
                cancel.cancel();
            }
        })
    };

    let done = CancellationToken::new();
    let renderer = (!options.json).then(|| spawn_renderer(&bus, done.clone()));

    if !options.json {
        print_panel("🎯 Request", &options.prompt);
    }
    info!(provider = provider.name(), model = %settings.model, "Starting collaboration");

    let result = collab
        .start_with_cancellation(&options.prompt, &cancel)
        .await;

    done.cancel();
    if let Some(renderer) = renderer {
        let _ = renderer.await;
    }
    ctrl_c.abort();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result.transcript)?);
    }
    report(&result);

    Ok(match result.outcome {
        Outcome::Concluded | Outcome::Exhausted => ExitCode::SUCCESS,
        Outcome::Failed(_) => ExitCode::from(EXIT_FAILED),
        Outcome::Cancelled => ExitCode::from(EXIT_CANCELLED),
    })
}

fn attach(agent: Agent, store: SubstringStore, enabled: bool) -> Agent {
    if enabled {
        agent.with_knowledge(Box::new(store))
    } else {
        agent
    }
}

/// Print each agent response as it arrives.
fn spawn_renderer(bus: &EventBus, done: CancellationToken) -> tokio::task::JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                event = rx.recv() => event,
                _ = done.cancelled() => {
                    // Drain whatever the last turn published
                    while let Ok(event) = rx.try_recv() {
                        render(&event);
                    }
                    break;
                }
            };
            match event {
                Ok(event) => render(&event),
                Err(RecvError::Lagged(n)) => warn!(skipped = n, "Renderer lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn render(event: &AgentEvent) {
    if let AgentEvent::Communication {
        agent,
        direction: Direction::Outbound,
        message,
        ..
    } = event
    {
        print_panel(&format!("🤖 {agent}"), message);
    }
}

fn report(result: &CollaborationResult) {
    let turns = result.transcript.len();
    match &result.outcome {
        Outcome::Concluded => println!("\n✅ Conclusion reached after {turns} turn(s)."),
        Outcome::Exhausted => println!("\n⏱  Iteration limit reached after {turns} turn(s)."),
        Outcome::Failed(e) => eprintln!("\n❌ LLM unavailable after {turns} turn(s): {e}"),
        Outcome::Cancelled => eprintln!("\n⏹  Cancelled after {turns} turn(s)."),
    }
}
