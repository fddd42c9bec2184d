//! Subcommand implementations.

pub mod collaborate;
pub mod doctor;
pub mod knowledge;
pub mod onboard;
pub mod status;

use std::process::ExitCode;
use std::sync::Arc;

use boardroom_agent::persona;
use boardroom_config::AppConfig;
use boardroom_core::event::EventSink;
use boardroom_core::identity::AgentIdentity;
use boardroom_core::knowledge::KnowledgeStore;
use boardroom_knowledge::SubstringStore;
use tracing::{debug, warn};

pub type CmdResult = Result<ExitCode, Box<dyn std::error::Error>>;

/// The two seats, initiator first.
pub fn personas() -> [AgentIdentity; 2] {
    [persona::product_owner(), persona::cto()]
}

/// Open an agent's store and warm it from `processed/`.
pub async fn open_store(
    config: &AppConfig,
    agent_id: &str,
    sink: Arc<dyn EventSink>,
) -> Result<SubstringStore, Box<dyn std::error::Error>> {
    let store = SubstringStore::new(&config.knowledge.base_dir, agent_id).with_sink(sink);
    store.layout().ensure_dirs().await?;
    let restored = store.restore_processed().await?;
    debug!(agent = agent_id, restored, "Knowledge store opened");
    Ok(store)
}

/// Prefer a prompt built from the agent's `role.md` when one is loaded.
pub async fn identity_for(preset: &AgentIdentity, store: &SubstringStore) -> AgentIdentity {
    if let Some(doc) = store.get("role_markdown").await {
        return persona::with_role_document(preset, &doc.content);
    }

    match tokio::fs::read_to_string(store.layout().role_document()).await {
        Ok(content) => persona::with_role_document(preset, &content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => preset.clone(),
        Err(e) => {
            warn!(agent = %preset, error = %e, "Unreadable role document, using preset prompt");
            preset.clone()
        }
    }
}

/// Print a titled box around `body`.
pub fn print_panel(title: &str, body: &str) {
    println!("╭─ {title} {}", "─".repeat(60usize.saturating_sub(title.chars().count())));
    for line in body.lines() {
        println!("│ {line}");
    }
    println!("╰{}", "─".repeat(64));
}
