//! `boardroom knowledge` — inspect and populate an agent's knowledge base.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use boardroom_config::AppConfig;
use boardroom_core::document::DocType;
use boardroom_core::knowledge::KnowledgeStore;
use boardroom_telemetry::TracingSink;
use clap::Subcommand;

use super::{CmdResult, open_store};

#[derive(Subcommand)]
pub enum KnowledgeCommand {
    /// List stored document ids
    List {
        /// Agent id, e.g. product_owner or cto
        #[arg(short, long)]
        agent: String,
    },

    /// Load a document (or every file in documents/ when no path is given)
    Load {
        #[arg(short, long)]
        agent: String,

        /// Source file
        path: Option<PathBuf>,

        /// Document type: text, markdown, pdf, spreadsheet (default: from extension)
        #[arg(short = 't', long = "type")]
        doc_type: Option<String>,
    },

    /// Show documents containing the given text
    Query {
        #[arg(short, long)]
        agent: String,

        /// Text to search for (case-insensitive)
        text: String,
    },
}

pub async fn run(config: &AppConfig, command: KnowledgeCommand) -> CmdResult {
    match command {
        KnowledgeCommand::List { agent } => {
            let store = open_store(config, &agent, Arc::new(TracingSink)).await?;
            let ids = store.list().await;
            println!("📚 {} ({} documents)", store.layout().root().display(), ids.len());
            for id in ids {
                println!("  - {id}");
            }
        }
        KnowledgeCommand::Load {
            agent,
            path,
            doc_type,
        } => {
            let store = open_store(config, &agent, Arc::new(TracingSink)).await?;
            match path {
                Some(path) => {
                    let doc_type = match doc_type {
                        Some(t) => t.parse::<DocType>()?,
                        None => DocType::from_path(&path),
                    };
                    let doc = store.load(&path, doc_type).await?;
                    println!("✅ Loaded {} ({} chars)", doc.id(), doc.content.chars().count());
                }
                None => {
                    let docs = store.load_directory().await?;
                    println!(
                        "✅ Loaded {} document(s) from {}",
                        docs.len(),
                        store.layout().documents_dir().display()
                    );
                }
            }
        }
        KnowledgeCommand::Query { agent, text } => {
            let store = open_store(config, &agent, Arc::new(TracingSink)).await?;
            let docs = store.query(&text).await;
            if docs.is_empty() {
                println!("No documents match \"{text}\"");
            }
            for doc in docs {
                println!("── {} ({})", doc.id(), doc.source);
                println!("{}\n", preview(&doc.content, 400));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn preview(content: &str, max_chars: usize) -> String {
    let mut out: String = content.chars().take(max_chars).collect();
    if content.chars().count() > max_chars {
        out.push('…');
    }
    out
}
