//! Boardroom CLI — the main entry point.
//!
//! Commands:
//! - `collaborate` — Run a Product Owner / CTO collaboration on a prompt
//! - `knowledge`   — List, load and query an agent's knowledge base
//! - `onboard`     — Initialize config and agent directories
//! - `status`      — Show the effective configuration
//! - `doctor`      — Diagnose config, knowledge layout and LLM connectivity

use std::path::PathBuf;
use std::process::ExitCode;

use boardroom_config::AppConfig;
use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(
    name = "boardroom",
    about = "Boardroom — a Product Owner and a CTO reasoning through problems together",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ./boardroom.toml or ~/.boardroom/config.toml
    #[arg(short, long, global = true, env = "BOARDROOM_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a collaboration between the Product Owner and the CTO
    Collaborate {
        /// The problem to work on
        #[arg(short, long)]
        prompt: String,

        /// Override collaboration.max_iterations
        #[arg(short = 'n', long)]
        max_iterations: Option<u32>,

        /// Do not load knowledge bases
        #[arg(long)]
        no_knowledge: bool,

        /// Print the transcript as JSON instead of panels
        #[arg(long)]
        json: bool,
    },

    /// Manage an agent's knowledge base
    Knowledge {
        #[command(subcommand)]
        command: commands::knowledge::KnowledgeCommand,
    },

    /// Initialize configuration and agent directories
    Onboard,

    /// Show the effective configuration
    Status,

    /// Diagnose system health
    Doctor,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is the common case
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_with_env(path),
        None => AppConfig::load(),
    };

    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    logging::init(cli.verbose, &logging);

    // Doctor and onboard must work with a broken config
    let result = match cli.command {
        Commands::Onboard => {
            let base_dir = config.ok().map(|c| c.knowledge.base_dir);
            commands::onboard::run(base_dir).await
        }
        Commands::Doctor => commands::doctor::run(config).await,
        command => match config {
            Ok(config) => dispatch(command, config).await,
            Err(e) => Err(format!("Failed to load config: {e}").into()),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(command: Commands, config: AppConfig) -> commands::CmdResult {
    match command {
        Commands::Collaborate {
            prompt,
            max_iterations,
            no_knowledge,
            json,
        } => {
            let options = commands::collaborate::Options {
                prompt,
                max_iterations,
                load_knowledge: !no_knowledge,
                json,
            };
            commands::collaborate::run(&config, options).await
        }
        Commands::Knowledge { command } => commands::knowledge::run(&config, command).await,
        Commands::Status => commands::status::run(&config).await,
        Commands::Onboard | Commands::Doctor => Ok(ExitCode::SUCCESS),
    }
}
