//! `boardroom status` — Show the effective configuration.

use std::process::ExitCode;

use boardroom_config::{AppConfig, LOCAL_CONFIG_FILE};

use super::{CmdResult, personas};

pub async fn run(config: &AppConfig) -> CmdResult {
    println!("🏛  Boardroom Status");
    println!("==================");
    println!("  Config dir:      {}", AppConfig::config_dir().display());
    println!("  Provider:        {}", config.llm.provider);
    println!("  Model:           {}", config.llm.model);
    println!("  API URL:         {}", config.llm.resolved_api_url());
    println!(
        "  API key:         {}",
        if config.llm.api_key.is_some() { "set" } else { "not set" }
    );
    println!("  Temperature:     {}", config.llm.temperature);
    println!("  Context window:  {}", config.llm.context_window);
    println!("  Max iterations:  {}", config.collaboration.max_iterations);
    println!("  Knowledge base:  {}", config.knowledge.base_dir.display());
    println!("  Log level:       {}", config.logging.level);
    if let Some(path) = &config.logging.event_log {
        println!("  Event log:       {}", path.display());
    }

    println!("\n  Agents:");
    for identity in personas() {
        println!("    - {identity} ({})", identity.slug());
    }

    if std::path::Path::new(LOCAL_CONFIG_FILE).exists() {
        println!("\n  ✅ Using ./{LOCAL_CONFIG_FILE}");
    } else if AppConfig::config_path().exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `boardroom onboard` first");
    }

    Ok(ExitCode::SUCCESS)
}
