//! `boardroom onboard` — First-time setup.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use boardroom_config::AppConfig;
use boardroom_knowledge::KnowledgeLayout;

use super::{CmdResult, personas};

const PRODUCT_OWNER_ROLE: &str = concat!(
    "# Product Owner\n\n",
    "## Responsibilities\n",
    "- Own the product vision and prioritize the backlog\n",
    "- Represent users and business stakeholders\n\n",
    "## Decision-making framework\n",
    "- Weigh user value, ROI and time to market\n\n",
    "## Communication style\n",
    "- Brief, concrete, outcome-focused\n",
);

const CTO_ROLE: &str = concat!(
    "# CTO\n\n",
    "## Responsibilities\n",
    "- Own system architecture, security and scalability\n",
    "- Keep technical debt in balance with delivery\n\n",
    "## Decision-making framework\n",
    "- Prefer proven technology; justify trade-offs explicitly\n\n",
    "## Communication style\n",
    "- Detailed, with diagrams or pseudocode where useful\n",
);

pub async fn run(knowledge_base: Option<PathBuf>) -> CmdResult {
    let config_dir = AppConfig::config_dir();
    let config_path = AppConfig::config_path();
    let base_dir = knowledge_base.unwrap_or_else(|| PathBuf::from("agents"));

    println!("🏛  Boardroom — First-Time Setup");
    println!("================================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    for (identity, role) in personas().into_iter().zip([PRODUCT_OWNER_ROLE, CTO_ROLE]) {
        let layout = KnowledgeLayout::new(&base_dir, &identity.slug());
        layout.ensure_dirs().await?;
        println!("✅ Knowledge base for {identity}: {}", layout.root().display());
        write_if_missing(&layout.role_document(), role)?;
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Start Ollama and run `ollama pull llama3.3:latest`");
        println!("      (or set provider = \"anthropic\" and ANTHROPIC_API_KEY)");
        println!("   2. Add documents under {}/<agent>/knowledge_base/documents/", base_dir.display());
        println!("   3. Run: boardroom doctor\n");
    }

    println!("🎉 Setup complete! Run `boardroom collaborate --prompt \"...\"` to start.\n");

    Ok(ExitCode::SUCCESS)
}

fn write_if_missing(path: &Path, content: &str) -> std::io::Result<()> {
    if path.exists() {
        println!("   role.md exists: {}", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("   ✅ Created {}", path.display());
    }
    Ok(())
}
