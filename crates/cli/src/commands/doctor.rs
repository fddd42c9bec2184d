//! `boardroom doctor` — Diagnose system health.

use std::process::ExitCode;

use boardroom_config::{AppConfig, ConfigError, LlmProvider};
use boardroom_knowledge::KnowledgeLayout;
use boardroom_providers::build_from_config;

use super::{CmdResult, personas};

pub async fn run(config: Result<AppConfig, ConfigError>) -> CmdResult {
    println!("🩺 Boardroom Doctor — System Diagnostics");
    println!("========================================\n");

    let mut issues = 0;

    let config = match config {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  Fix the config before running further checks.");
            return Ok(ExitCode::FAILURE);
        }
    };

    // Knowledge layout
    for identity in personas() {
        let layout = KnowledgeLayout::new(&config.knowledge.base_dir, &identity.slug());
        if layout.documents_dir().is_dir() {
            let role = if layout.role_document().exists() {
                "role.md present"
            } else {
                "no role.md, using preset prompt"
            };
            println!("  ✅ {identity} knowledge base: {} ({role})", layout.root().display());
        } else {
            println!(
                "  ⚠️  {identity} knowledge base missing at {} — run `boardroom onboard`",
                layout.root().display()
            );
            issues += 1;
        }
    }

    // LLM connectivity
    match build_from_config(&config.llm) {
        Ok(provider) => match provider.health_check().await {
            Ok(true) => {
                println!(
                    "  ✅ {} reachable at {}",
                    provider.name(),
                    config.llm.resolved_api_url()
                );
                if config.llm.provider == LlmProvider::Ollama {
                    match provider.list_models().await {
                        Ok(models) if models.iter().any(|m| m == &config.llm.model) => {
                            println!("  ✅ Model {} available", config.llm.model);
                        }
                        Ok(_) => {
                            println!(
                                "  ⚠️  Model {} not pulled — run `ollama pull {}`",
                                config.llm.model, config.llm.model
                            );
                            issues += 1;
                        }
                        Err(e) => {
                            println!("  ⚠️  Could not list models: {e}");
                            issues += 1;
                        }
                    }
                }
            }
            Ok(false) => {
                println!("  ❌ {} rejected the health check", provider.name());
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ {} unreachable: {e}", provider.name());
                issues += 1;
            }
        },
        Err(e) => {
            println!("  ❌ LLM provider not usable: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
        Ok(ExitCode::FAILURE)
    }
}
