//! Configuration loading, validation, and management for Boardroom.
//!
//! Loads configuration from `./boardroom.toml` (or
//! `~/.boardroom/config.toml`) with environment variable overrides.
//! Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name looked up in the working directory before the global config.
pub const LOCAL_CONFIG_FILE: &str = "boardroom.toml";

/// The root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM backend settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Turn-taking settings
    #[serde(default)]
    pub collaboration: CollaborationConfig,

    /// Knowledge base layout
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which backend serves completions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Local inference endpoint
    #[default]
    Ollama,
    /// Hosted API
    Anthropic,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Ollama => "ollama",
            LlmProvider::Anthropic => "anthropic",
        }
    }

    /// Base URL used when `api_url` is not set.
    pub fn default_api_url(&self) -> &'static str {
        match self {
            LlmProvider::Ollama => "http://localhost:11434",
            LlmProvider::Anthropic => "https://api.anthropic.com",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" | "local" => Ok(LlmProvider::Ollama),
            "anthropic" | "claude" => Ok(LlmProvider::Anthropic),
            other => Err(ConfigError::ValidationError(format!(
                "unknown LLM provider '{other}' (expected 'ollama' or 'anthropic')"
            ))),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,

    #[serde(default = "default_model")]
    pub model: String,

    /// Override the provider's base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Context window in tokens (Ollama `num_ctx`)
    #[serde(default = "default_context_window")]
    pub context_window: u32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout; expiry surfaces as an unavailable model
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "llama3.3:latest".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_context_window() -> u32 {
    4096
}
fn default_max_tokens() -> u32 {
    4096
}
fn default_timeout_secs() -> u64 {
    120
}

impl LlmConfig {
    /// The configured base URL, or the provider default.
    pub fn resolved_api_url(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| self.provider.default_api_url().to_string())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: default_model(),
            api_url: None,
            api_key: None,
            temperature: default_temperature(),
            context_window: default_context_window(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("api_key", &redact(&self.api_key))
            .field("temperature", &self.temperature)
            .field("context_window", &self.context_window)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationConfig {
    /// Hard cap on turns per collaboration
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_max_iterations() -> u32 {
    10
}

impl Default for CollaborationConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Root holding one `<agent>/knowledge_base/` directory per agent
    #[serde(default = "default_knowledge_base_dir")]
    pub base_dir: PathBuf,

    /// Load every file under `documents/` when an agent is built
    #[serde(default = "default_true")]
    pub load_on_start: bool,
}

fn default_knowledge_base_dir() -> PathBuf {
    PathBuf::from("agents")
}
fn default_true() -> bool {
    true
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            base_dir: default_knowledge_base_dir(),
            load_on_start: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json: bool,

    /// Append agent events to this JSONL file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_log: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            event_log: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `./boardroom.toml`, falling back to
    /// `~/.boardroom/config.toml`, then apply environment overrides:
    ///
    /// - `LLM_PROVIDER` — `ollama` or `anthropic`
    /// - `MODEL_NAME`
    /// - `OLLAMA_API_URL` (only when the provider is Ollama)
    /// - `ANTHROPIC_API_KEY`
    /// - `LOG_LEVEL`
    /// - `BOARDROOM_MAX_ITERATIONS`
    pub fn load() -> Result<Self, ConfigError> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        let path = if local.exists() {
            local
        } else {
            Self::config_path()
        };
        Self::load_with_env(&path)
    }

    /// Load a specific file, then apply environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("LLM_PROVIDER") {
            self.llm.provider = provider.parse()?;
        }
        if let Some(model) = lookup("MODEL_NAME") {
            self.llm.model = model;
        }
        if self.llm.provider == LlmProvider::Ollama {
            if let Some(url) = lookup("OLLAMA_API_URL") {
                self.llm.api_url = Some(url);
            }
        }
        if self.llm.api_key.is_none() {
            self.llm.api_key = lookup("ANTHROPIC_API_KEY");
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level.to_ascii_lowercase();
        }
        if let Some(max) = lookup("BOARDROOM_MAX_ITERATIONS") {
            self.collaboration.max_iterations = max.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "BOARDROOM_MAX_ITERATIONS must be a positive integer, got '{max}'"
                ))
            })?;
        }
        Ok(())
    }

    /// Get the global configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".boardroom")
    }

    /// Get the global configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::ValidationError(
                "llm.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.llm.context_window == 0 {
            return Err(ConfigError::ValidationError(
                "llm.context_window must be > 0".into(),
            ));
        }

        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "llm.timeout_secs must be > 0".into(),
            ));
        }

        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::ValidationError("llm.model must not be empty".into()));
        }

        if self.collaboration.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "collaboration.max_iterations must be >= 1".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for the `onboard` command).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
