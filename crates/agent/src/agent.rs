//! A single boardroom agent: identity, knowledge and a model to think with.

use std::sync::Arc;

use boardroom_config::LlmConfig;
use boardroom_core::error::ProviderError;
use boardroom_core::event::{AgentEvent, Direction, EventSink};
use boardroom_core::identity::{AgentIdentity, AgentRole};
use boardroom_core::knowledge::KnowledgeStore;
use boardroom_core::provider::{Provider, ProviderRequest};
use tracing::{debug, info, warn};

use crate::prompt::compose_prompt;

/// Per-request model parameters shared by both agents.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub context_window: Option<u32>,
    pub max_tokens: Option<u32>,
}

impl ModelSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.7,
            context_window: None,
            max_tokens: None,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            context_window: Some(config.context_window),
            max_tokens: Some(config.max_tokens),
        }
    }

    fn request(&self, prompt: String) -> ProviderRequest {
        let mut request = ProviderRequest::prompt(&self.model, prompt);
        request.temperature = self.temperature;
        request.context_window = self.context_window;
        request.max_tokens = self.max_tokens;
        request
    }
}

/// One participant in a collaboration.
pub struct Agent {
    identity: AgentIdentity,
    role: AgentRole,
    system_prompt: String,
    knowledge: Option<Box<dyn KnowledgeStore>>,
    provider: Arc<dyn Provider>,
    settings: ModelSettings,
    sink: Arc<dyn EventSink>,
}

impl Agent {
    pub fn new(
        identity: AgentIdentity,
        role: AgentRole,
        provider: Arc<dyn Provider>,
        settings: ModelSettings,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let system_prompt = identity.system_prompt();
        Self {
            identity,
            role,
            system_prompt,
            knowledge: None,
            provider,
            settings,
            sink,
        }
    }

    /// Attach the agent's knowledge store.
    pub fn with_knowledge(mut self, store: Box<dyn KnowledgeStore>) -> Self {
        self.knowledge = Some(store);
        self
    }

    pub fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    /// The rendered system prompt.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn knowledge(&self) -> Option<&dyn KnowledgeStore> {
        self.knowledge.as_deref()
    }

    /// Answer `message`, optionally sent by another agent.
    ///
    /// Knowledge matching the message verbatim is injected into the prompt.
    /// The response is trimmed. Provider failures are returned unchanged and
    /// never retried.
    pub async fn process_message(
        &self,
        message: &str,
        from: Option<&AgentIdentity>,
    ) -> Result<String, ProviderError> {
        let sender = from.map(|f| f.name.as_str());
        self.sink.record(AgentEvent::communication(
            &self.identity.name,
            Direction::Inbound,
            sender,
            message,
        ));

        let knowledge = match &self.knowledge {
            Some(store) => store.query(message).await,
            None => Vec::new(),
        };
        if !knowledge.is_empty() {
            debug!(agent = %self.identity, documents = knowledge.len(), "Injecting knowledge");
        }

        let prompt = compose_prompt(&self.system_prompt, message, sender, &knowledge);
        let request = self.settings.request(prompt);

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(agent = %self.identity, provider = self.provider.name(), error = %e, "Completion failed");
                return Err(e);
            }
        };

        if let Some(usage) = &response.usage {
            debug!(
                agent = %self.identity,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion usage"
            );
        }

        let text = response.message.content.trim().to_string();
        info!(agent = %self.identity, chars = text.len(), "Agent responded");
        self.sink.record(AgentEvent::communication(
            &self.identity.name,
            Direction::Outbound,
            sender,
            text.as_str(),
        ));

        Ok(text)
    }
}
