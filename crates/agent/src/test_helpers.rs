//! Shared test helpers for agent and collaboration tests.

use boardroom_core::error::ProviderError;
use boardroom_core::message::Message;
use boardroom_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

type Scripted = Result<ProviderResponse, ProviderError>;

/// A mock provider that returns a sequence of scripted results.
///
/// Each call to `complete` returns the next result in the queue. Once the
/// queue is empty the `always` response is returned if set; otherwise the
/// call panics.
pub struct SequentialMockProvider {
    responses: Mutex<Vec<Scripted>>,
    always: Option<ProviderResponse>,
    requests: Mutex<Vec<ProviderRequest>>,
    cancel_on: Option<(usize, CancellationToken)>,
}

impl SequentialMockProvider {
    pub fn new(responses: Vec<Scripted>) -> Self {
        Self {
            responses: Mutex::new(responses),
            always: None,
            requests: Mutex::new(Vec::new()),
            cancel_on: None,
        }
    }

    /// Successful text responses, in order.
    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(make_text_response(t))).collect())
    }

    /// The same text for every call.
    pub fn always(text: &str) -> Self {
        Self {
            always: Some(make_text_response(text)),
            ..Self::new(Vec::new())
        }
    }

    /// Cancel `token` while serving call number `call` (1-based).
    pub fn cancelling_on_call(mut self, call: usize, token: CancellationToken) -> Self {
        self.cancel_on = Some((call, token));
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Content of the single user message in the last request.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_request()
            .and_then(|r| r.messages.last().map(|m| m.content.clone()))
    }

    /// Every prompt sent so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| r.messages.last().map(|m| m.content.clone()))
            .collect()
    }
}

#[async_trait::async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };

        if let Some((at, token)) = &self.cancel_on {
            if *at == call {
                token.cancel();
            }
        }

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            return responses.remove(0);
        }
        match &self.always {
            Some(response) => Ok(response.clone()),
            None => panic!("SequentialMockProvider: no more responses (call #{call})"),
        }
    }
}

/// Create a simple text response.
pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}
