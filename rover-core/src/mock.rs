use crate::{Llm, LlmRequest, LlmResponse, Result, RoverError};
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// A scripted model for tests: replies with queued responses in order and
/// records every request it receives.
pub struct MockLlm {
    name: String,
    responses: Mutex<VecDeque<Result<LlmResponse>>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, response: LlmResponse) -> Self {
        self.responses.get_mut().push_back(Ok(response));
        self
    }

    pub fn with_error(mut self, error: RoverError) -> Self {
        self.responses.get_mut().push_back(Err(error));
        self
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_content(&self, req: LlmRequest) -> Result<LlmResponse> {
        self.requests.lock().await.push(req);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(RoverError::Model("MockLlm has no scripted response left".into())))
    }
}
