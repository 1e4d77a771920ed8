use std::sync::Mutex;

use chatterbox::application::ports::{LlmClient, LlmClientError};
use chatterbox::domain::Message;

/// Completion client that records every prompt and answers with a fixed reply.
pub struct MockLlmClient {
    reply: Option<String>,
    prompts: Mutex<Vec<Vec<Message>>>,
}

impl MockLlmClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<Vec<Message>> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmClientError> {
        self.prompts.lock().unwrap().push(messages.to_vec());
        self.reply
            .clone()
            .ok_or_else(|| LlmClientError::ApiRequestFailed("HTTP 401: unauthorized".to_string()))
    }
}
