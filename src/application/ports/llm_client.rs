use async_trait::async_trait;

use crate::domain::Message;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends the full ordered history and returns the text of a single completion.
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
