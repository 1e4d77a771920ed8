use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{Message, MessageRole};
use crate::presentation::config::{LlmProvider, LlmSettings};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for OpenAI-style `/chat/completions` endpoints (OpenAI, Azure
/// OpenAI deployments and compatible local servers).
pub struct ChatCompletionsClient {
    client: Client,
    provider: LlmProvider,
    url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: MessageRole,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.provider {
            LlmProvider::Azure => request.header("api-key", &self.api_key),
            LlmProvider::OpenAi | LlmProvider::Compatible => {
                request.header("Authorization", format!("Bearer {}", self.api_key))
            }
        }
    }
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    #[tracing::instrument(skip(self, messages), fields(messages = messages.len()))]
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmClientError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role,
                    content: &m.content,
                })
                .collect(),
        };

        let request = self.client.post(&self.url).json(&request_body);
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Completion API rate limited the request");
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        completion_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))?
            .message
            .content
            .ok_or_else(|| LlmClientError::InvalidResponse("missing message content".to_string()))
    }
}

pub fn create_chat_completions_client(
    settings: &LlmSettings,
) -> Result<ChatCompletionsClient, LlmClientError> {
    let url = match settings.provider {
        LlmProvider::OpenAi => {
            let base_url = settings.base_url.as_deref().unwrap_or(OPENAI_BASE_URL);
            format!("{}/chat/completions", base_url.trim_end_matches('/'))
        }
        LlmProvider::Compatible => {
            let base_url = settings.base_url.as_deref().ok_or_else(|| {
                LlmClientError::InvalidConfiguration(
                    "base_url required for compatible provider".to_string(),
                )
            })?;
            format!("{}/chat/completions", base_url.trim_end_matches('/'))
        }
        LlmProvider::Azure => {
            let endpoint = settings.azure_endpoint.as_deref().ok_or_else(|| {
                LlmClientError::InvalidConfiguration(
                    "azure_endpoint required for azure provider".to_string(),
                )
            })?;
            format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                endpoint.trim_end_matches('/'),
                settings.chat_model,
                settings.api_version
            )
        }
    };

    let mut builder = Client::builder();
    if let Some(seconds) = settings.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    let client = builder
        .build()
        .map_err(|e| LlmClientError::InvalidConfiguration(e.to_string()))?;

    tracing::debug!(provider = ?settings.provider, url = %url, "Chat completions client configured");

    Ok(ChatCompletionsClient {
        client,
        provider: settings.provider,
        url,
        api_key: settings.api_key.clone(),
        model: settings.chat_model.clone(),
    })
}
