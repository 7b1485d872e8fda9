use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::UpstageConfig;
use crate::chat::{ChatMessage, ChatProvider, ChatRequest};
use crate::error::{AgentError, AgentResult};

/// Upstage chat-completion client (OpenAI-compatible `/chat/completions`).
pub struct UpstageChatClient {
    client: Client,
    config: UpstageConfig,
}

impl UpstageChatClient {
    pub fn new(config: UpstageConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> AgentResult<Self> {
        Ok(Self::new(UpstageConfig::from_env()?))
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

#[async_trait]
impl ChatProvider for UpstageChatClient {
    async fn complete(&self, request: ChatRequest) -> AgentResult<String> {
        let payload = CompletionRequest {
            model: &self.config.chat_model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| AgentError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::Generation(format!(
                "Upstage API error ({}): {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Generation(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AgentError::Generation("No completion returned".to_string()))
    }
}
