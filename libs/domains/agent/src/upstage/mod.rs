//! Upstage API clients (OpenAI-compatible embeddings and chat completions).

pub mod chat;
pub mod embeddings;

pub use chat::UpstageChatClient;
pub use embeddings::UpstageEmbeddings;

use core_config::{env_or_default, env_required};

use crate::error::AgentResult;

/// Upstage API configuration, shared by the embedding and chat clients.
#[derive(Debug, Clone)]
pub struct UpstageConfig {
    pub api_key: String,
    pub base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
}

impl UpstageConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.upstage.ai/v1".to_string(),
            embedding_model: "solar-embedding-1-large-query".to_string(),
            chat_model: "solar-1-mini-chat".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Load from environment. The API key is required; the service must not
    /// start without it.
    pub fn from_env() -> AgentResult<Self> {
        let api_key = env_required("UPSTAGE_API_KEY")?;
        let base_url = env_or_default("UPSTAGE_BASE_URL", "https://api.upstage.ai/v1");
        let embedding_model =
            env_or_default("UPSTAGE_EMBEDDING_MODEL", "solar-embedding-1-large-query");
        let chat_model = env_or_default("UPSTAGE_CHAT_MODEL", "solar-1-mini-chat");

        Ok(Self {
            api_key,
            base_url,
            embedding_model,
            chat_model,
        })
    }
}
