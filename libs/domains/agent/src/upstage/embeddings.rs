use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::UpstageConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{AgentError, AgentResult};

/// Upstage embeddings provider (OpenAI-compatible `/embeddings` endpoint).
pub struct UpstageEmbeddings {
    client: Client,
    config: UpstageConfig,
}

impl UpstageEmbeddings {
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
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[async_trait]
impl EmbeddingProvider for UpstageEmbeddings {
    async fn embed(&self, text: &str) -> AgentResult<Vec<f32>> {
        let results = self.embed_batch(&[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Embedding("No embedding returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> AgentResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let request = EmbeddingRequest {
            model: self.config.embedding_model.clone(),
            input: texts.to_vec(),
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::Embedding(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::Embedding(format!(
                "Upstage API error ({}): {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Embedding(e.to_string()))?;

        // Sort by index to maintain input order
        let mut data = embedding_response.data;
        data.sort_by_key(|d| d.index);

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> UpstageEmbeddings {
        UpstageEmbeddings::new(
            UpstageConfig::new("sk-test".to_string()).with_base_url(server.uri()),
        )
    }

    #[tokio::test]
    async fn test_embed_batch_preserves_input_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(
                json!({"model": "solar-embedding-1-large-query"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                // Out of order on purpose
                "data": [
                    {"embedding": [0.2, 0.2], "index": 1},
                    {"embedding": [0.1, 0.1], "index": 0}
                ]
            })))
            .mount(&server)
            .await;

        let embeddings = provider_for(&server)
            .embed_batch(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();

        assert_eq!(embeddings, vec![vec![0.1, 0.1], vec![0.2, 0.2]]);
    }

    #[tokio::test]
    async fn test_embed_unwraps_single_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"embedding": [0.5, 0.5], "index": 0}]
            })))
            .mount(&server)
            .await;

        let embedding = provider_for(&server).embed("query").await.unwrap();
        assert_eq!(embedding, vec![0.5, 0.5]);
    }

    #[tokio::test]
    async fn test_embed_batch_empty_input_skips_request() {
        let server = MockServer::start().await;
        // No mock mounted; a request would fail the test.
        let embeddings = provider_for(&server).embed_batch(&[]).await.unwrap();
        assert!(embeddings.is_empty());
    }

    #[tokio::test]
    async fn test_embed_surfaces_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let err = provider_for(&server).embed("query").await.unwrap_err();
        assert!(matches!(err, AgentError::Embedding(_)));
        assert!(err.to_string().contains("401"));
    }
}
