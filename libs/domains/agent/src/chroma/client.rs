use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ChromaApi, ChromaConfig, ChromaConnector};
use crate::error::{AgentError, AgentResult};
use crate::models::{CollectionHandle, QueryBatches};

const COLLECTION_DESCRIPTION: &str = "Upstage Solar embeddings collection";

/// ChromaDB HTTP client against the v1 REST API.
pub struct ChromaHttpClient {
    client: Client,
    base_url: String,
}

impl ChromaHttpClient {
    pub fn new(config: &ChromaConfig) -> Self {
        Self::with_base_url(config.base_url())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn check(response: reqwest::Response, what: &str) -> AgentResult<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Chroma(format!(
                "{} failed ({}): {}",
                what, status, body
            )));
        }
        Ok(response)
    }
}

fn transport(err: reqwest::Error) -> AgentError {
    AgentError::Chroma(err.to_string())
}

#[derive(Debug, Deserialize)]
struct HeartbeatResponse {
    #[serde(rename = "nanosecond heartbeat")]
    nanosecond_heartbeat: u64,
}

#[derive(Debug, Serialize)]
struct CreateCollectionRequest<'a> {
    name: &'a str,
    metadata: serde_json::Value,
    get_or_create: bool,
}

#[derive(Debug, Deserialize)]
struct CollectionPayload {
    id: String,
    name: String,
    metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct AddRequest {
    ids: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    documents: Vec<String>,
    metadatas: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct QueryRequest {
    query_embeddings: Vec<Vec<f32>>,
    n_results: usize,
    include: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    ids: Vec<Vec<String>>,
    #[serde(default)]
    documents: Option<Vec<Vec<String>>>,
    #[serde(default)]
    metadatas: Option<Vec<Vec<serde_json::Value>>>,
    #[serde(default)]
    distances: Option<Vec<Vec<f32>>>,
}

#[derive(Debug, Serialize)]
struct DeleteRequest {
    ids: Vec<String>,
}

#[async_trait]
impl ChromaApi for ChromaHttpClient {
    async fn heartbeat(&self) -> AgentResult<u64> {
        let response = self
            .client
            .get(format!("{}/heartbeat", self.base_url))
            .send()
            .await
            .map_err(transport)?;

        let response = Self::check(response, "heartbeat").await?;
        let payload: HeartbeatResponse = response.json().await.map_err(transport)?;
        Ok(payload.nanosecond_heartbeat)
    }

    async fn get_or_create_collection(&self, name: &str) -> AgentResult<CollectionHandle> {
        let request = CreateCollectionRequest {
            name,
            metadata: serde_json::json!({ "description": COLLECTION_DESCRIPTION }),
            get_or_create: true,
        };

        let response = self
            .client
            .post(format!("{}/collections", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let response = Self::check(response, "get_or_create_collection").await?;
        let payload: CollectionPayload = response.json().await.map_err(transport)?;

        Ok(CollectionHandle {
            id: payload.id,
            name: payload.name,
            metadata: payload.metadata,
        })
    }

    async fn add(
        &self,
        collection_id: &str,
        ids: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        documents: Vec<String>,
        metadatas: Vec<serde_json::Value>,
    ) -> AgentResult<()> {
        let request = AddRequest {
            ids,
            embeddings,
            documents,
            metadatas,
        };

        let response = self
            .client
            .post(format!("{}/collections/{}/add", self.base_url, collection_id))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        Self::check(response, "add").await?;
        Ok(())
    }

    async fn query(
        &self,
        collection_id: &str,
        query_embeddings: Vec<Vec<f32>>,
        n_results: usize,
    ) -> AgentResult<QueryBatches> {
        let request = QueryRequest {
            query_embeddings,
            n_results,
            include: vec!["documents", "metadatas", "distances"],
        };

        let response = self
            .client
            .post(format!(
                "{}/collections/{}/query",
                self.base_url, collection_id
            ))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let response = Self::check(response, "query").await?;
        let payload: QueryResponse = response.json().await.map_err(transport)?;

        Ok(QueryBatches {
            ids: payload.ids,
            documents: payload.documents.unwrap_or_default(),
            metadatas: payload.metadatas.unwrap_or_default(),
            distances: payload.distances.unwrap_or_default(),
        })
    }

    async fn delete(&self, collection_id: &str, ids: Vec<String>) -> AgentResult<()> {
        let request = DeleteRequest { ids };

        let response = self
            .client
            .post(format!(
                "{}/collections/{}/delete",
                self.base_url, collection_id
            ))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        Self::check(response, "delete").await?;
        Ok(())
    }

    async fn count(&self, collection_id: &str) -> AgentResult<u64> {
        let response = self
            .client
            .get(format!(
                "{}/collections/{}/count",
                self.base_url, collection_id
            ))
            .send()
            .await
            .map_err(transport)?;

        let response = Self::check(response, "count").await?;
        response.json().await.map_err(transport)
    }
}

/// Connector that builds HTTP clients from a [`ChromaConfig`].
pub struct HttpChromaConnector {
    config: ChromaConfig,
}

impl HttpChromaConnector {
    pub fn new(config: ChromaConfig) -> Self {
        Self { config }
    }
}

impl ChromaConnector for HttpChromaConnector {
    fn connect(&self) -> AgentResult<Arc<dyn ChromaApi>> {
        Ok(Arc::new(ChromaHttpClient::new(&self.config)))
    }
}
