use std::sync::Arc;

use tracing::instrument;

use crate::embedding::EmbeddingProvider;
use crate::error::AgentResult;
use crate::models::{CollectionInfo, SearchOutcome};
use crate::repository::VectorRepository;

/// Service that pairs an embedding provider with a vector repository.
///
/// Documents are embedded before storage and queries are embedded before
/// search, so callers only ever deal in plain text.
#[derive(Clone)]
pub struct VectorService {
    repository: Arc<dyn VectorRepository>,
    embeddings: Arc<dyn EmbeddingProvider>,
}

impl VectorService {
    pub fn new(
        repository: Arc<dyn VectorRepository>,
        embeddings: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            repository,
            embeddings,
        }
    }

    /// Embed and store documents. Identifier and metadata defaults are
    /// applied by the repository.
    #[instrument(skip(self, documents, metadatas, ids), fields(count = documents.len()))]
    pub async fn add_documents(
        &self,
        documents: Vec<String>,
        metadatas: Option<Vec<serde_json::Value>>,
        ids: Option<Vec<String>>,
    ) -> AgentResult<()> {
        let embeddings = self.embeddings.embed_batch(&documents).await?;
        self.repository
            .add_documents(documents, embeddings, metadatas, ids)
            .await
    }

    /// Embed the query text and return its nearest documents with their
    /// metadata and distances, ascending by distance.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, n_results: usize) -> AgentResult<SearchOutcome> {
        let embedding = self.embeddings.embed(query).await?;
        let batches = self.repository.query(vec![embedding], n_results).await?;

        // One query embedding in, one batch out.
        Ok(SearchOutcome {
            documents: batches.documents.into_iter().next().unwrap_or_default(),
            metadatas: batches.metadatas.into_iter().next().unwrap_or_default(),
            distances: batches.distances.into_iter().next().unwrap_or_default(),
        })
    }

    #[instrument(skip(self))]
    pub async fn delete_document(&self, id: &str) -> AgentResult<()> {
        self.repository.delete_documents(vec![id.to_string()]).await
    }

    #[instrument(skip(self))]
    pub async fn collection_info(&self) -> AgentResult<CollectionInfo> {
        self.repository.collection_info().await
    }
}
